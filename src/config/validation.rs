//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::MachineConfig;

/// Validate a machine configuration.
///
/// Checks:
/// - Every per-axis jerk/acceleration/speed limit is positive and finite
/// - Smoothing precision and centripetal bound are positive
/// - Solver tolerances are positive and the iteration budget is nonzero
pub fn validate_config(config: &MachineConfig) -> Result<()> {
    for (axis, &value) in config.limits.max_jerk.iter().enumerate() {
        if !(value > 0.0) || !value.is_finite() {
            return Err(Error::Config(ConfigError::InvalidJerkLimit { axis, value }));
        }
    }
    for (axis, &value) in config.limits.max_accel.iter().enumerate() {
        if !(value > 0.0) || !value.is_finite() {
            return Err(Error::Config(ConfigError::InvalidAccelLimit { axis, value }));
        }
    }
    for (axis, &value) in config.limits.max_speed.iter().enumerate() {
        if !(value > 0.0) || !value.is_finite() {
            return Err(Error::Config(ConfigError::InvalidSpeedLimit { axis, value }));
        }
    }

    if !(config.smoothing.precision > 0.0) {
        return Err(Error::Config(ConfigError::InvalidPrecision(
            config.smoothing.precision,
        )));
    }
    if !(config.smoothing.max_centripetal_accel > 0.0) {
        return Err(Error::Config(ConfigError::InvalidCentripetalAccel(
            config.smoothing.max_centripetal_accel,
        )));
    }

    if !(config.solver.pos_tolerance > 0.0) {
        return Err(Error::Config(ConfigError::InvalidTolerance(
            config.solver.pos_tolerance,
        )));
    }
    if !(config.solver.vel_tolerance > 0.0) {
        return Err(Error::Config(ConfigError::InvalidTolerance(
            config.solver.vel_tolerance,
        )));
    }
    if config.solver.max_iterations == 0 {
        return Err(Error::Config(ConfigError::ZeroIterationBudget));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&MachineConfig::default()).is_ok());
    }

    #[test]
    fn test_negative_axis_limit_rejected() {
        let mut config = MachineConfig::default();
        config.limits.max_accel[4] = -1.0;
        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidAccelLimit { axis: 4, .. }))
        ));
    }

    #[test]
    fn test_zero_speed_limit_rejected() {
        let mut config = MachineConfig::default();
        config.limits.max_speed[0] = 0.0;
        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidSpeedLimit { axis: 0, .. }))
        ));
    }

    #[test]
    fn test_zero_precision_rejected() {
        let mut config = MachineConfig::default();
        config.smoothing.precision = 0.0;
        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidPrecision(_)))
        ));
    }

    #[test]
    fn test_zero_iteration_budget_rejected() {
        let mut config = MachineConfig::default();
        config.solver.max_iterations = 0;
        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::ZeroIterationBudget))
        ));
    }
}
