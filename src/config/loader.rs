//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::MachineConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use smooth_motion::load_config;
///
/// let config = load_config("machine.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MachineConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<MachineConfig> {
    let config: MachineConfig = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(e.message()).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })?;

    // Validate the configuration
    super::validation::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[limits]
max_jerk = [100000.0, 100000.0, 100000.0, 100000.0, 100000.0, 100000.0, 100000.0]
max_accel = [10000.0, 10000.0, 10000.0, 10000.0, 10000.0, 10000.0, 10000.0]
max_speed = [1000.0, 1000.0, 1000.0, 500.0, 500.0, 500.0, 200.0]
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.limits.max_speed[3], 500.0);
        assert_eq!(config.limits.max_speed[6], 200.0);
        // Unspecified sections fall back to defaults
        assert_eq!(config.smoothing.precision, 0.1);
        assert_eq!(config.solver.max_iterations, 1_000_000);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[limits]
max_jerk = [50000.0, 50000.0, 50000.0, 50000.0, 50000.0, 50000.0, 50000.0]
max_accel = [5000.0, 5000.0, 5000.0, 5000.0, 5000.0, 5000.0, 5000.0]
max_speed = [1000.0, 1000.0, 1000.0, 1000.0, 1000.0, 1000.0, 1000.0]

[smoothing]
precision = 0.05
max_centripetal_accel = 2500.0

[solver]
pos_tolerance = 0.001
vel_tolerance = 0.001
max_iterations = 100000
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.smoothing.precision, 0.05);
        assert_eq!(config.smoothing.max_centripetal_accel, 2500.0);
        assert_eq!(config.solver.pos_tolerance, 0.001);
        assert_eq!(config.solver.max_iterations, 100_000);
    }

    #[test]
    fn test_invalid_limit_fails_validation() {
        let toml = r#"
[limits]
max_jerk = [100000.0, 100000.0, 100000.0, 100000.0, 100000.0, 100000.0, 100000.0]
max_accel = [10000.0, 0.0, 10000.0, 10000.0, 10000.0, 10000.0, 10000.0]
max_speed = [1000.0, 1000.0, 1000.0, 1000.0, 1000.0, 1000.0, 1000.0]
"#;

        assert!(parse_config(toml).is_err());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = parse_config("[limits\nmax_jerk = ");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }
}
