//! Error types for the smooth-motion library.
//!
//! Provides unified error handling across configuration, geometry construction,
//! and segment-time solving. All errors are returned to the immediate caller;
//! the core never logs or retries.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all smooth-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Geometric construction error
    Geometry(GeometryError),
    /// Segment-time solver error
    Solver(SolverError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Per-axis jerk limit is not positive
    InvalidJerkLimit {
        /// Axis index (0-6)
        axis: usize,
        /// Offending value
        value: f64,
    },
    /// Per-axis acceleration limit is not positive
    InvalidAccelLimit {
        /// Axis index (0-6)
        axis: usize,
        /// Offending value
        value: f64,
    },
    /// Per-axis speed limit is not positive
    InvalidSpeedLimit {
        /// Axis index (0-6)
        axis: usize,
        /// Offending value
        value: f64,
    },
    /// Smoothing precision (sagitta) must be > 0
    InvalidPrecision(f64),
    /// Centripetal acceleration bound must be > 0
    InvalidCentripetalAccel(f64),
    /// Solver tolerance must be > 0
    InvalidTolerance(f64),
    /// Solver iteration budget must be > 0
    ZeroIterationBudget,
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Geometric construction errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Chord and start direction are colinear; the arc radius is undefined.
    /// Callers should keep the straight path instead of smoothing.
    ColinearTangents,
    /// Chord is longer than the arc diameter; no arc of the requested radius
    /// passes through both endpoints
    ChordExceedsDiameter {
        /// Spatial chord length
        chord: f64,
        /// Arc diameter (2·radius)
        diameter: f64,
    },
    /// Fillet trim length exceeds one of the input vectors
    TrimExceedsLength {
        /// Required trim length
        trim: f64,
        /// Spatial length of the incoming vector
        incoming: f64,
        /// Spatial length of the outgoing vector
        outgoing: f64,
    },
    /// Attempted to normalize or take the direction of a zero-length vector
    ZeroLength,
    /// Corner precision (sagitta) must be > 0
    InvalidPrecision(f64),
    /// Centripetal acceleration bound must be > 0
    InvalidCentripetalAccel(f64),
}

/// Phase of the segment-time solver, reported on convergence failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverPhase {
    /// Exit-velocity alignment (adjusts the exit ramp)
    Velocity,
    /// Position alignment (adjusts the entry ramp and cruise)
    Position,
}

/// Segment-time solver errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The commanded distance is below the minimum needed to ramp between the
    /// entry and exit speeds. Recoverable by lowering the speeds or merging
    /// the move with its neighbor.
    PathTooShort {
        /// Commanded distance
        requested: f64,
        /// Minimum feasible distance for the vin→vout ramp
        minimum: f64,
    },
    /// The adaptive step underflowed before both errors met tolerance.
    /// Recoverable by relaxing tolerances or enlarging the initial step.
    Convergence {
        /// Phase that failed to converge
        phase: SolverPhase,
        /// Residual position error
        position_error: f64,
        /// Residual velocity error
        velocity_error: f64,
    },
    /// The iteration budget ran out before convergence
    IterationBudget {
        /// Budget that was exhausted
        limit: u32,
    },
    /// The solve was aborted through its cancellation flag
    Cancelled,
    /// One of the kinematic limits is not positive
    InvalidEnvelope {
        /// Jerk limit passed in
        jerk: f64,
        /// Acceleration limit passed in
        accel: f64,
        /// Speed limit passed in
        speed: f64,
    },
    /// Entry or exit speed exceeds the speed limit
    SpeedExceedsLimit {
        /// Requested boundary speed
        requested: f64,
        /// Speed limit for the move
        max: f64,
    },
    /// Commanded distance must be positive
    NonPositiveDistance(f64),
    /// Position or velocity tolerance must be positive
    NonPositiveTolerance(f64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Geometry(e) => write!(f, "Geometry error: {}", e),
            Error::Solver(e) => write!(f, "Solver error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidJerkLimit { axis, value } => {
                write!(f, "Invalid jerk limit {} on axis {}. Must be > 0", value, axis)
            }
            ConfigError::InvalidAccelLimit { axis, value } => {
                write!(f, "Invalid acceleration limit {} on axis {}. Must be > 0", value, axis)
            }
            ConfigError::InvalidSpeedLimit { axis, value } => {
                write!(f, "Invalid speed limit {} on axis {}. Must be > 0", value, axis)
            }
            ConfigError::InvalidPrecision(v) => {
                write!(f, "Invalid smoothing precision: {}. Must be > 0", v)
            }
            ConfigError::InvalidCentripetalAccel(v) => {
                write!(f, "Invalid centripetal acceleration: {}. Must be > 0", v)
            }
            ConfigError::InvalidTolerance(v) => {
                write!(f, "Invalid solver tolerance: {}. Must be > 0", v)
            }
            ConfigError::ZeroIterationBudget => write!(f, "Solver iteration budget must be > 0"),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::ColinearTangents => {
                write!(f, "Chord and start direction are colinear; arc radius is undefined")
            }
            GeometryError::ChordExceedsDiameter { chord, diameter } => {
                write!(f, "Chord length {} exceeds arc diameter {}", chord, diameter)
            }
            GeometryError::TrimExceedsLength { trim, incoming, outgoing } => {
                write!(
                    f,
                    "Fillet trim {} exceeds input length (incoming {}, outgoing {})",
                    trim, incoming, outgoing
                )
            }
            GeometryError::ZeroLength => write!(f, "Cannot take the direction of a zero vector"),
            GeometryError::InvalidPrecision(v) => {
                write!(f, "Invalid corner precision: {}. Must be > 0", v)
            }
            GeometryError::InvalidCentripetalAccel(v) => {
                write!(f, "Invalid centripetal acceleration: {}. Must be > 0", v)
            }
        }
    }
}

impl fmt::Display for SolverPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverPhase::Velocity => write!(f, "velocity"),
            SolverPhase::Position => write!(f, "position"),
        }
    }
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::PathTooShort { requested, minimum } => {
                write!(
                    f,
                    "Distance {} is below the minimum feasible ramp distance {}",
                    requested, minimum
                )
            }
            SolverError::Convergence { phase, position_error, velocity_error } => {
                write!(
                    f,
                    "Step underflow in {} phase (position error {}, velocity error {})",
                    phase, position_error, velocity_error
                )
            }
            SolverError::IterationBudget { limit } => {
                write!(f, "Solver exceeded its iteration budget of {}", limit)
            }
            SolverError::Cancelled => write!(f, "Solve cancelled"),
            SolverError::InvalidEnvelope { jerk, accel, speed } => {
                write!(
                    f,
                    "Kinematic limits must be positive (jerk {}, accel {}, speed {})",
                    jerk, accel, speed
                )
            }
            SolverError::SpeedExceedsLimit { requested, max } => {
                write!(f, "Boundary speed {} exceeds the speed limit {}", requested, max)
            }
            SolverError::NonPositiveDistance(v) => {
                write!(f, "Commanded distance {} must be > 0", v)
            }
            SolverError::NonPositiveTolerance(v) => {
                write!(f, "Solver tolerance {} must be > 0", v)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<GeometryError> for Error {
    fn from(e: GeometryError) -> Self {
        Error::Geometry(e)
    }
}

impl From<SolverError> for Error {
    fn from(e: SolverError) -> Self {
        Error::Solver(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for GeometryError {}

#[cfg(feature = "std")]
impl std::error::Error for SolverError {}
