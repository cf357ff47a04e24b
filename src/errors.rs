//! Error types produced while validating shaft inputs or solving for diagrams.

use thiserror::Error;

/// Error returned when a shaft description is not physically meaningful.
///
/// Every variant is fatal: the solver either produces a fully self-consistent set
/// of diagrams or returns one of these and nothing else.
///
/// # Examples
///
/// ```
/// use shaftx::{solve, DomainError, ShaftSpec};
///
/// let spec = ShaftSpec {
///     speed_rpm: 0.0,
///     ..ShaftSpec::default()
/// };
/// let error = solve(&spec).expect_err("a shaft must rotate to transmit power");
/// assert_eq!(error, DomainError::NonPositiveSpeed { speed_rpm: 0.0 });
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    /// Returned when the rotational speed is zero or negative.
    #[error("rotational speed must be positive (received {speed_rpm} rpm)")]
    NonPositiveSpeed {
        /// Rejected speed in revolutions per minute.
        speed_rpm: f64,
    },
    /// Returned when the transmitted power is zero or negative.
    #[error("transmitted power must be positive (received {power_hp} hp)")]
    NonPositivePower {
        /// Rejected power in horsepower.
        power_hp: f64,
    },
    /// Returned when the shaft carries no gears.
    #[error("shaft must carry at least one gear")]
    MissingGears,
    /// Returned when stations are not strictly increasing from the free end.
    #[error("position of {station} ({position} in) must be greater than {previous} ({previous_position} in)")]
    NonIncreasingPositions {
        /// Station that is out of order.
        station: String,
        /// Position of the offending station in inches.
        position: f64,
        /// Station that precedes it.
        previous: String,
        /// Position of the preceding station in inches.
        previous_position: f64,
    },
    /// Returned when a diameter or strength is zero or negative.
    #[error("{field} must be positive (received {value})")]
    NonPositiveDimension {
        /// Name of the rejected field.
        field: String,
        /// Rejected value.
        value: f64,
    },
    /// Returned when a gear weight is negative.
    #[error("weight of gear {gear} must not be negative (received {weight} lb)")]
    NegativeWeight {
        /// Label of the offending gear.
        gear: String,
        /// Rejected weight in pounds.
        weight: f64,
    },
    /// Returned when a tooth form carries unusable ratios or angles.
    #[error("gear {gear} has an invalid tooth form: {reason}")]
    InvalidToothForm {
        /// Label of the offending gear.
        gear: String,
        /// Description of the invalid parameter.
        reason: String,
    },
    /// Returned when any input is NaN or infinite.
    #[error("{field} must be finite (received {value})")]
    NonFinite {
        /// Name of the rejected field.
        field: String,
        /// Rejected value.
        value: f64,
    },
    /// Returned when the torques added and removed by the gears do not cancel.
    #[error("gear torque fractions sum to {net_fraction}; input and output torque must balance")]
    UnbalancedTorque {
        /// Signed sum of the torque fractions.
        net_fraction: f64,
    },
    /// Returned when mesh forces were derived for a different set of gears.
    #[error("shaft carries {gears} gears but {meshes} mesh forces were supplied")]
    MeshCountMismatch {
        /// Number of gears on the shaft.
        gears: usize,
        /// Number of mesh forces supplied.
        meshes: usize,
    },
    /// Returned when a diagram does not close beyond the far bearing.
    #[error("{quantity} does not return to zero beyond the far bearing (residual {residual})")]
    Unbalanced {
        /// Diagram that failed the closure check.
        quantity: String,
        /// Remaining value beyond the far bearing.
        residual: f64,
    },
}
