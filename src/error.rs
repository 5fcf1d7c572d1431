//! Heat aura error types.
//!
//! Nothing here is fatal: the aura tick treats every error as "skip this
//! entity and carry on", so a tick that meets a despawned limb or a fireproof
//! prop simply affects fewer targets.
//!
//! ## Usage
//!
//! ```rust
//! use tanker::error::{SimError, SimResult};
//!
//! fn lookup(found: Option<f32>) -> SimResult<f32> {
//!     found.ok_or(SimError::EntityNotFound { context: "limb position" })
//! }
//! ```

use std::fmt;

/// Top-level error enum for the heat aura simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// An entity handle was referenced but no longer exists in the world, or
    /// lacks the component the lookup needed. Usually a limb torn off and
    /// despawned between two aura ticks.
    EntityNotFound {
        /// Human-readable description of where the lookup occurred.
        context: &'static str,
    },

    /// The target's material declined ignition (not flammable, or no thermal
    /// state at all).
    IgnitionRejected {
        /// Human-readable description of the rejected target.
        context: &'static str,
    },

    /// `assets/heat_aura.toml` could not be parsed.
    InvalidConfig {
        /// Parser message.
        message: String,
    },

    /// A tunable is outside its safe operating range.
    UnsafeConstant {
        name: &'static str,
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::EntityNotFound { context } => write!(f, "missing {context}"),
            SimError::IgnitionRejected { context } => write!(f, "cannot ignite {context}"),
            SimError::InvalidConfig { message } => write!(f, "invalid heat aura config: {message}"),
            SimError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(f, "{name} = {value} (expected {safe_range})"),
        }
    }
}

impl std::error::Error for SimError {}

pub type SimResult<T> = Result<T, SimError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is strictly positive and finite.
pub fn validate_positive(name: &'static str, value: f32) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is a probability in `[0, 1]`.
pub fn validate_probability(name: &'static str, value: f32) -> SimResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, 1.0]",
        })
    }
}

/// Returns an error if `value` is negative or not finite.
pub fn validate_non_negative(name: &'static str, value: f32) -> SimResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(validate_positive("radius", 3.0).is_ok());
        assert!(validate_positive("radius", 0.0).is_err());
        assert!(validate_positive("radius", f32::NAN).is_err());
    }

    #[test]
    fn probability_bounds_are_inclusive() {
        assert!(validate_probability("chance", 0.0).is_ok());
        assert!(validate_probability("chance", 1.0).is_ok());
        assert!(validate_probability("chance", 1.01).is_err());
        assert!(validate_probability("chance", f32::NAN).is_err());
    }

    #[test]
    fn display_names_the_constant() {
        let err = validate_positive("grid_cell_size", -1.0).unwrap_err();
        assert!(err.to_string().contains("grid_cell_size"));
    }
}
