// Error type shared by the integrator, the angle solver and the CLI
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BallisticsError {
    /// Rejected before any work is done: bad time step, negative drag,
    /// inverted search interval, non-finite input.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The projectile state left the domain where the equations of motion
    /// are defined (speed at or below zero, non-finite values).
    #[error("domain error at step {step} (t = {time:.6} s): {reason}")]
    Domain { step: usize, time: f64, reason: String },

    /// Bisection ran out of iterations or bracket width.
    #[error(
        "angle search did not converge after {iterations} iterations \
         (last angle {last_angle_rad:.9} rad, residual {last_error_m:.6} m)"
    )]
    Convergence {
        iterations: usize,
        last_angle_rad: f64,
        last_error_m: f64,
    },

    /// The feasibility check could not integrate at any upper angle it tried.
    #[error("feasibility probe at {angle_deg:.6}° failed: {source}")]
    FeasibilityProbe {
        angle_deg: f64,
        source: Box<BallisticsError>,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl BallisticsError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        BallisticsError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// True for errors that mean "this launch angle is outside the valid domain"
    pub fn is_domain(&self) -> bool {
        match self {
            BallisticsError::Domain { .. } => true,
            BallisticsError::FeasibilityProbe { source, .. } => source.is_domain(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = BallisticsError::invalid("dt", "must be positive, got 0");
        assert_eq!(err.to_string(), "invalid parameter `dt`: must be positive, got 0");
        assert!(!err.is_domain());
    }

    #[test]
    fn test_domain_error_message() {
        let err = BallisticsError::Domain {
            step: 12,
            time: 0.0012,
            reason: "speed fell to -0.5 m/s".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("step 12"));
        assert!(msg.contains("speed fell"));
        assert!(err.is_domain());
    }

    #[test]
    fn test_feasibility_failure_keeps_cause() {
        use std::error::Error as _;

        let err = BallisticsError::FeasibilityProbe {
            angle_deg: 45.0,
            source: Box::new(BallisticsError::Domain {
                step: 2,
                time: 0.1,
                reason: "speed fell to -900 m/s".to_string(),
            }),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("feasibility probe at 45.000000°"));
        assert!(msg.contains("step 2"));
        assert!(err.is_domain());
        assert!(err.source().is_some());
    }
}
