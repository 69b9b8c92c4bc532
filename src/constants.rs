/// Physical and numerical constants used by the integrator and solver

/// Gravitational acceleration in m/s²
pub const G_ACCEL_MPS2: f64 = 9.81;

/// Default height at which integration stops (ground plane), meters
pub const DEFAULT_STOP_HEIGHT_M: f64 = 0.0;

/// Default horizontal distance at which integration stops, meters
pub const DEFAULT_STOP_DISTANCE_M: f64 = 10_000.0;

/// Conversion factor: degrees to radians
pub const DEGREES_TO_RADIANS: f64 = std::f64::consts::PI / 180.0;

/// Conversion factor: radians to degrees
pub const RADIANS_TO_DEGREES: f64 = 180.0 / std::f64::consts::PI;

// Launch-angle search defaults (degrees where noted)

/// Lower end of the launch-angle search interval (degrees)
pub const SEARCH_LOWER_DEG: f64 = -90.0;

/// Upper end of the launch-angle search interval (degrees)
///
/// The feasibility pre-check integrates at this angle: in vacuum it is the
/// maximum-range elevation, and with drag the true optimum sits slightly below.
pub const SEARCH_UPPER_DEG: f64 = 45.0;

/// First trial angle of the bisection (degrees). Not the interval midpoint.
pub const SEARCH_FIRST_TRY_DEG: f64 = 10.0;

/// Angle reported to legacy callers when a target is out of reach (degrees)
pub const UNREACHABLE_FALLBACK_DEG: f64 = 90.0;

/// Acceptable miss distance at the target, meters
pub const DISTANCE_TOLERANCE_M: f64 = 0.1;

/// Hard cap on bisection iterations
pub const MAX_BISECTION_ITERATIONS: usize = 200;

/// Bisection gives up once the bracket is narrower than this (radians)
pub const MIN_BRACKET_WIDTH_RAD: f64 = 1e-13;

/// Share of the remaining interval the feasibility probe gives up each time
/// the upper search angle leaves the valid domain
pub const PROBE_BACKOFF_FRACTION: f64 = 0.25;

// Host program defaults (bow-and-arrow aiming front-end)

/// Typical arrow launch speed, m/s
pub const HOST_DEFAULT_SPEED_MPS: f64 = 75.0;

/// Approximate arrow drag coefficient (1/m)
pub const HOST_DEFAULT_DRAG: f64 = 0.0003747;

/// Time step used while searching for the aim angle, seconds
pub const HOST_SOLVE_TIME_STEP_S: f64 = 0.0002;

/// Time step used for the displayed trajectory, seconds
pub const HOST_DISPLAY_TIME_STEP_S: f64 = 0.0001;

/// Number of points the display layer draws per trajectory
pub const HOST_DISPLAY_POINTS: usize = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_conversions_are_inverse() {
        let deg = 37.5;
        let back = deg * DEGREES_TO_RADIANS * RADIANS_TO_DEGREES;
        assert!((back - deg).abs() < 1e-12);
    }

    #[test]
    fn test_search_interval_is_ordered() {
        assert!(SEARCH_LOWER_DEG < SEARCH_FIRST_TRY_DEG);
        assert!(SEARCH_FIRST_TRY_DEG < SEARCH_UPPER_DEG);
    }
}
