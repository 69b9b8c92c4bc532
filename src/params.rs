//! Input parameter types for the integrator and the launch-angle solver.
//!
//! Both are plain value types owned by the caller. Every field can be
//! overridden from JSON; missing fields fall back to the documented defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_STOP_DISTANCE_M, DEFAULT_STOP_HEIGHT_M, DEGREES_TO_RADIANS, DISTANCE_TOLERANCE_M,
    HOST_DEFAULT_DRAG, HOST_DEFAULT_SPEED_MPS, HOST_DISPLAY_TIME_STEP_S, MAX_BISECTION_ITERATIONS,
    MIN_BRACKET_WIDTH_RAD, SEARCH_FIRST_TRY_DEG, SEARCH_LOWER_DEG, SEARCH_UPPER_DEG,
};
use crate::error::BallisticsError;

/// Initial conditions and stop bounds for one integration run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub initial_speed: f64,     // m/s
    pub initial_heading: f64,   // radians above horizontal
    pub initial_x: f64,         // meters
    pub initial_y: f64,         // meters
    pub time_step: f64,         // seconds, > 0
    pub drag_coefficient: f64,  // 1/m, >= 0
    pub stop_height: f64,       // meters
    pub stop_distance: f64,     // meters
    pub trace: bool,            // emit one trace event per state
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            initial_speed: HOST_DEFAULT_SPEED_MPS,
            initial_heading: 0.0,
            initial_x: 0.0,
            initial_y: 0.0,
            time_step: HOST_DISPLAY_TIME_STEP_S,
            drag_coefficient: HOST_DEFAULT_DRAG,
            stop_height: DEFAULT_STOP_HEIGHT_M,
            stop_distance: DEFAULT_STOP_DISTANCE_M,
            trace: false,
        }
    }
}

impl SimulationParams {
    /// Build parameters from the six required scalars; stop bounds default to
    /// ground level and 10 km, tracing is off.
    pub fn new(
        initial_speed: f64,
        initial_heading: f64,
        initial_x: f64,
        initial_y: f64,
        time_step: f64,
        drag_coefficient: f64,
    ) -> Self {
        Self {
            initial_speed,
            initial_heading,
            initial_x,
            initial_y,
            time_step,
            drag_coefficient,
            stop_height: DEFAULT_STOP_HEIGHT_M,
            stop_distance: DEFAULT_STOP_DISTANCE_M,
            trace: false,
        }
    }

    /// Launch from the origin at `heading` radians
    pub fn launch(initial_speed: f64, heading: f64, time_step: f64, drag_coefficient: f64) -> Self {
        Self::new(initial_speed, heading, 0.0, 0.0, time_step, drag_coefficient)
    }

    pub fn with_heading(mut self, heading: f64) -> Self {
        self.initial_heading = heading;
        self
    }

    pub fn with_stop_height(mut self, stop_height: f64) -> Self {
        self.stop_height = stop_height;
        self
    }

    pub fn with_stop_distance(mut self, stop_distance: f64) -> Self {
        self.stop_distance = stop_distance;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn validate(&self) -> Result<(), BallisticsError> {
        if !(self.time_step > 0.0) || !self.time_step.is_finite() {
            return Err(BallisticsError::invalid(
                "time_step",
                format!("must be a positive finite number, got {}", self.time_step),
            ));
        }
        if !(self.drag_coefficient >= 0.0) || !self.drag_coefficient.is_finite() {
            return Err(BallisticsError::invalid(
                "drag_coefficient",
                format!("must be finite and non-negative, got {}", self.drag_coefficient),
            ));
        }
        let finite_fields = [
            ("initial_speed", self.initial_speed),
            ("initial_heading", self.initial_heading),
            ("initial_x", self.initial_x),
            ("initial_y", self.initial_y),
            ("stop_height", self.stop_height),
            ("stop_distance", self.stop_distance),
        ];
        for (name, value) in finite_fields {
            if !value.is_finite() {
                return Err(BallisticsError::invalid(name, format!("must be finite, got {value}")));
            }
        }
        Ok(())
    }

    /// Parse and validate parameters from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, BallisticsError> {
        let params: SimulationParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Load and validate parameters from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, BallisticsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            BallisticsError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }
}

/// Which state the solver measures its residual on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactMode {
    /// Trial runs stop at the target distance; the residual is the distance
    /// still missing when the projectile hits the ground short of it.
    #[default]
    Crossing,
    /// Trial runs stop at the default horizontal bound; the residual is the
    /// miss distance at ground impact.
    Landing,
}

/// Bisection settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub lower_angle: f64,     // radians
    pub upper_angle: f64,     // radians
    pub first_try: f64,       // radians
    pub tolerance: f64,       // meters
    pub max_iterations: usize,
    pub min_bracket_width: f64, // radians
    pub mode: ImpactMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            lower_angle: SEARCH_LOWER_DEG * DEGREES_TO_RADIANS,
            upper_angle: SEARCH_UPPER_DEG * DEGREES_TO_RADIANS,
            first_try: SEARCH_FIRST_TRY_DEG * DEGREES_TO_RADIANS,
            tolerance: DISTANCE_TOLERANCE_M,
            max_iterations: MAX_BISECTION_ITERATIONS,
            min_bracket_width: MIN_BRACKET_WIDTH_RAD,
            mode: ImpactMode::Crossing,
        }
    }
}

impl SearchConfig {
    pub fn with_bounds(mut self, lower_angle: f64, upper_angle: f64) -> Self {
        self.lower_angle = lower_angle;
        self.upper_angle = upper_angle;
        self
    }

    pub fn with_mode(mut self, mode: ImpactMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn validate(&self) -> Result<(), BallisticsError> {
        if !self.lower_angle.is_finite() || !self.upper_angle.is_finite() {
            return Err(BallisticsError::invalid("search interval", "bounds must be finite"));
        }
        if self.lower_angle >= self.upper_angle {
            return Err(BallisticsError::invalid(
                "search interval",
                format!(
                    "lower angle {} must be below upper angle {}",
                    self.lower_angle, self.upper_angle
                ),
            ));
        }
        if !self.first_try.is_finite() {
            return Err(BallisticsError::invalid("first_try", "must be finite"));
        }
        if !(self.tolerance > 0.0) {
            return Err(BallisticsError::invalid(
                "tolerance",
                format!("must be positive, got {}", self.tolerance),
            ));
        }
        if self.max_iterations == 0 {
            return Err(BallisticsError::invalid("max_iterations", "must be at least 1"));
        }
        Ok(())
    }
}

/// One launch-angle search: speed, target, step size and drag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleSearchProblem {
    pub initial_speed: f64,
    pub target_distance: f64,
    pub time_step: f64,
    pub drag_coefficient: f64,
    #[serde(default)]
    pub search: SearchConfig,
}

impl AngleSearchProblem {
    pub fn new(initial_speed: f64, target_distance: f64, time_step: f64, drag_coefficient: f64) -> Self {
        Self {
            initial_speed,
            target_distance,
            time_step,
            drag_coefficient,
            search: SearchConfig::default(),
        }
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Parameters for a trial launch at `angle`, stopping at `stop_distance`
    pub fn trial(&self, angle: f64, stop_distance: f64) -> SimulationParams {
        SimulationParams::launch(self.initial_speed, angle, self.time_step, self.drag_coefficient)
            .with_stop_distance(stop_distance)
    }

    pub fn validate(&self) -> Result<(), BallisticsError> {
        self.search.validate()?;
        if !self.target_distance.is_finite() {
            return Err(BallisticsError::invalid("target_distance", "must be finite"));
        }
        // Remaining fields are checked by the integrator on the first trial.
        self.trial(self.search.upper_angle, DEFAULT_STOP_DISTANCE_M).validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fills_documented_defaults() {
        let params = SimulationParams::new(183.0, 0.05, 0.0, 0.0, 0.0001, 0.00235);
        assert_eq!(params.stop_height, 0.0);
        assert_eq!(params.stop_distance, 10_000.0);
        assert!(!params.trace);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_time_step() {
        for dt in [0.0, -0.001, f64::NAN] {
            let err = SimulationParams::launch(50.0, 0.1, dt, 0.0).validate().unwrap_err();
            assert!(matches!(err, BallisticsError::InvalidParameter { name: "time_step", .. }));
        }
    }

    #[test]
    fn test_rejects_negative_drag() {
        let err = SimulationParams::launch(50.0, 0.1, 0.001, -0.01).validate().unwrap_err();
        assert!(matches!(err, BallisticsError::InvalidParameter { name: "drag_coefficient", .. }));
    }

    #[test]
    fn test_rejects_infinite_stop_bound() {
        let params = SimulationParams::launch(50.0, 0.1, 0.001, 0.0).with_stop_height(f64::NEG_INFINITY);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_json_overrides_subset_of_fields() {
        let params = SimulationParams::from_json_str(
            r#"{ "initial_speed": 183.0, "drag_coefficient": 0.00235, "trace": true }"#,
        )
        .unwrap();
        assert_eq!(params.initial_speed, 183.0);
        assert_eq!(params.drag_coefficient, 0.00235);
        assert!(params.trace);
        assert_eq!(params.time_step, HOST_DISPLAY_TIME_STEP_S);
        assert_eq!(params.stop_distance, DEFAULT_STOP_DISTANCE_M);
    }

    #[test]
    fn test_json_validation_runs() {
        let result = SimulationParams::from_json_str(r#"{ "time_step": -1.0 }"#);
        assert!(matches!(result, Err(BallisticsError::InvalidParameter { .. })));
    }

    #[test]
    fn test_json_file_missing_is_config_error() {
        let result = SimulationParams::from_json_file("/nonexistent/trajectory.json");
        assert!(matches!(result, Err(BallisticsError::Config(_))));
    }

    #[test]
    fn test_search_config_rejects_inverted_interval() {
        let config = SearchConfig::default().with_bounds(0.5, 0.5);
        assert!(matches!(
            config.validate(),
            Err(BallisticsError::InvalidParameter { name: "search interval", .. })
        ));
    }

    #[test]
    fn test_impact_mode_serializes_lowercase() {
        let json = serde_json::to_string(&ImpactMode::Landing).unwrap();
        assert_eq!(json, "\"landing\"");
    }

    #[test]
    fn test_problem_trial_carries_inputs() {
        let problem = AngleSearchProblem::new(75.0, 50.0, 0.0002, 0.0003747);
        let trial = problem.trial(0.2, 50.0);
        assert_eq!(trial.initial_speed, 75.0);
        assert_eq!(trial.initial_heading, 0.2);
        assert_eq!(trial.stop_distance, 50.0);
        assert_eq!(trial.initial_x, 0.0);
        assert_eq!(trial.initial_y, 0.0);
    }
}
