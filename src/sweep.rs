//! Parallel parameter sweeps.
//!
//! Every integration and every angle search is independent, so these helpers
//! fan the work out over the rayon thread pool and collect results in input
//! order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::angle_solver::{solve, AngleSolution};
use crate::error::BallisticsError;
use crate::integrator::integrate;
use crate::params::{AngleSearchProblem, SimulationParams};

/// Final distance of one run in an angle sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleSample {
    pub angle_rad: f64,
    pub final_x: f64,
    pub max_height: f64,
    pub time_of_flight: f64,
}

/// Final distance of one run in a time-step sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeStepSample {
    pub time_step: f64,
    pub final_x: f64,
    pub points: usize,
}

/// Time steps `10^(start_exponent + i * exponent_step)` for `i in 0..count`.
///
/// `log_spaced_time_steps(-5.0, 0.02, 50)` covers 1e-5 s up to ~9.5e-5 s.
pub fn log_spaced_time_steps(start_exponent: f64, exponent_step: f64, count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 10f64.powf(start_exponent + i as f64 * exponent_step))
        .collect()
}

/// Launch angles from `start_deg` to `end_deg` inclusive, in radians
pub fn angle_range_degrees(start_deg: f64, end_deg: f64, step_deg: f64) -> Vec<f64> {
    if !(step_deg > 0.0) || end_deg < start_deg {
        return Vec::new();
    }
    let count = ((end_deg - start_deg) / step_deg + 1e-9).floor() as usize + 1;
    (0..count)
        .map(|i| (start_deg + i as f64 * step_deg).to_radians())
        .collect()
}

/// Integrate `base` once per launch angle
pub fn range_vs_angle(
    base: &SimulationParams,
    angles: &[f64],
) -> Result<Vec<AngleSample>, BallisticsError> {
    angles
        .par_iter()
        .map(|&angle| {
            let traj = integrate(&base.with_heading(angle).with_trace(false))?;
            Ok(AngleSample {
                angle_rad: angle,
                final_x: traj.final_x(),
                max_height: traj.max_height(),
                time_of_flight: traj.time_of_flight(),
            })
        })
        .collect()
}

/// Integrate `base` once per time step, to see how the final distance
/// converges as the step shrinks
pub fn range_vs_time_step(
    base: &SimulationParams,
    time_steps: &[f64],
) -> Result<Vec<TimeStepSample>, BallisticsError> {
    time_steps
        .par_iter()
        .map(|&dt| {
            let mut params = base.with_trace(false);
            params.time_step = dt;
            let traj = integrate(&params)?;
            Ok(TimeStepSample {
                time_step: dt,
                final_x: traj.final_x(),
                points: traj.len(),
            })
        })
        .collect()
}

/// Solve many independent angle searches; one result per problem, in order
pub fn solve_many(problems: &[AngleSearchProblem]) -> Vec<Result<AngleSolution, BallisticsError>> {
    problems.par_iter().map(solve).collect()
}
