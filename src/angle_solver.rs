use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::constants::{
    DEFAULT_STOP_DISTANCE_M, PROBE_BACKOFF_FRACTION, RADIANS_TO_DEGREES, UNREACHABLE_FALLBACK_DEG,
};
use crate::error::BallisticsError;
use crate::integrator::integrate;
use crate::params::{AngleSearchProblem, ImpactMode, SearchConfig};
use crate::trajectory::Trajectory;

/// Converged launch angle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleResult {
    pub angle_rad: f64,
    pub iterations_used: usize,
    pub final_error: f64, // target minus achieved distance, meters
    pub final_x: f64,     // achieved distance, meters
}

impl AngleResult {
    pub fn angle_deg(&self) -> f64 {
        self.angle_rad * RADIANS_TO_DEGREES
    }
}

/// Outcome of a launch-angle search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AngleSolution {
    Converged(AngleResult),
    /// Even the upper search angle falls short (or the target is negative).
    Unreachable { max_reach: f64 },
}

impl AngleSolution {
    pub fn angle(&self) -> Option<f64> {
        match self {
            AngleSolution::Converged(result) => Some(result.angle_rad),
            AngleSolution::Unreachable { .. } => None,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, AngleSolution::Unreachable { .. })
    }

    /// Launch angle with unreachable targets mapped to straight up (90°),
    /// for callers that still expect a single number.
    pub fn fallback_angle(&self) -> f64 {
        self.angle()
            .unwrap_or(UNREACHABLE_FALLBACK_DEG.to_radians())
    }
}

/// Find the launch angle that lands at `target_distance` using the default
/// search settings.
pub fn solve_angle(
    initial_speed: f64,
    target_distance: f64,
    time_step: f64,
    drag_coefficient: f64,
) -> Result<AngleSolution, BallisticsError> {
    solve(&AngleSearchProblem::new(initial_speed, target_distance, time_step, drag_coefficient))
}

/// Find the launch angle for `problem`.
///
/// Integrates once at the upper search angle to decide feasibility, then
/// bisects on the launch angle with the miss distance as residual. If the
/// upper angle itself leaves the valid domain, it is lowered until a probe
/// integrates cleanly and the search runs below that angle.
pub fn solve(problem: &AngleSearchProblem) -> Result<AngleSolution, BallisticsError> {
    problem.validate()?;

    let target = problem.target_distance;
    let horizon = DEFAULT_STOP_DISTANCE_M.max(target);

    let (upper_angle, max_reach) = probe_upper_angle(problem, horizon)?;
    let config = problem
        .search
        .with_bounds(problem.search.lower_angle, upper_angle);

    if target < 0.0 || max_reach < target {
        info!(
            target_m = target,
            max_reach_m = max_reach,
            speed_mps = problem.initial_speed,
            drag = problem.drag_coefficient,
            "target unreachable"
        );
        return Ok(AngleSolution::Unreachable { max_reach });
    }

    let stop_distance = match config.mode {
        ImpactMode::Crossing => target,
        ImpactMode::Landing => horizon,
    };

    let result = bisect_angle(&config, target, |angle| {
        integrate(&problem.trial(angle, stop_distance)).map(|traj| traj.final_x())
    })?;

    debug!(
        angle_deg = result.angle_deg(),
        iterations = result.iterations_used,
        error_m = result.final_error,
        "angle search converged"
    );
    Ok(AngleSolution::Converged(result))
}

/// Integrate at the upper search angle, out to `horizon`.
///
/// A domain error moves the probe angle a fixed share of the way down toward
/// the lower bound and tries again. Returns the first angle that integrates
/// together with its reach; fails once the interval has collapsed or the
/// iteration cap is spent.
fn probe_upper_angle(problem: &AngleSearchProblem, horizon: f64) -> Result<(f64, f64), BallisticsError> {
    let config = &problem.search;
    let mut angle = config.upper_angle;
    let mut attempt = 0;

    loop {
        attempt += 1;
        let err = match integrate(&problem.trial(angle, horizon)) {
            Ok(traj) => return Ok((angle, traj.final_x())),
            Err(e) => e,
        };

        let gap = angle - config.lower_angle;
        if !err.is_domain() || attempt >= config.max_iterations || gap < config.min_bracket_width {
            warn!(
                attempt,
                angle_deg = angle * RADIANS_TO_DEGREES,
                error = %err,
                "feasibility probe failed"
            );
            return Err(BallisticsError::FeasibilityProbe {
                angle_deg: angle * RADIANS_TO_DEGREES,
                source: Box::new(err),
            });
        }

        let next = angle - gap * PROBE_BACKOFF_FRACTION;
        warn!(
            attempt,
            angle_deg = angle * RADIANS_TO_DEGREES,
            next_angle_deg = next * RADIANS_TO_DEGREES,
            error = %err,
            "upper search angle outside valid domain, lowering it"
        );
        angle = next;
    }
}

/// Solve, then re-integrate the converged angle at `display_time_step` up to
/// the target for drawing. The trajectory is `None` when unreachable.
pub fn solve_with_trajectory(
    problem: &AngleSearchProblem,
    display_time_step: f64,
) -> Result<(AngleSolution, Option<Trajectory>), BallisticsError> {
    let solution = solve(problem)?;
    let trajectory = match solution.angle() {
        Some(angle) => {
            let mut params = problem.trial(angle, problem.target_distance);
            params.time_step = display_time_step;
            Some(integrate(&params)?)
        }
        None => None,
    };
    Ok((solution, trajectory))
}

/// Bisection on launch angle.
///
/// `reach` returns the achieved horizontal distance for a launch angle. A
/// domain error from it marks the angle as unusable and pulls the upper bound
/// down to it; any other error aborts the search.
pub fn bisect_angle<F>(
    config: &SearchConfig,
    target: f64,
    mut reach: F,
) -> Result<AngleResult, BallisticsError>
where
    F: FnMut(f64) -> Result<f64, BallisticsError>,
{
    config.validate()?;

    let mut lower = config.lower_angle;
    let mut upper = config.upper_angle;
    let mut try_angle = if config.first_try > lower && config.first_try < upper {
        config.first_try
    } else {
        (lower + upper) / 2.0
    };
    let mut last_error = f64::NAN;

    for iteration in 1..=config.max_iterations {
        match reach(try_angle) {
            Ok(final_x) => {
                let error = target - final_x;
                debug!(
                    iteration,
                    angle_deg = try_angle * RADIANS_TO_DEGREES,
                    final_x_m = final_x,
                    error_m = error,
                    "bisection step"
                );

                if error.abs() < config.tolerance {
                    return Ok(AngleResult {
                        angle_rad: try_angle,
                        iterations_used: iteration,
                        final_error: error,
                        final_x,
                    });
                }

                if error < 0.0 {
                    upper = try_angle;
                } else {
                    lower = try_angle;
                }
                last_error = error;
            }
            Err(e) if e.is_domain() => {
                warn!(
                    iteration,
                    angle_deg = try_angle * RADIANS_TO_DEGREES,
                    error = %e,
                    "launch angle outside valid domain, narrowing search"
                );
                upper = try_angle;
            }
            Err(e) => return Err(e),
        }

        if upper - lower < config.min_bracket_width {
            return Err(BallisticsError::Convergence {
                iterations: iteration,
                last_angle_rad: try_angle,
                last_error_m: last_error,
            });
        }

        try_angle = (upper + lower) / 2.0;
    }

    Err(BallisticsError::Convergence {
        iterations: config.max_iterations,
        last_angle_rad: try_angle,
        last_error_m: last_error,
    })
}
