//! Fixed-step trajectory integrator.
//!
//! Explicit first-order Euler over `[speed, heading, x, y]`, stepping until the
//! most recent state passes the horizontal stop distance or drops below the
//! stop height. The state that crosses the bound is kept, so a run may end up
//! to one step past the boundary.

use tracing::trace;

use crate::derivatives::{euler_step, ProjectileState};
use crate::error::BallisticsError;
use crate::params::SimulationParams;
use crate::trajectory::Trajectory;

/// Receives every state as it is appended. Observers see values only; they
/// cannot change what the integrator returns.
pub trait StepObserver {
    fn observe(&mut self, index: usize, state: &ProjectileState);
}

impl<F> StepObserver for F
where
    F: FnMut(usize, &ProjectileState),
{
    fn observe(&mut self, index: usize, state: &ProjectileState) {
        self(index, state)
    }
}

/// Observer that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn observe(&mut self, _index: usize, _state: &ProjectileState) {}
}

/// Emits one `trace` event per state
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceObserver;

impl StepObserver for TraceObserver {
    fn observe(&mut self, index: usize, state: &ProjectileState) {
        if index == 0 {
            trace!(
                "({:.3}, {:.3}) - V:{:.3} A: {:.3}",
                state.x, state.y, state.speed, state.heading_degrees()
            );
        } else {
            trace!(
                "Time {:.3}: ({:.3}, {:.3}) - V:{:.3} A: {:.3}",
                state.t, state.x, state.y, state.speed, state.heading_degrees()
            );
        }
    }
}

/// Integrate one trajectory. Traces every state when `params.trace` is set.
pub fn integrate(params: &SimulationParams) -> Result<Trajectory, BallisticsError> {
    if params.trace {
        integrate_with_observer(params, &mut TraceObserver)
    } else {
        integrate_with_observer(params, &mut NoopObserver)
    }
}

/// Integrate one trajectory, handing each appended state to `observer`.
///
/// Fails with `InvalidParameter` before stepping if the parameters are
/// unusable, and with `Domain` if a step would be computed from a
/// non-positive speed or produces non-finite values.
pub fn integrate_with_observer<O>(
    params: &SimulationParams,
    observer: &mut O,
) -> Result<Trajectory, BallisticsError>
where
    O: StepObserver + ?Sized,
{
    params.validate()?;

    let dt = params.time_step;
    let drag = params.drag_coefficient;
    let stop_x = params.stop_distance;
    let stop_y = params.stop_height;

    let mut current = ProjectileState::new(
        0.0,
        params.initial_speed,
        params.initial_heading,
        params.initial_x,
        params.initial_y,
    );
    let mut states = vec![current];
    observer.observe(0, &current);

    while current.x <= stop_x && current.y >= stop_y {
        let step = states.len();

        // Heading rate divides by speed
        if !(current.speed > 0.0) {
            return Err(BallisticsError::Domain {
                step,
                time: current.t,
                reason: format!("speed fell to {} m/s", current.speed),
            });
        }

        let next = euler_step(&current, dt, drag);
        if !next.is_finite() {
            return Err(BallisticsError::Domain {
                step,
                time: next.t,
                reason: format!(
                    "state became non-finite (speed {}, heading {}, x {}, y {})",
                    next.speed, next.heading, next.x, next.y
                ),
            });
        }

        observer.observe(step, &next);
        states.push(next);
        current = next;
    }

    Ok(Trajectory::from_states(states, stop_y, stop_x))
}
