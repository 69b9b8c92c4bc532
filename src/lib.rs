//! # Trajectory Engine
//!
//! Point-mass projectile trajectories under gravity and quadratic drag, and a
//! launch-angle solver that finds the elevation landing a projectile at a
//! given distance.
//!
//! ```no_run
//! use trajectory_engine::{integrate, solve_angle, SimulationParams};
//!
//! let solution = solve_angle(75.0, 50.0, 0.0002, 0.0003747)?;
//! if let Some(angle) = solution.angle() {
//!     let path = integrate(&SimulationParams::launch(75.0, angle, 0.0001, 0.0003747)
//!         .with_stop_distance(50.0))?;
//!     println!("lands at {:.2} m after {} steps", path.final_x(), path.len());
//! }
//! # Ok::<(), trajectory_engine::BallisticsError>(())
//! ```

// Re-export the main types and functions
pub use angle_solver::{bisect_angle, solve, solve_angle, solve_with_trajectory, AngleResult, AngleSolution};
pub use derivatives::ProjectileState;
pub use error::BallisticsError;
pub use integrator::{integrate, integrate_with_observer, NoopObserver, StepObserver, TraceObserver};
pub use params::{AngleSearchProblem, ImpactMode, SearchConfig, SimulationParams};
pub use trajectory::{aim_point_height, StopReason, Trajectory, TrajectoryChannels, TrajectorySummary};

// Module declarations
pub mod angle_solver;
pub mod cli_api;
pub mod constants;
pub mod derivatives;
mod error;
pub mod integrator;
pub mod params;
pub mod sweep;
pub mod trajectory;
