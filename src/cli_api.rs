// CLI API module - output formats and text rendering for the command-line tool
use serde::Serialize;

use crate::angle_solver::AngleSolution;
use crate::constants::{HOST_DISPLAY_POINTS, RADIANS_TO_DEGREES};
use crate::derivatives::ProjectileState;
use crate::error::BallisticsError;
use crate::params::AngleSearchProblem;
use crate::sweep::{AngleSample, TimeStepSample};
use crate::trajectory::{aim_point_height, Trajectory, TrajectorySummary};

/// Rows shown in the table view when neither `full` nor a point count is given
const TABLE_ROWS: usize = 11;

// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Serialize)]
struct TrajectoryReport<'a> {
    summary: TrajectorySummary,
    points: &'a [ProjectileState],
}

#[derive(Debug, Serialize)]
struct SolutionReport<'a> {
    problem: &'a AngleSearchProblem,
    solution: &'a AngleSolution,
    angle_deg: Option<f64>,
    aim_point_height: Option<f64>,
    trajectory: Option<TrajectoryReport<'a>>,
}

/// Which states to print: all of them, `points` evenly spaced ones, or a
/// short overview
fn select_points(traj: &Trajectory, full: bool, points: Option<usize>) -> Vec<ProjectileState> {
    if full {
        traj.states().to_vec()
    } else {
        traj.decimate(points.unwrap_or(TABLE_ROWS))
    }
}

pub fn render_trajectory(
    traj: &Trajectory,
    format: OutputFormat,
    full: bool,
    points: Option<usize>,
) -> Result<String, BallisticsError> {
    let selected = select_points(traj, full, points);
    let summary = traj.summary();

    let out = match format {
        OutputFormat::Json => {
            let report = TrajectoryReport {
                summary,
                points: &selected,
            };
            serde_json::to_string_pretty(&report)?
        }
        OutputFormat::Csv => csv_points(&selected),
        OutputFormat::Table => {
            let mut out = summary_table(&summary);
            out.push('\n');
            out.push_str(&points_table(&selected));
            out
        }
    };
    Ok(out)
}

pub fn render_solution(
    problem: &AngleSearchProblem,
    solution: &AngleSolution,
    trajectory: Option<&Trajectory>,
    format: OutputFormat,
) -> Result<String, BallisticsError> {
    let angle_deg = solution.angle().map(|a| a * RADIANS_TO_DEGREES);
    let aim_height = solution
        .angle()
        .map(|a| aim_point_height(a, problem.target_distance));
    // JSON carries the drawn path; the table keeps to an overview
    let display_points = match format {
        OutputFormat::Json => HOST_DISPLAY_POINTS,
        _ => TABLE_ROWS,
    };
    let selected = trajectory.map(|t| select_points(t, false, Some(display_points)));

    let out = match format {
        OutputFormat::Json => {
            let report = SolutionReport {
                problem,
                solution,
                angle_deg,
                aim_point_height: aim_height,
                trajectory: match (trajectory, selected.as_deref()) {
                    (Some(t), Some(points)) => Some(TrajectoryReport {
                        summary: t.summary(),
                        points,
                    }),
                    _ => None,
                },
            };
            serde_json::to_string_pretty(&report)?
        }
        OutputFormat::Csv => {
            let mut out = String::from("status,angle_rad,angle_deg,iterations,error_m,aim_height_m,max_reach_m\n");
            match solution {
                AngleSolution::Converged(r) => out.push_str(&format!(
                    "converged,{:.9},{:.6},{},{:.6},{:.4},\n",
                    r.angle_rad,
                    r.angle_deg(),
                    r.iterations_used,
                    r.final_error,
                    aim_height.unwrap_or_default()
                )),
                AngleSolution::Unreachable { max_reach } => out.push_str(&format!(
                    "unreachable,{:.9},{:.6},,,,{:.4}\n",
                    solution.fallback_angle(),
                    solution.fallback_angle() * RADIANS_TO_DEGREES,
                    max_reach
                )),
            }
            out
        }
        OutputFormat::Table => {
            let mut out = String::new();
            out.push_str("╔════════════════════════════════════════╗\n");
            out.push_str("║         LAUNCH ANGLE SOLUTION          ║\n");
            out.push_str("╠════════════════════════════════════════╣\n");
            out.push_str(&format!("║ Target Distance:   {:>8.2} m          ║\n", problem.target_distance));
            out.push_str(&format!("║ Launch Speed:      {:>8.2} m/s        ║\n", problem.initial_speed));
            out.push_str(&format!("║ Drag Coefficient:  {:>10.7}         ║\n", problem.drag_coefficient));
            out.push_str("╠════════════════════════════════════════╣\n");
            match solution {
                AngleSolution::Converged(r) => {
                    out.push_str(&format!("║ Launch Angle:      {:>8.4} deg        ║\n", r.angle_deg()));
                    out.push_str(&format!("║ Launch Angle:      {:>8.6} rad        ║\n", r.angle_rad));
                    out.push_str(&format!("║ Iterations:        {:>8}            ║\n", r.iterations_used));
                    out.push_str(&format!("║ Miss Distance:     {:>8.4} m          ║\n", r.final_error));
                    out.push_str(&format!(
                        "║ Aim Point Height:  {:>8.3} m          ║\n",
                        aim_height.unwrap_or_default()
                    ));
                }
                AngleSolution::Unreachable { max_reach } => {
                    out.push_str("║ Target UNREACHABLE                     ║\n");
                    out.push_str(&format!("║ Best Reach:        {:>8.2} m          ║\n", max_reach));
                }
            }
            out.push_str("╚════════════════════════════════════════╝\n");
            if let Some(points) = &selected {
                out.push('\n');
                out.push_str(&points_table(points));
            }
            out
        }
    };
    Ok(out)
}

pub fn render_angle_sweep(samples: &[AngleSample], format: OutputFormat) -> Result<String, BallisticsError> {
    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(samples)?,
        OutputFormat::Csv => {
            let mut out = String::from("angle_deg,final_x,max_height,time_of_flight\n");
            for s in samples {
                out.push_str(&format!(
                    "{:.4},{:.4},{:.4},{:.4}\n",
                    s.angle_rad * RADIANS_TO_DEGREES,
                    s.final_x,
                    s.max_height,
                    s.time_of_flight
                ));
            }
            out
        }
        OutputFormat::Table => {
            let mut out = String::new();
            out.push_str("┌──────────┬──────────┬──────────┬──────────┐\n");
            out.push_str("│ Angle(°) │ Range(m) │ Apex (m) │ ToF (s)  │\n");
            out.push_str("├──────────┼──────────┼──────────┼──────────┤\n");
            for s in samples {
                out.push_str(&format!(
                    "│ {:>8.2} │ {:>8.2} │ {:>8.2} │ {:>8.3} │\n",
                    s.angle_rad * RADIANS_TO_DEGREES,
                    s.final_x,
                    s.max_height,
                    s.time_of_flight
                ));
            }
            out.push_str("└──────────┴──────────┴──────────┴──────────┘\n");
            out
        }
    };
    Ok(out)
}

pub fn render_time_step_sweep(samples: &[TimeStepSample], format: OutputFormat) -> Result<String, BallisticsError> {
    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(samples)?,
        OutputFormat::Csv => {
            let mut out = String::from("time_step,final_x,points\n");
            for s in samples {
                out.push_str(&format!("{:e},{:.6},{}\n", s.time_step, s.final_x, s.points));
            }
            out
        }
        OutputFormat::Table => {
            let mut out = String::new();
            out.push_str("┌────────────┬────────────┬──────────┐\n");
            out.push_str("│   dt (s)   │  Range (m) │  Points  │\n");
            out.push_str("├────────────┼────────────┼──────────┤\n");
            for s in samples {
                out.push_str(&format!(
                    "│ {:>10.3e} │ {:>10.4} │ {:>8} │\n",
                    s.time_step, s.final_x, s.points
                ));
            }
            out.push_str("└────────────┴────────────┴──────────┘\n");
            out
        }
    };
    Ok(out)
}

fn summary_table(summary: &TrajectorySummary) -> String {
    let stop = match summary.stop_reason {
        Some(crate::trajectory::StopReason::Ground) => "ground",
        Some(crate::trajectory::StopReason::Distance) => "distance",
        None => "none",
    };
    let mut out = String::new();
    out.push_str("╔════════════════════════════════════════╗\n");
    out.push_str("║         TRAJECTORY RESULTS             ║\n");
    out.push_str("╠════════════════════════════════════════╣\n");
    out.push_str(&format!("║ Final Range:       {:>8.2} m          ║\n", summary.final_range));
    out.push_str(&format!("║ Max Height:        {:>8.2} m          ║\n", summary.max_height));
    out.push_str(&format!("║ Time of Flight:    {:>8.3} s          ║\n", summary.time_of_flight));
    out.push_str(&format!("║ Impact Speed:      {:>8.2} m/s        ║\n", summary.impact_speed));
    out.push_str(&format!(
        "║ Impact Angle:      {:>8.2} deg        ║\n",
        summary.impact_heading * RADIANS_TO_DEGREES
    ));
    out.push_str(&format!("║ Points:            {:>8}            ║\n", summary.points));
    out.push_str(&format!("║ Stopped By:        {:>8}            ║\n", stop));
    out.push_str("╚════════════════════════════════════════╝\n");
    out
}

fn points_table(points: &[ProjectileState]) -> String {
    let mut out = String::new();
    out.push_str("┌──────────┬──────────┬──────────┬──────────┬──────────┐\n");
    out.push_str("│ Time (s) │  X (m)   │  Y (m)   │ Vel(m/s) │ Angle(°) │\n");
    out.push_str("├──────────┼──────────┼──────────┼──────────┼──────────┤\n");
    for p in points {
        out.push_str(&format!(
            "│ {:>8.4} │ {:>8.3} │ {:>8.3} │ {:>8.3} │ {:>8.3} │\n",
            p.t,
            p.x,
            p.y,
            p.speed,
            p.heading_degrees()
        ));
    }
    out.push_str("└──────────┴──────────┴──────────┴──────────┴──────────┘\n");
    out
}

fn csv_points(points: &[ProjectileState]) -> String {
    let mut out = String::from("time,speed,heading,x,y\n");
    for p in points {
        out.push_str(&format!(
            "{:.6},{:.6},{:.8},{:.6},{:.6}\n",
            p.t, p.speed, p.heading, p.x, p.y
        ));
    }
    out
}
