use serde::{Deserialize, Serialize};

use crate::derivatives::ProjectileState;

/// Which bound ended an integration run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Passed the horizontal stop distance
    Distance,
    /// Dropped below the stop height
    Ground,
}

/// Ordered, immutable time series produced by one integration run.
///
/// Always holds at least the initial state. The last state is the first one
/// that violated a stop bound (or the initial state, if it already did).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    states: Vec<ProjectileState>,
    stop_height: f64,
    stop_distance: f64,
}

/// The five parallel channels of a trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryChannels {
    pub time: Vec<f64>,
    pub speed: Vec<f64>,
    pub heading: Vec<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Headline numbers for display and reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySummary {
    pub final_range: f64,
    pub max_height: f64,
    pub time_of_flight: f64,
    pub impact_speed: f64,
    pub impact_heading: f64,
    pub points: usize,
    pub stop_reason: Option<StopReason>,
}

impl Trajectory {
    pub(crate) fn from_states(states: Vec<ProjectileState>, stop_height: f64, stop_distance: f64) -> Self {
        debug_assert!(!states.is_empty());
        Self {
            states,
            stop_height,
            stop_distance,
        }
    }

    pub fn states(&self) -> &[ProjectileState] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Never true for a trajectory returned by the integrator
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn initial_state(&self) -> &ProjectileState {
        &self.states[0]
    }

    pub fn final_state(&self) -> &ProjectileState {
        &self.states[self.states.len() - 1]
    }

    pub fn final_x(&self) -> f64 {
        self.final_state().x
    }

    /// True when `state` lies outside the stop bounds of this run
    pub fn is_past_bounds(&self, state: &ProjectileState) -> bool {
        state.x > self.stop_distance || state.y < self.stop_height
    }

    /// Which bound the final state crossed; `None` only if the run was cut
    /// short without crossing one, which the integrator never does.
    pub fn stop_reason(&self) -> Option<StopReason> {
        let last = self.final_state();
        if last.x > self.stop_distance {
            Some(StopReason::Distance)
        } else if last.y < self.stop_height {
            Some(StopReason::Ground)
        } else {
            None
        }
    }

    pub fn max_height(&self) -> f64 {
        self.states.iter().fold(f64::NEG_INFINITY, |acc, s| acc.max(s.y))
    }

    pub fn time_of_flight(&self) -> f64 {
        self.final_state().t
    }

    pub fn channels(&self) -> TrajectoryChannels {
        TrajectoryChannels {
            time: self.states.iter().map(|s| s.t).collect(),
            speed: self.states.iter().map(|s| s.speed).collect(),
            heading: self.states.iter().map(|s| s.heading).collect(),
            x: self.states.iter().map(|s| s.x).collect(),
            y: self.states.iter().map(|s| s.y).collect(),
        }
    }

    pub fn summary(&self) -> TrajectorySummary {
        let last = self.final_state();
        TrajectorySummary {
            final_range: last.x,
            max_height: self.max_height(),
            time_of_flight: last.t,
            impact_speed: last.speed,
            impact_heading: last.heading,
            points: self.states.len(),
            stop_reason: self.stop_reason(),
        }
    }

    /// Indices of `count` states spread evenly from the first to the last,
    /// truncated towards zero. Asking for at least as many points as the
    /// trajectory holds returns every index.
    pub fn decimation_indices(&self, count: usize) -> Vec<usize> {
        let len = self.states.len();
        if count >= len {
            return (0..len).collect();
        }
        match count {
            0 => Vec::new(),
            1 => vec![0],
            _ => {
                let span = len - 1;
                let gaps = count - 1;
                (0..count).map(|i| i * span / gaps).collect()
            }
        }
    }

    /// Evenly spaced subset of states for drawing
    pub fn decimate(&self, count: usize) -> Vec<ProjectileState> {
        self.decimation_indices(count)
            .into_iter()
            .map(|i| self.states[i])
            .collect()
    }
}

/// Height of the line-of-sight aim marker above the target when launching
/// at `angle` radians toward a target `distance` meters away.
pub fn aim_point_height(angle: f64, distance: f64) -> f64 {
    angle.tan() * distance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_line(n: usize) -> Trajectory {
        let states = (0..n)
            .map(|i| ProjectileState::new(i as f64 * 0.1, 10.0, 0.0, i as f64, 5.0 - i as f64))
            .collect();
        Trajectory::from_states(states, 0.0, 10_000.0)
    }

    #[test]
    fn test_channels_are_parallel() {
        let traj = straight_line(7);
        let ch = traj.channels();
        assert_eq!(ch.time.len(), 7);
        assert_eq!(ch.speed.len(), 7);
        assert_eq!(ch.heading.len(), 7);
        assert_eq!(ch.x.len(), 7);
        assert_eq!(ch.y, vec![5.0, 4.0, 3.0, 2.0, 1.0, 0.0, -1.0]);
    }

    #[test]
    fn test_summary_of_ground_stop() {
        let traj = straight_line(7);
        let summary = traj.summary();
        assert_eq!(summary.final_range, 6.0);
        assert_eq!(summary.max_height, 5.0);
        assert_eq!(summary.points, 7);
        assert_eq!(summary.stop_reason, Some(StopReason::Ground));
    }

    #[test]
    fn test_decimation_matches_integer_linspace() {
        let traj = straight_line(11);
        assert_eq!(traj.decimation_indices(3), vec![0, 5, 10]);
        assert_eq!(traj.decimation_indices(4), vec![0, 3, 6, 10]);
        assert_eq!(traj.decimation_indices(1), vec![0]);
        assert!(traj.decimation_indices(0).is_empty());
    }

    #[test]
    fn test_decimation_keeps_endpoints() {
        let traj = straight_line(1000);
        let picked = traj.decimate(100);
        assert_eq!(picked.len(), 100);
        assert_eq!(picked[0], *traj.initial_state());
        assert_eq!(picked[99], *traj.final_state());
    }

    #[test]
    fn test_decimation_of_single_state() {
        let traj = straight_line(1);
        assert_eq!(traj.decimate(100).len(), 1);
        assert_eq!(traj.decimate(1).len(), 1);
    }

    #[test]
    fn test_aim_point_height() {
        assert!((aim_point_height(std::f64::consts::FRAC_PI_4, 50.0) - 50.0).abs() < 1e-9);
        assert_eq!(aim_point_height(0.0, 50.0), 0.0);
    }
}
