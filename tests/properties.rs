use trajectory_engine::constants::DEGREES_TO_RADIANS;
use trajectory_engine::{
    integrate, solve_angle, AngleSolution, BallisticsError, SimulationParams, StopReason, Trajectory,
};

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "actual={actual}, expected={expected}, tolerance={tolerance}"
    );
}

fn vacuum_range(speed: f64, angle_deg: f64, dt: f64) -> f64 {
    integrate(&SimulationParams::launch(speed, angle_deg * DEGREES_TO_RADIANS, dt, 0.0))
        .unwrap()
        .final_x()
}

fn rifle_shot() -> Trajectory {
    integrate(&SimulationParams::launch(183.0, 3.0 * DEGREES_TO_RADIANS, 0.0001, 0.00235)).unwrap()
}

#[test]
fn test_integration_is_deterministic() {
    let params = SimulationParams::launch(75.0, 0.35, 0.0002, 0.0003747);
    let a = integrate(&params).unwrap();
    let b = integrate(&params).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_time_advances_by_time_step() {
    let dt = 0.0002;
    let traj = integrate(&SimulationParams::launch(75.0, 0.35, dt, 0.0003747)).unwrap();
    for pair in traj.states().windows(2) {
        assert_close(pair[1].t - pair[0].t, dt, 1e-12);
    }
}

#[test]
fn test_stopping_correctness() {
    let params = SimulationParams::launch(60.0, 0.7, 0.001, 0.001).with_stop_distance(150.0);
    let traj = integrate(&params).unwrap();
    let (last, earlier) = traj.states().split_last().unwrap();

    assert!(last.x > 150.0 || last.y < 0.0);
    for state in earlier {
        assert!(state.x <= 150.0 && state.y >= 0.0);
    }
}

#[test]
fn test_drag_free_complementary_angles() {
    let dt = 0.0001;
    for angle in [15.0, 30.0, 40.0] {
        let low = vacuum_range(40.0, angle, dt);
        let high = vacuum_range(40.0, 90.0 - angle, dt);
        // Euler drift plus a one-step overshoot at each end
        assert_close(low, high, 0.01 * low);
    }
}

#[test]
fn test_drag_free_range_peaks_at_45_degrees() {
    let dt = 0.0001;
    let best = vacuum_range(40.0, 45.0, dt);
    for angle in [20.0, 35.0, 42.0, 48.0, 55.0, 70.0] {
        assert!(vacuum_range(40.0, angle, dt) < best, "range at {angle}° beat 45°");
    }
    // v²/g
    assert_close(best, 40.0 * 40.0 / 9.81, 0.5);
}

#[test]
fn test_drag_shortens_range() {
    let with_drag = integrate(&SimulationParams::launch(75.0, 0.5, 0.0002, 0.0003747)).unwrap();
    let vacuum = integrate(&SimulationParams::launch(75.0, 0.5, 0.0002, 0.0)).unwrap();
    assert!(with_drag.final_x() < vacuum.final_x());
}

#[test]
fn test_solver_round_trip() {
    for target in [10.0, 50.0, 100.0] {
        let solution = solve_angle(75.0, target, 0.0002, 0.0003747).unwrap();
        let angle = solution.angle().expect("target should be reachable");
        let traj = integrate(
            &SimulationParams::launch(75.0, angle, 0.0002, 0.0003747).with_stop_distance(target),
        )
        .unwrap();
        assert!((traj.final_x() - target).abs() < 0.1, "target {target}: {}", traj.final_x());
    }
}

#[test]
fn test_solver_round_trip_past_first_trial() {
    // (speed, target, dt, drag): short of the target at 10°, and a coarse step
    // that overshoots it by more than the tolerance
    for (speed, target, dt, drag) in [(75.0, 300.0, 0.0002, 0.0003747), (183.0, 150.0, 0.001, 0.00235)] {
        let solution = solve_angle(speed, target, dt, drag).unwrap();
        let result = match solution {
            AngleSolution::Converged(result) => result,
            other => panic!("target {target}: expected convergence, got {other:?}"),
        };
        assert!(result.iterations_used > 1, "target {target} converged on the first trial");

        let traj = integrate(&SimulationParams::launch(speed, result.angle_rad, dt, drag).with_stop_distance(target))
            .unwrap();
        assert!((traj.final_x() - target).abs() < 0.1, "target {target}: {}", traj.final_x());
        assert_eq!(traj.final_x(), result.final_x);
    }
}

#[test]
fn test_infeasible_target_returns_unreachable() {
    let solution = solve_angle(50.0, 10_000.0, 0.001, 0.01).unwrap();
    match solution {
        AngleSolution::Unreachable { max_reach } => assert!(max_reach < 10_000.0),
        other => panic!("expected unreachable, got {other:?}"),
    }
    assert_close(solution.fallback_angle(), 90.0 * DEGREES_TO_RADIANS, 1e-12);
}

#[test]
fn test_rifle_scenario() {
    let traj = rifle_shot();
    let first = traj.initial_state();
    assert_eq!(first.t, 0.0);
    assert_eq!(first.speed, 183.0);
    assert_close(first.heading, 0.05236, 1e-5);
    assert_eq!((first.x, first.y), (0.0, 0.0));

    let last = traj.final_state();
    assert!(last.y <= 0.0);
    assert!(last.x <= 10_000.0 + 183.0 * 0.0001);
    assert_eq!(traj.stop_reason(), Some(StopReason::Ground));
}

#[test]
fn test_single_state_trajectory_is_usable() {
    let params = SimulationParams::new(75.0, 0.2, 20_000.0, 0.0, 0.001, 0.0);
    let traj = integrate(&params).unwrap();
    assert_eq!(traj.len(), 1);
    assert_eq!(traj.decimate(100).len(), 1);
    assert_eq!(traj.stop_reason(), Some(StopReason::Distance));
    let summary = traj.summary();
    assert_eq!(summary.points, 1);
    assert_eq!(summary.final_range, 20_000.0);
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let bad_dt = integrate(&SimulationParams::launch(75.0, 0.2, 0.0, 0.0));
    assert!(matches!(bad_dt, Err(BallisticsError::InvalidParameter { .. })));

    let bad_drag = solve_angle(75.0, 50.0, 0.0002, -1.0);
    assert!(matches!(bad_drag, Err(BallisticsError::InvalidParameter { .. })));
}

#[test]
fn test_concurrent_solves_agree_with_serial() {
    let targets = [20.0, 40.0, 60.0, 80.0];
    let handles: Vec<_> = targets
        .iter()
        .map(|&t| std::thread::spawn(move || solve_angle(75.0, t, 0.0002, 0.0003747).unwrap()))
        .collect();
    for (handle, &target) in handles.into_iter().zip(&targets) {
        let threaded = handle.join().unwrap();
        let serial = solve_angle(75.0, target, 0.0002, 0.0003747).unwrap();
        assert_eq!(threaded, serial);
    }
}
