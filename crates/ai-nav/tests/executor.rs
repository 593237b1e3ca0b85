use ai_nav::{MovementExecutor, NavExecutor, NavGrid, OpenField, Vec2};

#[test]
fn follows_straight_route_at_constant_speed() {
    let mut exec = NavExecutor::new(OpenField::unbounded());
    assert!(exec.request_move(1, Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0));
    assert!(exec.is_moving(1));

    let mut pos = Vec2::ZERO;
    for _ in 0..4 {
        pos = exec.advance(1, pos, 0.5).expect("active order");
    }
    assert!((pos.x - 4.0).abs() < 1e-4);
    assert!(exec.is_moving(1));
}

#[test]
fn order_completes_on_arrival() {
    let mut exec = NavExecutor::new(OpenField::unbounded());
    exec.request_move(7, Vec2::ZERO, Vec2::new(1.0, 0.0), 10.0);

    let pos = exec.advance(7, Vec2::ZERO, 1.0).expect("active order");
    assert_eq!(pos, Vec2::new(1.0, 0.0));
    assert!(!exec.is_moving(7));
    assert_eq!(exec.advance(7, pos, 1.0), None);
}

#[test]
fn unreachable_destination_is_rejected_and_clears_order() {
    let mut exec = NavExecutor::new(OpenField::bounded(5.0));
    assert!(exec.request_move(2, Vec2::ZERO, Vec2::new(1.0, 1.0), 1.0));
    assert!(!exec.request_move(2, Vec2::ZERO, Vec2::new(50.0, 0.0), 1.0));
    assert!(!exec.is_moving(2));
}

#[test]
fn retargeting_mid_path_replaces_destination() {
    let mut exec = NavExecutor::new(OpenField::unbounded());
    exec.request_move(3, Vec2::ZERO, Vec2::new(10.0, 0.0), 1.0);
    let pos = exec.advance(3, Vec2::ZERO, 1.0).expect("moving");

    assert!(exec.request_move(3, pos, Vec2::new(1.0, 5.0), 1.0));
    assert_eq!(exec.destination(3), Some(Vec2::new(1.0, 5.0)));

    let next = exec.advance(3, pos, 1.0).expect("moving");
    assert!(next.y > 0.0);
}

#[test]
fn small_destination_drift_keeps_current_path() {
    let mut exec = NavExecutor::new(OpenField::unbounded());
    exec.request_move(4, Vec2::ZERO, Vec2::new(10.0, 0.0), 1.0);
    assert!(exec.request_move(4, Vec2::ZERO, Vec2::new(10.1, 0.0), 3.0));
    assert_eq!(exec.destination(4), Some(Vec2::new(10.0, 0.0)));

    let pos = exec.advance(4, Vec2::ZERO, 1.0).expect("moving");
    assert!((pos.x - 3.0).abs() < 1e-4);
}

#[test]
fn grid_backed_executor_routes_around_walls() {
    let mut grid = NavGrid::new(5, 5, 1.0);
    for y in 0..4 {
        grid.set_blocked(2, y, true);
    }
    let mut exec = NavExecutor::new(grid);
    let start = Vec2::new(0.5, 0.5);
    assert!(exec.request_move(9, start, Vec2::new(4.5, 0.5), 1.0));

    let mut pos = start;
    for _ in 0..40 {
        match exec.advance(9, pos, 0.5) {
            Some(p) => pos = p,
            None => break,
        }
    }
    assert_eq!(pos, Vec2::new(4.5, 0.5));
}
