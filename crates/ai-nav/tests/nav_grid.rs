use ai_nav::{NavGrid, Navigator, Vec2};

#[test]
fn nav_grid_finds_path_around_blockers() {
    let mut grid = NavGrid::new(5, 5, 1.0);

    // Block a vertical wall with a single gap.
    for y in 0..5 {
        if y == 2 {
            continue;
        }
        grid.set_blocked(2, y, true);
    }

    let start = Vec2::new(0.5, 0.5);
    let goal = Vec2::new(4.5, 4.5);
    let path = grid.find_path(start, goal).expect("path should exist");

    assert_eq!(path.points.first().copied(), Some(start));
    assert_eq!(path.points.last().copied(), Some(goal));
    assert!(path.points.iter().any(|p| *p == Vec2::new(2.5, 2.5)));
}

#[test]
fn nav_grid_is_deterministic_for_same_input() {
    let mut grid = NavGrid::new(10, 10, 1.0);
    for y in 0..10 {
        grid.set_blocked(5, y, true);
    }
    grid.set_blocked(5, 5, false);

    let start = Vec2::new(1.5, 1.5);
    let goal = Vec2::new(8.5, 8.5);

    let a = grid.find_path(start, goal).expect("path should exist");
    let b = grid.find_path(start, goal).expect("path should exist");

    assert_eq!(a.points, b.points);
}

#[test]
fn centered_grid_covers_negative_coordinates() {
    let mut grid = NavGrid::centered(10.0, 1.0);
    grid.block_circle(Vec2::ZERO, 2.0);

    assert!(!grid.is_walkable(Vec2::new(0.2, 0.2)));
    assert!(grid.is_walkable(Vec2::new(-8.0, -8.0)));

    let path = grid
        .find_path(Vec2::new(-6.0, 0.2), Vec2::new(6.0, 0.2))
        .expect("detour around the blocked disc");
    assert!(path.points.iter().all(|p| p.length() > 1.5 || *p == Vec2::new(-6.0, 0.2)));
}

#[test]
fn nearest_point_snaps_out_of_blocked_cells() {
    let mut grid = NavGrid::new(3, 1, 1.0);
    grid.set_blocked(1, 0, true);

    let snapped = grid.nearest_point(Vec2::new(1.4, 0.5)).expect("open cell");
    assert_eq!(snapped, Vec2::new(0.5, 0.5));
}

#[test]
fn blocked_goal_has_no_route() {
    let mut grid = NavGrid::new(4, 4, 1.0);
    grid.set_blocked(3, 3, true);
    assert!(grid.find_path(Vec2::new(0.5, 0.5), Vec2::new(3.5, 3.5)).is_none());
}

#[test]
fn open_ground_routes_diagonally() {
    let grid = NavGrid::new(6, 6, 1.0);
    let path = grid
        .find_path(Vec2::new(0.5, 0.5), Vec2::new(5.5, 5.5))
        .expect("open grid");
    // One point per cell on the diagonal, endpoints included.
    assert_eq!(path.points.len(), 6);
}

#[test]
fn diagonal_steps_never_cut_blocked_corners() {
    let mut grid = NavGrid::new(3, 3, 1.0);
    grid.set_blocked(1, 0, true);

    let path = grid
        .find_path(Vec2::new(0.5, 0.5), Vec2::new(2.5, 1.5))
        .expect("route above the block");
    assert!(path.points.contains(&Vec2::new(0.5, 1.5)));
    assert!(!path.points.contains(&Vec2::new(1.5, 0.5)));
}
