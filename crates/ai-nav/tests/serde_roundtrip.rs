#![cfg(feature = "serde")]

use ai_nav::{NavGrid, Navigator, Vec2};

#[test]
fn nav_grid_roundtrips_via_serde() {
    let mut grid = NavGrid::centered(8.0, 1.0);
    grid.block_circle(Vec2::new(2.0, 0.0), 2.5);

    let json = serde_json::to_string(&grid).expect("serialize grid");
    let grid2: NavGrid = serde_json::from_str(&json).expect("deserialize grid");

    let start = Vec2::new(-6.0, 0.5);
    let goal = Vec2::new(6.0, 0.5);
    let path1 = grid.find_path(start, goal).expect("path");
    let path2 = grid2.find_path(start, goal).expect("path");
    assert_eq!(path1.points, path2.points);
    assert!(!grid2.is_walkable(Vec2::new(2.0, 0.0)));
}
