use crate::{NavPath, Navigator, Vec2};
use core::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Cell {
    x: i32,
    y: i32,
}

const STRAIGHT: u32 = 10;
const DIAGONAL: u32 = 14;
const NO_PARENT: usize = usize::MAX;

// Fixed expansion order keeps routes deterministic.
const STEPS: [(i32, i32); 8] = [
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

/// Uniform occupancy grid with 8-connected A* search.
///
/// Cell `(0, 0)` has its lower-left corner at `origin`, so a grid can cover a
/// map centred on the world origin.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavGrid {
    width: i32,
    height: i32,
    cell_size: f32,
    origin: Vec2,
    blocked: Vec<bool>,
}

impl NavGrid {
    pub fn new(width: u32, height: u32, cell_size: f32) -> Self {
        Self::with_origin(width, height, cell_size, Vec2::ZERO)
    }

    pub fn with_origin(width: u32, height: u32, cell_size: f32, origin: Vec2) -> Self {
        assert!(width > 0 && height > 0, "grid must be non-empty");
        assert!(cell_size > 0.0, "cell_size must be > 0");
        let width = width as i32;
        let height = height as i32;
        Self {
            width,
            height,
            cell_size,
            origin,
            blocked: vec![false; (width * height) as usize],
        }
    }

    /// Grid of `half_extent * 2` world units per side centred on the origin.
    pub fn centered(half_extent: f32, cell_size: f32) -> Self {
        let cells = ((half_extent * 2.0) / cell_size).ceil().max(1.0) as u32;
        Self::with_origin(cells, cells, cell_size, Vec2::new(-half_extent, -half_extent))
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Marks every cell whose centre lies within `radius` of `center`.
    pub fn block_circle(&mut self, center: Vec2, radius: f32) {
        let r2 = radius * radius;
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = Cell { x, y };
                if self.cell_center(cell).distance_squared(center) <= r2 {
                    self.set_blocked(x, y, true);
                }
            }
        }
    }

    /// Whether the world-space point falls in an open cell.
    pub fn is_walkable(&self, p: Vec2) -> bool {
        self.world_to_cell(p)
            .map(|c| !self.is_blocked(c.x, c.y))
            .unwrap_or(false)
    }

    pub fn set_blocked(&mut self, x: i32, y: i32, blocked: bool) {
        if let Some(idx) = self.idx(Cell { x, y }) {
            self.blocked[idx] = blocked;
        }
    }

    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.idx(Cell { x, y })
            .map(|idx| self.blocked[idx])
            .unwrap_or(true)
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    fn idx(&self, cell: Cell) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some((cell.y * self.width + cell.x) as usize)
    }

    fn world_to_cell(&self, p: Vec2) -> Option<Cell> {
        let x = ((p.x - self.origin.x) / self.cell_size).floor() as i32;
        let y = ((p.y - self.origin.y) / self.cell_size).floor() as i32;
        let cell = Cell { x, y };
        if self.in_bounds(cell) {
            Some(cell)
        } else {
            None
        }
    }

    fn cell_center(&self, cell: Cell) -> Vec2 {
        Vec2::new(
            self.origin.x + (cell.x as f32 + 0.5) * self.cell_size,
            self.origin.y + (cell.y as f32 + 0.5) * self.cell_size,
        )
    }

    /// Octile distance in tenths of a cell.
    fn heuristic(&self, a: Cell, b: Cell) -> u32 {
        let dx = (a.x - b.x).unsigned_abs();
        let dy = (a.y - b.y).unsigned_abs();
        STRAIGHT * dx.max(dy) + (DIAGONAL - STRAIGHT) * dx.min(dy)
    }

    /// Open neighbours with their step cost. Diagonals may not cut a blocked
    /// corner.
    fn successors(&self, cell: Cell, out: &mut Vec<(Cell, u32)>) {
        out.clear();
        for (dx, dy) in STEPS {
            let next = Cell {
                x: cell.x + dx,
                y: cell.y + dy,
            };
            if self.is_blocked(next.x, next.y) {
                continue;
            }
            let diagonal = dx != 0 && dy != 0;
            if diagonal
                && (self.is_blocked(cell.x + dx, cell.y) || self.is_blocked(cell.x, cell.y + dy))
            {
                continue;
            }
            out.push((next, if diagonal { DIAGONAL } else { STRAIGHT }));
        }
    }

    fn cell_from_idx(&self, idx: usize) -> Cell {
        let idx = idx as i32;
        Cell {
            x: idx % self.width,
            y: idx / self.width,
        }
    }

    fn search(&self, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
        let start_idx = self.idx(start)?;
        let goal_idx = self.idx(goal)?;
        if self.blocked[start_idx] || self.blocked[goal_idx] {
            return None;
        }

        let len = self.blocked.len();
        let mut cost = vec![u32::MAX; len];
        let mut parent = vec![NO_PARENT; len];
        let mut closed = vec![false; len];
        // (f, h, idx) popped smallest first; ties resolve on index.
        let mut open = BinaryHeap::new();
        let mut scratch = Vec::with_capacity(STEPS.len());

        cost[start_idx] = 0;
        open.push(Reverse((self.heuristic(start, goal), 0u32, start_idx)));

        while let Some(Reverse((_, _, idx))) = open.pop() {
            if idx == goal_idx {
                let mut cells = vec![goal];
                let mut at = idx;
                while parent[at] != NO_PARENT {
                    at = parent[at];
                    cells.push(self.cell_from_idx(at));
                }
                cells.reverse();
                return Some(cells);
            }
            if std::mem::replace(&mut closed[idx], true) {
                continue;
            }

            let cell = self.cell_from_idx(idx);
            self.successors(cell, &mut scratch);
            for &(next, step) in &scratch {
                let Some(next_idx) = self.idx(next) else {
                    continue;
                };
                let g = cost[idx].saturating_add(step);
                if closed[next_idx] || g >= cost[next_idx] {
                    continue;
                }
                cost[next_idx] = g;
                parent[next_idx] = idx;
                let h = self.heuristic(next, goal);
                open.push(Reverse((g.saturating_add(h), h, next_idx)));
            }
        }

        None
    }
}

impl Navigator for NavGrid {
    fn find_path(&self, start: Vec2, goal: Vec2) -> Option<NavPath> {
        let start_cell = self.world_to_cell(start)?;
        let goal_cell = self.world_to_cell(goal)?;
        let cells = self.search(start_cell, goal_cell)?;

        // Exact endpoints, cell centres in between.
        let inner_len = cells.len().saturating_sub(2);
        let mut points = Vec::with_capacity(cells.len().saturating_add(1));
        points.push(start);

        if cells.len() >= 2 {
            for cell in cells.into_iter().skip(1).take(inner_len) {
                points.push(self.cell_center(cell));
            }
        }

        points.push(goal);
        Some(NavPath::new(points))
    }

    fn nearest_point(&self, point: Vec2) -> Option<Vec2> {
        if self.is_walkable(point) {
            return Some(point);
        }
        (0..self.width * self.height)
            .map(|i| self.cell_from_idx(i as usize))
            .filter(|c| !self.is_blocked(c.x, c.y))
            .map(|c| self.cell_center(c))
            .min_by(|a, b| {
                a.distance_squared(point)
                    .partial_cmp(&b.distance_squared(point))
                    .unwrap_or(Ordering::Equal)
            })
    }
}
