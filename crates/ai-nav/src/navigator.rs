use crate::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavPath {
    pub points: Vec<Vec2>,
}

impl NavPath {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn straight(start: Vec2, goal: Vec2) -> Self {
        Self::new(vec![start, goal])
    }

    pub fn length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

/// Path-search backend. Only the result is consumed; the algorithm is the
/// backend's business.
pub trait Navigator {
    fn find_path(&self, start: Vec2, goal: Vec2) -> Option<NavPath>;

    /// Project a point onto the nearest navigable position.
    ///
    /// Backends that don't support projection may return `None`.
    fn nearest_point(&self, _point: Vec2) -> Option<Vec2> {
        None
    }
}

/// Unobstructed plane, optionally bounded to a square around the origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OpenField {
    pub half_extent: Option<f32>,
}

impl OpenField {
    pub fn unbounded() -> Self {
        Self { half_extent: None }
    }

    pub fn bounded(half_extent: f32) -> Self {
        Self {
            half_extent: Some(half_extent.abs()),
        }
    }

    fn contains(&self, p: Vec2) -> bool {
        match self.half_extent {
            None => true,
            Some(h) => p.x.abs() <= h && p.y.abs() <= h,
        }
    }
}

impl Navigator for OpenField {
    fn find_path(&self, start: Vec2, goal: Vec2) -> Option<NavPath> {
        if !self.contains(goal) {
            return None;
        }
        Some(NavPath::straight(start, goal))
    }

    fn nearest_point(&self, point: Vec2) -> Option<Vec2> {
        Some(match self.half_extent {
            None => point,
            Some(h) => Vec2::new(point.x.clamp(-h, h), point.y.clamp(-h, h)),
        })
    }
}
