use std::collections::BTreeMap;

use crate::{NavPath, Navigator, Vec2};

/// Moves agent bodies toward destinations on the agent model's behalf.
///
/// Orders are fire-and-forget: the caller issues or refreshes a destination
/// each tick and polls [`MovementExecutor::is_moving`]. A destination may be
/// replaced at any time, including mid-path.
pub trait MovementExecutor {
    /// Issue or refresh a move order. Returns `false` when no route exists, in
    /// which case any previous order for `agent` is dropped.
    fn request_move(&mut self, agent: u64, from: Vec2, destination: Vec2, speed: f32) -> bool;

    fn is_moving(&self, agent: u64) -> bool;

    /// Steps the agent's active order by `dt` seconds starting at `position`.
    ///
    /// Returns the new position, or `None` when there is no active order.
    fn advance(&mut self, agent: u64, position: Vec2, dt: f32) -> Option<Vec2>;

    fn stop(&mut self, agent: u64);

    fn destination(&self, _agent: u64) -> Option<Vec2> {
        None
    }
}

#[derive(Debug, Clone)]
struct MoveOrder {
    destination: Vec2,
    speed: f32,
    path: NavPath,
    next_index: usize,
}

/// Reference executor that follows [`Navigator`] paths at constant speed.
#[derive(Debug, Clone)]
pub struct NavExecutor<N> {
    navigator: N,
    orders: BTreeMap<u64, MoveOrder>,
    arrival_distance: f32,
    retarget_tolerance: f32,
}

impl<N: Navigator> NavExecutor<N> {
    pub fn new(navigator: N) -> Self {
        Self {
            navigator,
            orders: BTreeMap::new(),
            arrival_distance: 0.05,
            retarget_tolerance: 0.25,
        }
    }

    pub fn with_arrival_distance(mut self, arrival_distance: f32) -> Self {
        self.arrival_distance = arrival_distance.max(0.0);
        self
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    pub fn active_orders(&self) -> usize {
        self.orders.len()
    }
}

impl<N: Navigator> MovementExecutor for NavExecutor<N> {
    fn request_move(&mut self, agent: u64, from: Vec2, destination: Vec2, speed: f32) -> bool {
        if let Some(order) = self.orders.get_mut(&agent) {
            if order.destination.distance(destination) <= self.retarget_tolerance {
                order.speed = speed;
                return true;
            }
        }

        match self.navigator.find_path(from, destination) {
            Some(path) if path.points.len() >= 2 => {
                self.orders.insert(
                    agent,
                    MoveOrder {
                        destination,
                        speed,
                        path,
                        next_index: 1,
                    },
                );
                true
            }
            _ => {
                self.orders.remove(&agent);
                false
            }
        }
    }

    fn is_moving(&self, agent: u64) -> bool {
        self.orders.contains_key(&agent)
    }

    fn advance(&mut self, agent: u64, position: Vec2, dt: f32) -> Option<Vec2> {
        let order = self.orders.get_mut(&agent)?;

        let mut remaining = order.speed.max(0.0) * dt.max(0.0);
        let mut current = position;
        while order.next_index < order.path.points.len() && remaining > 0.0 {
            let target = order.path.points[order.next_index];
            let to_target = target - current;
            let dist = to_target.length();

            if dist <= f32::EPSILON {
                order.next_index += 1;
                continue;
            }

            if remaining >= dist {
                current = target;
                order.next_index += 1;
                remaining -= dist;
                continue;
            }

            current = current + to_target * (remaining / dist);
            break;
        }

        let arrived = order.next_index >= order.path.points.len()
            || current.distance(order.destination) <= self.arrival_distance;
        if arrived {
            self.orders.remove(&agent);
        }
        Some(current)
    }

    fn stop(&mut self, agent: u64) {
        self.orders.remove(&agent);
    }

    fn destination(&self, agent: u64) -> Option<Vec2> {
        self.orders.get(&agent).map(|o| o.destination)
    }
}
