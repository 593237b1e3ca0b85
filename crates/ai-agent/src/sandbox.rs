//! In-memory [`World`] used by the reference scheduler and by tests.
//!
//! Entities are stored in id order so every query is deterministic.
//! Occluders and water are plain circles.

use std::collections::BTreeMap;

use ai_core::EntityId;
use ai_nav::{MovementExecutor, NavExecutor, OpenField, Vec2};

use crate::combat::{DamageEffects, DamageKind};
use crate::events::{Notification, NotificationSink, VecNotificationSink};
use crate::world::{DamageSink, EntityInfo, Perception, World};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRecord {
    pub source: EntityId,
    pub target: EntityId,
    pub amount: f32,
    pub kind: DamageKind,
    pub effects: DamageEffects,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.center.distance_squared(p) <= self.radius * self.radius
    }

    /// Whether the segment `a -> b` passes through the circle.
    pub fn intersects_segment(&self, a: Vec2, b: Vec2) -> bool {
        let ab = b - a;
        let len2 = ab.length_squared();
        let t = if len2 <= f32::EPSILON {
            0.0
        } else {
            ((self.center - a).dot(ab) / len2).clamp(0.0, 1.0)
        };
        self.contains(a + ab * t)
    }
}

pub struct SandboxWorld {
    entities: BTreeMap<EntityId, EntityInfo>,
    occluders: Vec<Circle>,
    water: Vec<Circle>,
    movement: Box<dyn MovementExecutor>,
    damage: Vec<DamageRecord>,
    notifications: VecNotificationSink,
}

impl SandboxWorld {
    pub fn new(movement: Box<dyn MovementExecutor>) -> Self {
        Self {
            entities: BTreeMap::new(),
            occluders: Vec::new(),
            water: Vec::new(),
            movement,
            damage: Vec::new(),
            notifications: VecNotificationSink::new(),
        }
    }

    /// Unbounded plane with a straight-line executor.
    pub fn open_field() -> Self {
        Self::new(Box::new(NavExecutor::new(OpenField::unbounded())))
    }

    pub fn upsert(&mut self, info: EntityInfo) {
        self.entities.insert(info.id, info);
    }

    pub fn remove(&mut self, id: EntityId) -> Option<EntityInfo> {
        self.entities.remove(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut EntityInfo> {
        self.entities.get_mut(&id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityInfo> {
        self.entities.values()
    }

    pub fn add_occluder(&mut self, circle: Circle) {
        self.occluders.push(circle);
    }

    pub fn add_water(&mut self, circle: Circle) {
        self.water.push(circle);
    }

    pub fn water(&self) -> &[Circle] {
        &self.water
    }

    pub fn damage_log(&self) -> &[DamageRecord] {
        &self.damage
    }

    pub fn take_damage_log(&mut self) -> Vec<DamageRecord> {
        std::mem::take(&mut self.damage)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications.events
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }
}

impl Perception for SandboxWorld {
    fn query_nearby(&self, center: Vec2, radius: f32) -> Vec<EntityInfo> {
        let r2 = radius * radius;
        self.entities
            .values()
            .filter(|e| e.position.distance_squared(center) <= r2)
            .copied()
            .collect()
    }

    fn line_of_sight_blocked(&self, from: Vec2, to: Vec2, _ignore: Option<EntityId>) -> bool {
        self.occluders
            .iter()
            .any(|c| !c.contains(from) && !c.contains(to) && c.intersects_segment(from, to))
    }

    fn entity(&self, id: EntityId) -> Option<EntityInfo> {
        self.entities.get(&id).copied()
    }

    fn is_water(&self, position: Vec2) -> bool {
        self.water.iter().any(|w| w.contains(position))
    }

    fn nearest_water(&self, position: Vec2, radius: f32) -> Option<Vec2> {
        self.water
            .iter()
            .map(|w| {
                if w.contains(position) {
                    return position;
                }
                let dir = (position - w.center).normalize_or_zero();
                w.center + dir * (w.radius * 0.9)
            })
            .filter(|p| p.distance(position) <= radius)
            .min_by(|a, b| {
                a.distance_squared(position)
                    .total_cmp(&b.distance_squared(position))
            })
    }
}

impl DamageSink for SandboxWorld {
    fn apply_damage(
        &mut self,
        source: EntityId,
        target: EntityId,
        amount: f32,
        kind: DamageKind,
        effects: DamageEffects,
    ) {
        self.damage.push(DamageRecord {
            source,
            target,
            amount,
            kind,
            effects,
        });
    }
}

impl NotificationSink for SandboxWorld {
    fn notify(&mut self, notification: Notification) {
        self.notifications.notify(notification);
    }
}

impl World for SandboxWorld {
    fn movement(&mut self) -> &mut dyn MovementExecutor {
        self.movement.as_mut()
    }

    fn movement_ref(&self) -> &dyn MovementExecutor {
        self.movement.as_ref()
    }
}
