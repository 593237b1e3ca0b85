use ai_core::EntityId;
use ai_nav::{MovementExecutor, Vec2};

use crate::combat::{DamageEffects, DamageKind};
use crate::events::NotificationSink;

/// What perception reports about another entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityInfo {
    pub id: EntityId,
    pub position: Vec2,
    pub facing: Vec2,
    pub alive: bool,
    /// Radius at which this entity's movement can be heard.
    pub noise_radius: f32,
}

impl EntityInfo {
    pub fn new(id: EntityId, position: Vec2) -> Self {
        Self {
            id,
            position,
            facing: Vec2::X,
            alive: true,
            noise_radius: 8.0,
        }
    }
}

/// Detection queries answered by the host.
pub trait Perception {
    fn query_nearby(&self, center: Vec2, radius: f32) -> Vec<EntityInfo>;

    /// `true` when the segment `from -> to` is occluded. `ignore` is excluded
    /// from occluders.
    fn line_of_sight_blocked(&self, from: Vec2, to: Vec2, ignore: Option<EntityId>) -> bool;

    fn entity(&self, id: EntityId) -> Option<EntityInfo>;

    fn is_water(&self, _position: Vec2) -> bool {
        false
    }

    /// Closest known water point within `radius`.
    fn nearest_water(&self, _position: Vec2, _radius: f32) -> Option<Vec2> {
        None
    }
}

/// Damage application. The core never owns player health pools.
pub trait DamageSink {
    fn apply_damage(
        &mut self,
        source: EntityId,
        target: EntityId,
        amount: f32,
        kind: DamageKind,
        effects: DamageEffects,
    );
}

/// Everything an agent talks to during its update.
pub trait World: Perception + DamageSink + NotificationSink {
    fn movement(&mut self) -> &mut dyn MovementExecutor;

    fn movement_ref(&self) -> &dyn MovementExecutor;
}
