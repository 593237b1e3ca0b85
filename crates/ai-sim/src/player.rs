use ai_agent::{DamageEffects, EntityId, EntityInfo, Vec2};
use serde::Serialize;

use crate::config::PlayerSpec;

/// Host-side player state. Creatures only ever see the [`EntityInfo`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub id: u64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub dps: f32,
    pub attack_range: f32,
    pub noise_radius: f32,
    pub stunned_until: f64,
}

impl Player {
    pub fn from_spec(spec: &PlayerSpec) -> Self {
        let facing = match spec.velocity.normalize_or_zero() {
            v if v == Vec2::ZERO => Vec2::X,
            v => v,
        };
        Self {
            id: spec.id,
            position: spec.position,
            velocity: spec.velocity,
            facing,
            health: spec.health.max(0.0),
            max_health: spec.health.max(0.0),
            dps: spec.dps.max(0.0),
            attack_range: spec.attack_range,
            noise_radius: spec.noise_radius,
            stunned_until: f64::NEG_INFINITY,
        }
    }

    pub fn entity_id(&self) -> EntityId {
        EntityId::Player(self.id)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn is_stunned(&self, now: f64) -> bool {
        now < self.stunned_until
    }

    pub fn info(&self) -> EntityInfo {
        EntityInfo {
            id: self.entity_id(),
            position: self.position,
            facing: self.facing,
            alive: self.is_alive(),
            noise_radius: self.noise_radius,
        }
    }

    /// Walks along the scripted velocity unless dead or stunned.
    pub fn advance(&mut self, now: f64, dt: f32) {
        if !self.is_alive() || self.is_stunned(now) {
            return;
        }
        self.position += self.velocity * dt;
        let heading = self.velocity.normalize_or_zero();
        if heading != Vec2::ZERO {
            self.facing = heading;
        }
    }

    /// Applies a creature hit. Returns `true` if this hit killed the player.
    pub fn absorb(&mut self, now: f64, amount: f32, effects: DamageEffects) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = (self.health - amount.max(0.0)).max(0.0);
        if let Some(push) = effects.knockback {
            self.position += push;
        }
        if effects.stun_seconds > 0.0 {
            self.stunned_until = self.stunned_until.max(now + effects.stun_seconds as f64);
        }
        !self.is_alive()
    }
}
