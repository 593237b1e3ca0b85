//! Damage resolution.
//!
//! Every creature hit goes through [`DamageStack`], which fixes the order of
//! the multiplicative bonuses:
//!
//! 1. base damage (live stat, already scaled by boss phase)
//! 2. environment bonus (e.g. attacking from water)
//! 3. target-state bonus (flank/behind, ambush, charge)
//! 4. rarity multiplier
//! 5. clamp to `[0, 10 * base]`

use ai_nav::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DamageKind {
    Melee,
    Charge,
    Trample,
    Area,
    Ambush,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DamageEffects {
    /// Displacement applied to the target, in world units.
    pub knockback: Option<Vec2>,
    pub stun_seconds: f32,
}

impl DamageEffects {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn knockback(direction: Vec2, distance: f32) -> Self {
        Self {
            knockback: Some(direction.normalize_or_zero() * distance),
            stun_seconds: 0.0,
        }
    }

    pub fn with_stun(mut self, seconds: f32) -> Self {
        self.stun_seconds = seconds.max(0.0);
        self
    }
}

pub const MAX_DAMAGE_FACTOR: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageStack {
    pub base: f32,
    pub environment: f32,
    pub target_state: f32,
    pub rarity: f32,
}

impl DamageStack {
    pub fn new(base: f32) -> Self {
        Self {
            base,
            environment: 1.0,
            target_state: 1.0,
            rarity: 1.0,
        }
    }

    pub fn environment(mut self, factor: f32) -> Self {
        self.environment = factor;
        self
    }

    pub fn target_state(mut self, factor: f32) -> Self {
        self.target_state = factor;
        self
    }

    pub fn rarity(mut self, factor: f32) -> Self {
        self.rarity = factor;
        self
    }

    pub fn resolve(&self) -> f32 {
        let base = self.base.max(0.0);
        let raw = base * self.environment * self.target_state * self.rarity;
        if !raw.is_finite() {
            return 0.0;
        }
        raw.clamp(0.0, base * MAX_DAMAGE_FACTOR)
    }
}

/// One attack's parameters beyond the attacker's own stats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    pub kind: DamageKind,
    /// Target-state factor for this attack (maul vs swipe, charge, ambush).
    pub multiplier: f32,
    pub effects: DamageEffects,
    /// Overrides `attack_range` when set.
    pub reach: Option<f32>,
}

impl Strike {
    pub fn melee() -> Self {
        Self {
            kind: DamageKind::Melee,
            multiplier: 1.0,
            effects: DamageEffects::none(),
            reach: None,
        }
    }

    pub fn new(kind: DamageKind, multiplier: f32) -> Self {
        Self {
            kind,
            multiplier,
            ..Self::melee()
        }
    }

    pub fn with_effects(mut self, effects: DamageEffects) -> Self {
        self.effects = effects;
        self
    }

    pub fn with_reach(mut self, reach: f32) -> Self {
        self.reach = Some(reach);
        self
    }
}

impl Default for Strike {
    fn default() -> Self {
        Self::melee()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_multiplies_in_order_and_clamps() {
        let d = DamageStack::new(10.0)
            .environment(1.25)
            .target_state(1.5)
            .rarity(1.25)
            .resolve();
        assert!((d - 23.4375).abs() < 1e-4);

        let capped = DamageStack::new(10.0).target_state(50.0).resolve();
        assert_eq!(capped, 100.0);

        assert_eq!(DamageStack::new(10.0).environment(-1.0).resolve(), 0.0);
        assert_eq!(DamageStack::new(10.0).rarity(f32::NAN).resolve(), 0.0);
    }
}
