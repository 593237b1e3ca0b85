use ai_core::{EntityId, TickContext};
use ai_nav::Vec2;

use crate::agent::Agent;
use crate::world::{EntityInfo, World};

pub type SpawnHook = fn(&mut Agent);
pub type UpdateHook = fn(&mut Agent, &TickContext, &mut dyn World);
pub type DamagedHook = fn(&mut Agent, f64, f32, Option<EntityId>, &mut dyn World);
pub type DeathHook = fn(&mut Agent, f64, &mut dyn World);
pub type PatrolBiasHook = fn(&Agent, &dyn World, Vec2) -> Vec2;
pub type SpeedHook = fn(&Agent) -> f32;
pub type EnvironmentHook = fn(&Agent) -> f32;
pub type TargetBonusHook = fn(&Agent, &EntityInfo) -> f32;

/// Species override table. Every entry defaults to "no override".
///
/// The agent calls through this table at fixed points of its update, so the
/// full override surface of a species is visible in one struct.
#[derive(Clone, Copy, Default)]
pub struct SpeciesHooks {
    /// After construction, before the first update.
    pub on_spawn: Option<SpawnHook>,
    /// Every tick after perception refresh, before the tree runs.
    pub on_update: Option<UpdateHook>,
    /// After health was reduced, before death is resolved.
    pub on_damaged: Option<DamagedHook>,
    pub on_death: Option<DeathHook>,
    /// Adjusts a freshly picked wander point.
    pub patrol_bias: Option<PatrolBiasHook>,
    /// Multiplies every movement speed.
    pub speed_multiplier: Option<SpeedHook>,
    /// Environment stage of the damage stack.
    pub environment_bonus: Option<EnvironmentHook>,
    /// Target-state stage of the damage stack for ordinary melee.
    pub target_bonus: Option<TargetBonusHook>,
}

impl SpeciesHooks {
    pub fn none() -> Self {
        Self::default()
    }

    /// Names of the hooks this table overrides.
    pub fn overridden(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.on_spawn.is_some() {
            out.push("on_spawn");
        }
        if self.on_update.is_some() {
            out.push("on_update");
        }
        if self.on_damaged.is_some() {
            out.push("on_damaged");
        }
        if self.on_death.is_some() {
            out.push("on_death");
        }
        if self.patrol_bias.is_some() {
            out.push("patrol_bias");
        }
        if self.speed_multiplier.is_some() {
            out.push("speed_multiplier");
        }
        if self.environment_bonus.is_some() {
            out.push("environment_bonus");
        }
        if self.target_bonus.is_some() {
            out.push("target_bonus");
        }
        out
    }
}

impl core::fmt::Debug for SpeciesHooks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SpeciesHooks")
            .field("overridden", &self.overridden())
            .finish()
    }
}
