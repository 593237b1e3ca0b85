#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-species tuning values. Angles are in degrees, durations in seconds,
/// distances in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BaseStats {
    pub max_health: f32,
    pub damage: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub walk_speed: f32,
    pub run_speed: f32,
    pub sprint_speed: f32,
    pub vision_range: f32,
    pub vision_angle: f32,
    pub hearing_range: f32,
    pub aggro_range: f32,
    pub territory_radius: f32,
    /// Health fraction at or below which the creature prefers to flee.
    pub flee_health_fraction: f32,
    pub xp_reward: u32,
    pub loot_tier: u8,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            damage: 10.0,
            attack_range: 2.0,
            attack_cooldown: 1.5,
            walk_speed: 2.0,
            run_speed: 4.5,
            sprint_speed: 6.5,
            vision_range: 20.0,
            vision_angle: 120.0,
            hearing_range: 10.0,
            aggro_range: 12.0,
            territory_radius: 25.0,
            flee_health_fraction: 0.2,
            xp_reward: 10,
            loot_tier: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpeedTier {
    Walk,
    Run,
    Sprint,
}

impl BaseStats {
    pub fn speed(&self, tier: SpeedTier) -> f32 {
        match tier {
            SpeedTier::Walk => self.walk_speed,
            SpeedTier::Run => self.run_speed,
            SpeedTier::Sprint => self.sprint_speed,
        }
    }

    /// Largest radius at which this creature can notice anything.
    pub fn detection_radius(&self) -> f32 {
        self.vision_range.max(self.hearing_range).max(self.aggro_range)
    }
}

/// Optional per-field replacements, e.g. from a scenario file.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatOverrides {
    pub max_health: Option<f32>,
    pub damage: Option<f32>,
    pub attack_range: Option<f32>,
    pub attack_cooldown: Option<f32>,
    pub walk_speed: Option<f32>,
    pub run_speed: Option<f32>,
    pub sprint_speed: Option<f32>,
    pub vision_range: Option<f32>,
    pub vision_angle: Option<f32>,
    pub hearing_range: Option<f32>,
    pub aggro_range: Option<f32>,
    pub territory_radius: Option<f32>,
    pub flee_health_fraction: Option<f32>,
}

impl StatOverrides {
    pub fn apply(&self, base: &mut BaseStats) {
        macro_rules! set {
            ($($field:ident),*) => {
                $(if let Some(v) = self.$field { base.$field = v; })*
            };
        }
        set!(
            max_health,
            damage,
            attack_range,
            attack_cooldown,
            walk_speed,
            run_speed,
            sprint_speed,
            vision_range,
            vision_angle,
            hearing_range,
            aggro_range,
            territory_radius,
            flee_health_fraction
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rarity {
    #[default]
    Common,
    Elite,
}

impl Rarity {
    pub fn health_multiplier(self) -> f32 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Elite => 1.5,
        }
    }

    pub fn damage_multiplier(self) -> f32 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Elite => 1.25,
        }
    }

    pub fn xp_multiplier(self) -> u32 {
        match self {
            Rarity::Common => 1,
            Rarity::Elite => 2,
        }
    }
}

/// Base values plus the live values currently in effect.
///
/// `live` is recomputed from `base` by [`AgentStats::set_multipliers`], so
/// repeated phase or buff changes never compound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentStats {
    base: BaseStats,
    pub live: BaseStats,
    pub health: f32,
}

impl AgentStats {
    pub fn new(base: BaseStats) -> Self {
        Self {
            base,
            live: base,
            health: base.max_health,
        }
    }

    pub fn base(&self) -> &BaseStats {
        &self.base
    }

    pub fn max_health(&self) -> f32 {
        self.live.max_health
    }

    pub fn health_fraction(&self) -> f32 {
        if self.live.max_health <= 0.0 {
            0.0
        } else {
            (self.health / self.live.max_health).clamp(0.0, 1.0)
        }
    }

    /// Scales health capacity, keeping the current fraction.
    pub fn scale_max_health(&mut self, factor: f32) {
        let fraction = self.health_fraction();
        self.base.max_health *= factor;
        self.live.max_health = self.base.max_health;
        self.health = self.live.max_health * fraction;
    }

    pub fn set_multipliers(&mut self, damage: f32, speed: f32, cooldown: f32) {
        let b = self.base;
        self.live.damage = b.damage * damage;
        self.live.walk_speed = b.walk_speed * speed;
        self.live.run_speed = b.run_speed * speed;
        self.live.sprint_speed = b.sprint_speed * speed;
        self.live.attack_cooldown = b.attack_cooldown * cooldown;
    }
}
