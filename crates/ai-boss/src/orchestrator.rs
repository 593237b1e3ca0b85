//! Singleton boss event.
//!
//! At most one boss is active at a time. While active, the orchestrator gates
//! the boss's abilities, despawns it once every live player has left the
//! arena radius and pays out rewards when it is killed. After either ending
//! the gate reopens, immediately unless a `rearm_delay` is configured.

use ai_agent::{
    Agent, DamageEffects, DamageKind, EntityId, EntityInfo, Notification, Species, Strike, Vec2,
    World,
};

use crate::abilities::{AbilityBook, AbilitySpec, BossAbility};
use crate::phase;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BossTrigger {
    /// Only [`BossOrchestrator::trigger`] starts an event.
    #[default]
    Explicit,
    /// Also starts automatically once enough players are alive.
    Population { min_players: usize },
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BossConfig {
    pub trigger: BossTrigger,
    /// The boss despawns, unrewarded, when no live player is this close.
    pub despawn_radius: f32,
    /// Seconds after an event ends before the next may start. Zero reopens
    /// the gate as soon as the boss is gone.
    pub rearm_delay: f64,
    pub abilities: Vec<AbilitySpec>,
    /// Knockback distance of Slam.
    pub slam_knockback: f32,
    /// Ring radius minions are placed on.
    pub summon_radius: f32,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            trigger: BossTrigger::Explicit,
            despawn_radius: 120.0,
            rearm_delay: 0.0,
            abilities: AbilityBook::default_specs(),
            slam_knockback: 3.0,
            summon_radius: 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossStatus {
    Dormant,
    Active { boss: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BossReward {
    pub boss: u64,
    pub species: Species,
    pub killer: Option<EntityId>,
    pub xp: u32,
    pub loot_tier: u8,
}

/// Receives boss kill rewards. Distance despawns never reach it.
pub trait RewardSink {
    fn grant(&mut self, reward: BossReward);
}

impl RewardSink for Vec<BossReward> {
    fn grant(&mut self, reward: BossReward) {
        self.push(reward);
    }
}

/// What one orchestrator tick did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BossTick {
    pub ability: Option<BossAbility>,
    /// Spawn points for minions the host should create.
    pub summons: Vec<Vec2>,
    pub defeated: bool,
    pub despawned: bool,
}

#[derive(Debug)]
struct ActiveBoss {
    id: u64,
    book: AbilityBook,
    phase: u32,
}

#[derive(Debug)]
pub struct BossOrchestrator {
    config: BossConfig,
    active: Option<ActiveBoss>,
    rearm_at: f64,
    started: u32,
    defeated: u32,
}

impl BossOrchestrator {
    pub fn new(config: BossConfig) -> Self {
        Self {
            config,
            active: None,
            rearm_at: f64::NEG_INFINITY,
            started: 0,
            defeated: 0,
        }
    }

    pub fn config(&self) -> &BossConfig {
        &self.config
    }

    pub fn status(&self) -> BossStatus {
        match &self.active {
            Some(a) => BossStatus::Active { boss: a.id },
            None => BossStatus::Dormant,
        }
    }

    pub fn active_boss(&self) -> Option<u64> {
        self.active.as_ref().map(|a| a.id)
    }

    pub fn is_gate_open(&self, now: f64) -> bool {
        self.active.is_none() && now >= self.rearm_at
    }

    /// Events started so far.
    pub fn started(&self) -> u32 {
        self.started
    }

    /// Events that ended in a kill.
    pub fn defeated(&self) -> u32 {
        self.defeated
    }

    /// Starts an event at `position` if the gate is open. `spawn` builds the
    /// boss; the returned agent must be handed to the host scheduler.
    ///
    /// Silently ignored while another boss is active.
    pub fn trigger<F>(
        &mut self,
        now: f64,
        position: Vec2,
        world: &mut dyn World,
        spawn: F,
    ) -> Option<Agent>
    where
        F: FnOnce(Vec2) -> Agent,
    {
        if !self.is_gate_open(now) {
            tracing::debug!(active = ?self.active_boss(), "boss trigger ignored");
            return None;
        }

        let boss = spawn(position);
        self.active = Some(ActiveBoss {
            id: boss.id(),
            book: AbilityBook::new(self.config.abilities.clone(), now),
            phase: phase::current_phase(&boss),
        });
        self.started += 1;

        tracing::info!(boss = boss.id(), species = %boss.species(), x = position.x, y = position.y, "boss event started");
        world.notify(Notification::BossSpawned { agent: boss.id() });
        Some(boss)
    }

    /// Population trigger. No-op unless configured with
    /// [`BossTrigger::Population`].
    pub fn observe_population<F>(
        &mut self,
        now: f64,
        live_players: usize,
        position: Vec2,
        world: &mut dyn World,
        spawn: F,
    ) -> Option<Agent>
    where
        F: FnOnce(Vec2) -> Agent,
    {
        match self.config.trigger {
            BossTrigger::Population { min_players } if live_players >= min_players.max(1) => {
                self.trigger(now, position, world, spawn)
            }
            _ => None,
        }
    }

    /// Drives the active event for one tick. `boss` must be the active boss.
    pub fn tick(
        &mut self,
        now: f64,
        boss: &mut Agent,
        world: &mut dyn World,
        rewards: &mut dyn RewardSink,
    ) -> BossTick {
        let mut out = BossTick::default();
        if self.active_boss() != Some(boss.id()) {
            return out;
        }

        if !boss.is_alive() {
            if boss.died_at().is_some() {
                self.finish_defeated(now, boss, world, rewards);
                out.defeated = true;
            } else {
                self.finish(now);
                out.despawned = true;
            }
            return out;
        }

        let nearby = live_players(&*world, boss.position(), self.config.despawn_radius);
        if nearby.is_empty() {
            tracing::info!(boss = boss.id(), "boss despawned, no players in range");
            boss.force_despawn(world);
            world.notify(Notification::BossDefeated {
                agent: boss.id(),
                rewarded: false,
            });
            self.finish(now);
            out.despawned = true;
            return out;
        }

        let current = phase::current_phase(boss);
        let Some(active) = self.active.as_mut() else {
            return out;
        };
        if current != active.phase {
            tracing::debug!(boss = boss.id(), from = active.phase, to = current, "boss phase observed");
            active.phase = current;
        }
        if phase::is_enraged(boss, now) {
            return out;
        }

        let candidates: Vec<usize> = active.book.ready(now, current).collect();
        for index in candidates {
            let Some(spec) = active.book.specs().get(index).copied() else {
                continue;
            };
            let targets: Vec<EntityInfo> = nearby
                .iter()
                .filter(|p| p.position.distance(boss.position()) <= spec.radius)
                .copied()
                .collect();
            if targets.is_empty() {
                continue;
            }
            active.book.fire(index, now);
            out.summons = execute(&self.config, spec, boss, world, &targets);
            out.ability = Some(spec.ability);
            tracing::debug!(boss = boss.id(), ability = %spec.ability, targets = targets.len(), "boss ability");
            world.notify(Notification::AbilityUsed {
                agent: boss.id(),
                ability: spec.ability.as_str(),
            });
            break;
        }
        out
    }

    /// The host lost track of the boss (removed without a final tick).
    pub fn abandon(&mut self, now: f64) {
        if self.active.is_some() {
            tracing::warn!(boss = ?self.active_boss(), "boss event abandoned");
            self.finish(now);
        }
    }

    fn finish_defeated(
        &mut self,
        now: f64,
        boss: &Agent,
        world: &mut dyn World,
        rewards: &mut dyn RewardSink,
    ) {
        let stats = boss.stats().base();
        let reward = BossReward {
            boss: boss.id(),
            species: boss.species(),
            killer: boss.killer(),
            xp: stats.xp_reward * boss.rarity().xp_multiplier(),
            loot_tier: stats.loot_tier,
        };
        tracing::info!(boss = boss.id(), killer = ?reward.killer, xp = reward.xp, "boss defeated");
        rewards.grant(reward);
        world.notify(Notification::BossDefeated {
            agent: boss.id(),
            rewarded: true,
        });
        self.defeated += 1;
        self.finish(now);
    }

    fn finish(&mut self, now: f64) {
        self.active = None;
        self.rearm_at = now + self.config.rearm_delay;
    }
}

fn execute(
    config: &BossConfig,
    spec: AbilitySpec,
    boss: &mut Agent,
    world: &mut dyn World,
    targets: &[EntityInfo],
) -> Vec<Vec2> {
    let origin = boss.position();
    match spec.ability {
        BossAbility::Slam => {
            for info in targets {
                let push = DamageEffects::knockback(info.position - origin, config.slam_knockback);
                let strike = Strike::new(DamageKind::Area, spec.power).with_effects(push);
                boss.strike(world, info, strike);
            }
            Vec::new()
        }
        BossAbility::Roar => {
            let stun = DamageEffects::none().with_stun(spec.power);
            for info in targets {
                world.apply_damage(boss.entity_id(), info.id, 0.0, DamageKind::Area, stun);
            }
            Vec::new()
        }
        BossAbility::Summon => {
            let count = spec.power.max(0.0).round() as usize;
            let radius = config.summon_radius;
            (0..count)
                .map(|i| {
                    let angle = core::f32::consts::TAU * i as f32 / count as f32;
                    origin + Vec2::from_angle(angle) * radius
                })
                .collect()
        }
    }
}

fn live_players(world: &dyn World, center: Vec2, radius: f32) -> Vec<EntityInfo> {
    world
        .query_nearby(center, radius)
        .into_iter()
        .filter(|e| e.alive && e.id.is_player())
        .collect()
}
