//! Health-ratio driven boss phases.
//!
//! Phases are numbered from 1 and only ever advance: healing back above a
//! threshold does not undo a transition. A drop that crosses several
//! thresholds at once lands directly on the deepest phase and fires a single
//! transition.

use std::rc::Rc;

use ai_agent::{Agent, AgentState, DamageEffects, DamageKind, Notification, Strike, World};
use ai_core::BbKey;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const PHASE_STATE: BbKey<BossPhaseState> = BbKey::new(0x0b05_0001);
pub const ENRAGED_UNTIL: BbKey<f64> = BbKey::new(0x0b05_0002);
pub const PHASE_PROFILE: BbKey<Rc<PhaseProfile>> = BbKey::new(0x0b05_0003);

#[derive(Debug, Clone, PartialEq)]
pub struct BossPhaseState {
    thresholds: Vec<f32>,
    phase: u32,
}

impl BossPhaseState {
    /// `thresholds` are health fractions; values outside `(0, 1)` are dropped
    /// and the rest sorted descending.
    pub fn new(thresholds: impl IntoIterator<Item = f32>) -> Self {
        let mut thresholds: Vec<f32> = thresholds
            .into_iter()
            .filter(|t| *t > 0.0 && *t < 1.0)
            .collect();
        thresholds.sort_by(|a, b| b.total_cmp(a));
        thresholds.dedup();
        Self {
            thresholds,
            phase: 1,
        }
    }

    pub fn phase(&self) -> u32 {
        self.phase
    }

    pub fn phase_count(&self) -> u32 {
        self.thresholds.len() as u32 + 1
    }

    pub fn thresholds(&self) -> &[f32] {
        &self.thresholds
    }

    /// Feeds the current health ratio. Returns the new phase when a threshold
    /// was crossed for the first time.
    pub fn observe(&mut self, health_ratio: f32) -> Option<u32> {
        if health_ratio.is_nan() {
            return None;
        }
        let reached = 1 + self
            .thresholds
            .iter()
            .filter(|t| health_ratio <= **t)
            .count() as u32;
        if reached > self.phase {
            self.phase = reached;
            Some(reached)
        } else {
            None
        }
    }
}

/// Per-phase tuning. Multiplier lists are indexed by `phase - 1`; a phase past
/// the end of a list reuses its last entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhaseProfile {
    pub thresholds: Vec<f32>,
    pub damage: Vec<f32>,
    pub speed: Vec<f32>,
    pub cooldown: Vec<f32>,
    /// Seconds the boss stays enraged (immobile) after a transition.
    pub transition_seconds: f64,
    pub shockwave_radius: f32,
    pub shockwave_multiplier: f32,
    pub shockwave_knockback: f32,
}

impl Default for PhaseProfile {
    fn default() -> Self {
        Self {
            thresholds: vec![0.66, 0.33],
            damage: vec![1.0, 1.3, 1.7],
            speed: vec![1.0, 1.15, 1.3],
            cooldown: vec![1.0, 0.8, 0.6],
            transition_seconds: 1.5,
            shockwave_radius: 8.0,
            shockwave_multiplier: 0.5,
            shockwave_knockback: 5.0,
        }
    }
}

impl PhaseProfile {
    pub fn multipliers(&self, phase: u32) -> (f32, f32, f32) {
        let pick = |list: &[f32]| -> f32 {
            let index = (phase.max(1) - 1) as usize;
            list.get(index)
                .or_else(|| list.last())
                .copied()
                .unwrap_or(1.0)
        };
        (pick(&self.damage), pick(&self.speed), pick(&self.cooldown))
    }
}

/// Gives a boss its own phase tuning. Spawners call this before the first
/// update.
pub fn attach_profile(agent: &mut Agent, profile: Rc<PhaseProfile>) {
    agent.context_mut().species.set(PHASE_PROFILE, profile);
}

/// The profile attached to `agent`, or the default one.
pub fn profile_of(agent: &Agent) -> Rc<PhaseProfile> {
    agent
        .context()
        .species
        .get(PHASE_PROFILE)
        .cloned()
        .unwrap_or_default()
}

pub fn current_phase(agent: &Agent) -> u32 {
    agent
        .context()
        .species
        .get(PHASE_STATE)
        .map_or(1, BossPhaseState::phase)
}

/// Whether the boss is inside its post-transition enrage window.
pub fn is_enraged(agent: &Agent, now: f64) -> bool {
    agent
        .context()
        .species
        .get_copied(ENRAGED_UNTIL)
        .is_some_and(|until| now < until)
}

/// Observes the boss's health and runs a transition when a new phase begins:
/// live stats are rescaled, the boss enrages for `transition_seconds` and a
/// shockwave hits every nearby player.
pub fn track_phase(
    agent: &mut Agent,
    now: f64,
    world: &mut dyn World,
    profile: &PhaseProfile,
) -> Option<u32> {
    if !agent.is_alive() {
        return None;
    }
    let ratio = agent.health_fraction();
    let entered = agent
        .context_mut()
        .species
        .get_or_insert_with(PHASE_STATE, || {
            BossPhaseState::new(profile.thresholds.iter().copied())
        })
        .observe(ratio)?;

    let (damage, speed, cooldown) = profile.multipliers(entered);
    agent.stats_mut().set_multipliers(damage, speed, cooldown);

    agent
        .context_mut()
        .species
        .set(ENRAGED_UNTIL, now + profile.transition_seconds);
    agent.hold(world);
    agent.set_state(AgentState::Enraged);

    let origin = agent.position();
    let hit: Vec<_> = world
        .query_nearby(origin, profile.shockwave_radius)
        .into_iter()
        .filter(|e| e.alive && e.id.is_player())
        .collect();
    for info in &hit {
        let push = DamageEffects::knockback(info.position - origin, profile.shockwave_knockback);
        let strike = Strike::new(DamageKind::Area, profile.shockwave_multiplier).with_effects(push);
        agent.strike(world, info, strike);
    }

    tracing::info!(
        agent = agent.id(),
        phase = entered,
        health = ratio,
        shockwave_hits = hit.len(),
        "boss phase transition"
    );
    world.notify(Notification::PhaseChanged {
        agent: agent.id(),
        phase: entered,
    });
    Some(entered)
}
