//! Agent construction.
//!
//! Ids, group ids and every per-agent seed come from the spawner, so two
//! spawners built from the same config hand out identical creatures.

use std::collections::BTreeMap;
use std::rc::Rc;

use ai_agent::{Agent, AgentTuning, Rarity, Species, StatOverrides, Vec2};
use ai_boss::phase::{self, PhaseProfile};
use ai_core::{derive_seed, DeterministicRng, IdGenerator, SplitMix64};
use ai_group::{shared, GroupHandle, GroupKind, GroupState, GroupTuning};

use crate::profile::{build_tree, profile};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const TREE_STREAM: u64 = 0x7ee5_0001;
const GROUP_STREAM: u64 = 0x6709_0001;
const RARITY_STREAM: u64 = 0x4a41_0001;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpawnerConfig {
    pub seed: u64,
    /// Chance that a non-boss spawn rolls Elite.
    pub elite_chance: f32,
    pub tuning: AgentTuning,
    pub group_tuning: GroupTuning,
    pub overrides: BTreeMap<Species, StatOverrides>,
    /// Spacing between group members at spawn.
    pub group_spacing: f32,
    /// Phase thresholds and multipliers handed to every boss.
    pub boss_phases: PhaseProfile,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            elite_chance: 0.05,
            tuning: AgentTuning::default(),
            group_tuning: GroupTuning::default(),
            overrides: BTreeMap::new(),
            group_spacing: 2.0,
            boss_phases: PhaseProfile::default(),
        }
    }
}

#[derive(Debug)]
pub struct Spawner {
    config: SpawnerConfig,
    ids: IdGenerator,
    group_ids: IdGenerator,
    rarity: SplitMix64,
    boss_phases: Rc<PhaseProfile>,
}

impl Spawner {
    pub fn new(config: SpawnerConfig) -> Self {
        let rarity = SplitMix64::new(derive_seed(config.seed, 0, RARITY_STREAM));
        let boss_phases = Rc::new(config.boss_phases.clone());
        Self {
            config,
            boss_phases,
            ids: IdGenerator::new(),
            group_ids: IdGenerator::new(),
            rarity,
        }
    }

    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    /// Id the next spawn will get.
    pub fn peek_id(&self) -> u64 {
        self.ids.peek()
    }

    /// One creature with a rolled rarity. Bosses are never Elite.
    pub fn spawn(&mut self, species: Species, position: Vec2) -> Agent {
        let rarity = if !species.is_boss() && self.rarity.next_chance(self.config.elite_chance) {
            Rarity::Elite
        } else {
            Rarity::Common
        };
        self.spawn_with_rarity(species, position, rarity)
    }

    pub fn spawn_with_rarity(&mut self, species: Species, position: Vec2, rarity: Rarity) -> Agent {
        let id = self.ids.next_id();
        let profile = profile(species);
        let mut stats = profile.stats;
        if let Some(overrides) = self.config.overrides.get(&species) {
            overrides.apply(&mut stats);
        }

        let mut agent = Agent::new(id, species, position, stats, self.config.tuning, self.config.seed)
            .with_hooks(profile.hooks)
            .with_rarity(rarity);
        agent.attach_tree(build_tree(species, derive_seed(self.config.seed, id, TREE_STREAM)));
        if species.is_boss() {
            phase::attach_profile(&mut agent, Rc::clone(&self.boss_phases));
        }
        agent.run_spawn_hook();

        tracing::debug!(agent = id, %species, ?rarity, x = position.x, y = position.y, "spawned");
        agent
    }

    /// Spawns `count` creatures around `center`. Social species are joined
    /// into a fresh pack or herd whose first member leads it.
    pub fn spawn_group(
        &mut self,
        species: Species,
        center: Vec2,
        count: usize,
    ) -> (Option<GroupHandle>, Vec<Agent>) {
        let group = profile(species).group.map(|kind| self.new_group(kind));
        let spacing = self.config.group_spacing;

        let agents = (0..count)
            .map(|i| {
                let position = if i == 0 {
                    center
                } else {
                    let angle = core::f32::consts::TAU * (i - 1) as f32 / (count - 1) as f32;
                    center + Vec2::from_angle(angle) * spacing
                };
                let mut agent = self.spawn(species, position);
                if let Some(g) = &group {
                    agent.join_group(g.clone());
                }
                agent
            })
            .collect();
        (group, agents)
    }

    pub fn spawn_pack(&mut self, center: Vec2, count: usize) -> (Option<GroupHandle>, Vec<Agent>) {
        self.spawn_group(Species::Wolf, center, count)
    }

    pub fn spawn_herd(&mut self, center: Vec2, count: usize) -> (Option<GroupHandle>, Vec<Agent>) {
        self.spawn_group(Species::Bison, center, count)
    }

    fn new_group(&mut self, kind: GroupKind) -> GroupHandle {
        let id = self.group_ids.next_id();
        let seed = derive_seed(self.config.seed, id, GROUP_STREAM);
        shared(GroupState::new(id, kind, seed, self.config.group_tuning))
    }
}
