//! Scenario configuration, loaded from YAML.

use std::path::Path;

use ai_agent::{Rarity, Species, Vec2};
use ai_boss::BossConfig;
use ai_species::SpawnerConfig;
use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

/// Everything needed to build a [`Simulation`](crate::Simulation).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Scenario version, informational only
    pub version: Option<String>,

    /// Global seed; overrides `spawner.seed`
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Ticks per simulated second
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f32,

    /// Default run length in ticks
    #[serde(default = "default_ticks")]
    pub ticks: u64,

    /// Agent tuning, group tuning, elite chance, stat overrides
    #[serde(default)]
    pub spawner: SpawnerConfig,

    #[serde(default)]
    pub arena: ArenaConfig,

    #[serde(default)]
    pub spawns: Vec<SpawnSpec>,

    #[serde(default)]
    pub players: Vec<PlayerSpec>,

    #[serde(default)]
    pub boss: BossSection,
}

/// Terrain: bounds, optional pathing grid, rocks and water.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Half the side length of a square arena centred on the origin.
    /// Unbounded when unset.
    pub half_extent: Option<f32>,

    /// Cell size of an A* grid over the arena. Requires `half_extent`.
    pub grid_cell: Option<f32>,

    /// Line-of-sight blockers; also blocked on the grid
    pub rocks: Vec<CircleSpec>,

    pub water: Vec<CircleSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleSpec {
    pub center: Vec2,
    pub radius: f32,
}

/// Creatures placed at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnSpec {
    pub species: Species,
    pub position: Vec2,

    /// Social species spawn as one pack or herd
    #[serde(default = "default_count")]
    pub count: usize,

    /// Forces a rarity instead of rolling one
    #[serde(default)]
    pub rarity: Option<Rarity>,
}

/// A scripted player: walks at a constant velocity and auto-attacks the
/// nearest creature in reach.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub id: u64,
    pub position: Vec2,

    #[serde(default)]
    pub velocity: Vec2,

    #[serde(default = "default_player_health")]
    pub health: f32,

    /// Damage per second dealt to the nearest creature in reach
    #[serde(default)]
    pub dps: f32,

    #[serde(default = "default_player_reach")]
    pub attack_range: f32,

    #[serde(default = "default_player_noise")]
    pub noise_radius: f32,
}

/// Boss event rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BossSection {
    #[serde(flatten)]
    pub rules: BossConfig,

    #[serde(default = "default_boss_species")]
    pub species: Species,

    /// Where the event spawns the boss
    pub position: Vec2,

    /// Fires the explicit trigger once at this time, in seconds
    pub trigger_at: Option<f64>,

    /// Species created by the Summon ability
    #[serde(default = "default_summon_species")]
    pub summon_species: Species,
}

fn default_seed() -> u64 {
    42
}
fn default_tick_rate() -> f32 {
    10.0
}
fn default_ticks() -> u64 {
    600
}
fn default_count() -> usize {
    1
}
fn default_player_health() -> f32 {
    100.0
}
fn default_player_reach() -> f32 {
    2.5
}
fn default_player_noise() -> f32 {
    6.0
}
fn default_boss_species() -> Species {
    Species::Behemoth
}
fn default_summon_species() -> Species {
    Species::Wolf
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            version: None,
            seed: default_seed(),
            tick_rate: default_tick_rate(),
            ticks: default_ticks(),
            spawner: SpawnerConfig::default(),
            arena: ArenaConfig::default(),
            spawns: Vec::new(),
            players: Vec::new(),
            boss: BossSection::default(),
        }
    }
}

impl Default for BossSection {
    fn default() -> Self {
        Self {
            rules: BossConfig::default(),
            species: default_boss_species(),
            position: Vec2::ZERO,
            trigger_at: None,
            summon_species: default_summon_species(),
        }
    }
}

impl SimConfig {
    /// Load a scenario from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse scenario from {}", path.display()))?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the scheduler cannot run with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.tick_rate.is_finite() && self.tick_rate > 0.0,
            "tick_rate must be positive, got {}",
            self.tick_rate
        );
        if let Some(cell) = self.arena.grid_cell {
            ensure!(cell > 0.0, "arena.grid_cell must be positive, got {cell}");
            ensure!(
                self.arena.half_extent.is_some(),
                "arena.grid_cell needs arena.half_extent"
            );
        }
        if let Some(extent) = self.arena.half_extent {
            ensure!(extent > 0.0, "arena.half_extent must be positive, got {extent}");
        }
        ensure!(
            !self.boss.summon_species.is_boss(),
            "boss.summon_species cannot be a boss ({})",
            self.boss.summon_species
        );
        let mut ids: Vec<u64> = self.players.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        let total = ids.len();
        ids.dedup();
        ensure!(ids.len() == total, "player ids must be unique");
        Ok(())
    }

    /// Seconds per tick
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate
    }
}
