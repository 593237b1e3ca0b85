//! Reference host for the creature AI crates.
//!
//! [`Simulation`] owns every agent, a set of scripted players and the boss
//! orchestrator, and drives them one fixed tick at a time. Scenarios load
//! from YAML through [`SimConfig`]. Nothing here is needed to embed the AI in
//! a real game server; it exists for the CLI, benchmarks, and tests.

#![forbid(unsafe_code)]

pub mod config;
pub mod player;
pub mod rewards;
pub mod sim;

pub use config::{ArenaConfig, BossSection, CircleSpec, PlayerSpec, SimConfig, SpawnSpec};
pub use player::Player;
pub use rewards::RewardLedger;
pub use sim::{SimReport, Simulation};
