//! Boss encounters.
//!
//! [`phase`] turns a boss agent's health ratio into monotonic phases and
//! applies the per-phase stat multipliers. [`BossOrchestrator`] owns the
//! singleton event around one boss: trigger gate, ability cooldowns,
//! distance despawn and rewards.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod abilities;
pub mod orchestrator;
pub mod phase;

pub use abilities::{AbilityBook, AbilitySpec, BossAbility};
pub use orchestrator::{
    BossConfig, BossOrchestrator, BossReward, BossStatus, BossTick, BossTrigger, RewardSink,
};
pub use phase::{BossPhaseState, PhaseProfile};
