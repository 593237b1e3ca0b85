//! Umbrella crate that re-exports the creature AI building blocks.
//!
//! The layers stack bottom-up: `core` (clock, RNG, ids, blackboard), `bt`
//! (resumable behavior trees), `nav` (movement contract), `group` (packs and
//! herds), `agent` (the creature itself), `species` (the roster), `boss`
//! (phases and the singleton event) and `sim` (a reference host).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use ai_core as core;

#[cfg(feature = "bt")]
#[cfg_attr(docsrs, doc(cfg(feature = "bt")))]
pub use ai_bt as bt;

#[cfg(feature = "nav")]
#[cfg_attr(docsrs, doc(cfg(feature = "nav")))]
pub use ai_nav as nav;

#[cfg(feature = "group")]
#[cfg_attr(docsrs, doc(cfg(feature = "group")))]
pub use ai_group as group;

#[cfg(feature = "agent")]
#[cfg_attr(docsrs, doc(cfg(feature = "agent")))]
pub use ai_agent as agent;

#[cfg(feature = "species")]
#[cfg_attr(docsrs, doc(cfg(feature = "species")))]
pub use ai_species as species;

#[cfg(feature = "boss")]
#[cfg_attr(docsrs, doc(cfg(feature = "boss")))]
pub use ai_boss as boss;

#[cfg(feature = "sim")]
#[cfg_attr(docsrs, doc(cfg(feature = "sim")))]
pub use ai_sim as sim;

/// The types most hosts touch.
#[cfg(feature = "species")]
#[cfg_attr(docsrs, doc(cfg(feature = "species")))]
pub mod prelude {
    pub use ai_agent::{
        Agent, AgentSnapshot, AgentState, DamageKind, EntityId, EntityInfo, Notification,
        Species, Vec2, World,
    };
    pub use ai_core::TickContext;
    pub use ai_species::{Spawner, SpawnerConfig};
}
