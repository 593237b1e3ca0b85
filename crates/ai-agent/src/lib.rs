//! Creature agent model.
//!
//! An [`Agent`] owns its stats, perception cache, combat timers and an
//! optional behavior tree. Each tick the host calls [`Agent::update`] with a
//! [`World`] that bundles the external collaborators (perception, movement,
//! damage application, notifications). Species behaviour plugs in through a
//! [`SpeciesHooks`] table and leaf closures built with [`nodes`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod combat;
pub mod config;
pub mod context;
pub mod events;
pub mod hooks;
pub mod leaves;
pub mod nodes;
pub mod sandbox;
pub mod snapshot;
pub mod species;
pub mod state;
pub mod stats;
pub mod world;

pub use agent::Agent;
pub use combat::{DamageEffects, DamageKind, DamageStack, Strike};
pub use config::AgentTuning;
pub use context::DecisionContext;
pub use events::{Notification, NotificationSink, NullNotificationSink, VecNotificationSink};
pub use hooks::SpeciesHooks;
pub use nodes::{CreatureNode, CreatureTree};
pub use sandbox::{Circle, DamageRecord, SandboxWorld};
pub use snapshot::AgentSnapshot;
pub use species::Species;
pub use state::AgentState;
pub use stats::{AgentStats, BaseStats, Rarity, SpeedTier, StatOverrides};
pub use world::{DamageSink, EntityInfo, Perception, World};

pub use ai_core::EntityId;
pub use ai_nav::Vec2;
