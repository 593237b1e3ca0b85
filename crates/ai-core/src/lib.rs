//! Deterministic kernel primitives shared by every creature-AI crate.
//!
//! Nothing in here knows about creatures, trees, or groups. It provides the
//! per-tick clock ([`TickContext`]), seedable randomness ([`SplitMix64`]),
//! identity ([`EntityId`], [`IdGenerator`]) and a typed scratch space
//! ([`Blackboard`]).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod blackboard;
pub mod rng;
pub mod tick;

pub use agent::{AgentId, EntityId, IdGenerator};
pub use blackboard::{BbKey, Blackboard};
pub use rng::{derive_seed, DeterministicRng, SplitMix64};
pub use tick::TickContext;
