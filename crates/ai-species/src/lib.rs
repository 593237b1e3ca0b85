//! The creature roster.
//!
//! Each species module owns its private blackboard state, its hook table and
//! its tree. [`Spawner`] puts them together into ready-to-run agents.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod bear;
pub mod behemoth;
pub mod bison;
pub mod boar;
pub mod crocodile;
pub mod profile;
pub mod spawner;
pub mod stamina;
pub mod stats;
pub mod tiger;
pub mod walrus;
pub mod wolf;

pub use profile::{build_tree, profile, SpeciesProfile};
pub use spawner::{Spawner, SpawnerConfig};
pub use stamina::Stamina;
pub use stats::base_stats;
