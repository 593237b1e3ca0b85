//! Navigation primitives: 2D vector math, path backends, and the movement
//! executor contract consumed by the agent model.
//!
//! The decision core never searches paths itself; it asks a
//! [`MovementExecutor`] to move a body and only observes whether the body is
//! still progressing.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod executor;
pub mod grid;
pub mod math;
pub mod navigator;

pub use executor::{MovementExecutor, NavExecutor};
pub use grid::NavGrid;
pub use math::Vec2;
pub use navigator::{NavPath, Navigator, OpenField};
