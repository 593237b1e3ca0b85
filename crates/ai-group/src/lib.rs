//! Pack and herd coordination.
//!
//! One [`GroupState`] is shared by every member of a group through a
//! [`GroupHandle`]. The handle is `Rc<RefCell<_>>`: single-threaded and
//! `!Send`, so agents sharing a group can only be updated one after another.
//! Mutation is last-writer-wins within a tick.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;

pub mod formation;
pub mod state;
pub mod tuning;

pub use formation::{flank_position, formation_slot, scout_position};
pub use state::{GroupKind, GroupMember, GroupRole, GroupState, Stampede};
pub use tuning::GroupTuning;

pub type GroupHandle = Rc<RefCell<GroupState>>;

pub fn shared(state: GroupState) -> GroupHandle {
    Rc::new(RefCell::new(state))
}
