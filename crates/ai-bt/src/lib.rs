//! Resumable behavior tree engine built on `ai-core`.
//!
//! The engine is generic over an actor `A` and a world `W` and knows nothing
//! about either. Callers register their own leaves as closures or as
//! [`BtNode`] implementations.
//!
//! Composites here are *memory* composites: a child that returned
//! [`BtStatus::Running`] is resumed directly on the next tick without
//! re-evaluating earlier siblings.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod bt;
pub mod nodes;
pub mod tree;

pub use bt::{BtFault, BtNode, BtResult, BtStatus};
pub use nodes::{
    Action, Condition, Inverter, Parallel, RandomSelector, RepeatMode, Repeater, Selector,
    Sequence, Succeeder, TryCondition, UntilFail, Wait,
};
pub use tree::BehaviorTree;
