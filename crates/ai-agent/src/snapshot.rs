use ai_nav::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::species::Species;
use crate::state::AgentState;

/// The only serialized view of an agent. Decision context and group
/// internals stay private.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentSnapshot {
    pub id: u64,
    pub species: Species,
    pub health: f32,
    pub max_health: f32,
    pub position: Vec2,
    pub facing: Vec2,
    pub state: AgentState,
    pub alive: bool,
}
