use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Presentation-facing behaviour label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgentState {
    #[default]
    Idle,
    Patrol,
    Alert,
    Chase,
    Attack,
    Flee,
    Return,
    // species extensions
    Warning,
    Charge,
    Recover,
    Stalk,
    Swim,
    Stampede,
    Enraged,
    Dead,
}

impl AgentState {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentState::Idle => "idle",
            AgentState::Patrol => "patrol",
            AgentState::Alert => "alert",
            AgentState::Chase => "chase",
            AgentState::Attack => "attack",
            AgentState::Flee => "flee",
            AgentState::Return => "return",
            AgentState::Warning => "warning",
            AgentState::Charge => "charge",
            AgentState::Recover => "recover",
            AgentState::Stalk => "stalk",
            AgentState::Swim => "swim",
            AgentState::Stampede => "stampede",
            AgentState::Enraged => "enraged",
            AgentState::Dead => "dead",
        }
    }

    /// States in which the built-in wander routine may take over movement.
    pub fn is_peaceful(self) -> bool {
        matches!(
            self,
            AgentState::Idle | AgentState::Patrol | AgentState::Return | AgentState::Swim
        )
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
