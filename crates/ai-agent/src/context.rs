use ai_core::{Blackboard, EntityId};
use ai_nav::Vec2;

use crate::world::EntityInfo;

/// Per-agent scratch state the tree reads and writes. Persists across ticks;
/// never serialized.
#[derive(Default)]
pub struct DecisionContext {
    pub dt: f32,
    /// Current hostile focus. Clearing it cancels chase and attack branches.
    pub target: Option<EntityId>,
    pub last_known_target_position: Option<Vec2>,
    /// 0..=100.
    pub alert: f32,
    /// Last entity that hurt this agent.
    pub threat: Option<EntityId>,
    pub threat_position: Option<Vec2>,
    /// Nearest hostile noticed by the latest perception refresh.
    pub perceived: Option<EntityInfo>,
    /// Fresh lookup of `target` from the latest perception refresh.
    pub target_info: Option<EntityInfo>,
    pub species: Blackboard,
}

impl DecisionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise_alert(&mut self, amount: f32) {
        self.alert = (self.alert + amount).clamp(0.0, 100.0);
    }

    pub fn decay_alert(&mut self, amount: f32) {
        self.alert = (self.alert - amount).clamp(0.0, 100.0);
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    pub fn has_threat(&self) -> bool {
        self.threat.is_some()
    }
}

impl core::fmt::Debug for DecisionContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DecisionContext")
            .field("target", &self.target)
            .field("alert", &self.alert)
            .field("threat", &self.threat)
            .field("species_keys", &self.species.len())
            .finish()
    }
}
