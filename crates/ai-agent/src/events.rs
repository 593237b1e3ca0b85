use ai_core::EntityId;
use ai_nav::Vec2;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::combat::DamageKind;
use crate::species::Species;
use crate::state::AgentState;

/// One-way typed events for presentation. Never awaited.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum Notification {
    Spawned {
        agent: u64,
        species: Species,
        position: Vec2,
    },
    StateChanged {
        agent: u64,
        from: AgentState,
        to: AgentState,
    },
    Attack {
        agent: u64,
        target: EntityId,
        damage: f32,
        kind: DamageKind,
    },
    Damaged {
        agent: u64,
        source: Option<EntityId>,
        amount: f32,
        health: f32,
    },
    Died {
        agent: u64,
        killer: Option<EntityId>,
    },
    Despawned {
        agent: u64,
    },
    WarningStarted {
        agent: u64,
        intruder: EntityId,
        until: f64,
    },
    PackAlert {
        group: u64,
        agent: u64,
        level: f32,
    },
    Stampede {
        group: u64,
        direction: Vec2,
        until: f64,
    },
    PhaseChanged {
        agent: u64,
        phase: u32,
    },
    AbilityUsed {
        agent: u64,
        ability: &'static str,
    },
    BossSpawned {
        agent: u64,
    },
    BossDefeated {
        agent: u64,
        rewarded: bool,
    },
    TreeFaulted {
        agent: u64,
        reason: String,
    },
}

impl Notification {
    pub fn agent(&self) -> Option<u64> {
        match self {
            Notification::Spawned { agent, .. }
            | Notification::StateChanged { agent, .. }
            | Notification::Attack { agent, .. }
            | Notification::Damaged { agent, .. }
            | Notification::Died { agent, .. }
            | Notification::Despawned { agent }
            | Notification::WarningStarted { agent, .. }
            | Notification::PackAlert { agent, .. }
            | Notification::PhaseChanged { agent, .. }
            | Notification::AbilityUsed { agent, .. }
            | Notification::BossSpawned { agent }
            | Notification::BossDefeated { agent, .. }
            | Notification::TreeFaulted { agent, .. } => Some(*agent),
            Notification::Stampede { .. } => None,
        }
    }
}

pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// Collects every notification in order.
#[derive(Debug, Default, Clone)]
pub struct VecNotificationSink {
    pub events: Vec<Notification>,
}

impl VecNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.events)
    }

    pub fn count(&self, pred: impl Fn(&Notification) -> bool) -> usize {
        self.events.iter().filter(|n| pred(n)).count()
    }
}

impl NotificationSink for VecNotificationSink {
    fn notify(&mut self, notification: Notification) {
        self.events.push(notification);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotificationSink;

impl NotificationSink for NullNotificationSink {
    fn notify(&mut self, _notification: Notification) {}
}
