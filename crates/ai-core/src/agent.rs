use core::fmt::{self, Debug};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier for an agent.
///
/// Deterministic simulation requires:
/// - stable ordering (`Ord`)
/// - a stable numeric ID (`stable_id`) for seeding and logs
pub trait AgentId: Copy + Ord + Eq + Debug {
    fn stable_id(self) -> u64;
}

impl AgentId for u64 {
    fn stable_id(self) -> u64 {
        self
    }
}

impl AgentId for u32 {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

/// Anything a creature can perceive, target, or damage.
///
/// Players and creatures live in separate ID namespaces; the core never owns
/// player state, it only refers to players by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EntityId {
    Player(u64),
    Creature(u64),
}

impl EntityId {
    pub fn raw(self) -> u64 {
        match self {
            EntityId::Player(id) | EntityId::Creature(id) => id,
        }
    }

    pub fn is_player(self) -> bool {
        matches!(self, EntityId::Player(_))
    }

    pub fn is_creature(self) -> bool {
        matches!(self, EntityId::Creature(_))
    }
}

impl AgentId for EntityId {
    fn stable_id(self) -> u64 {
        match self {
            EntityId::Player(id) => id,
            EntityId::Creature(id) => id | (1 << 63),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Player(id) => write!(f, "player#{id}"),
            EntityId::Creature(id) => write!(f, "creature#{id}"),
        }
    }
}

/// Monotonic ID source scoped to whoever owns it (a spawner, a match, a test).
///
/// Two generators never share state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }

    /// The id the next call to [`IdGenerator::next_id`] will hand out.
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
