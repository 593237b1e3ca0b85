use std::collections::BTreeMap;

use ai_agent::EntityId;
use ai_boss::{BossReward, RewardSink};

/// Collects boss rewards and totals experience per killer.
#[derive(Debug, Default, Clone)]
pub struct RewardLedger {
    rewards: Vec<BossReward>,
    xp: BTreeMap<EntityId, u32>,
}

impl RewardLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rewards(&self) -> &[BossReward] {
        &self.rewards
    }

    pub fn xp_for(&self, killer: EntityId) -> u32 {
        self.xp.get(&killer).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }
}

impl RewardSink for RewardLedger {
    fn grant(&mut self, reward: BossReward) {
        if let Some(killer) = reward.killer {
            *self.xp.entry(killer).or_insert(0) += reward.xp;
        }
        self.rewards.push(reward);
    }
}
