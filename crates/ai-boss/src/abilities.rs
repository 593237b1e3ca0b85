use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BossAbility {
    /// Area hit with knockback around the boss.
    Slam,
    /// Stuns nearby players.
    Roar,
    /// Calls minions next to the boss.
    Summon,
}

impl BossAbility {
    pub fn as_str(self) -> &'static str {
        match self {
            BossAbility::Slam => "slam",
            BossAbility::Roar => "roar",
            BossAbility::Summon => "summon",
        }
    }
}

impl fmt::Display for BossAbility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AbilitySpec {
    pub ability: BossAbility,
    pub cooldown: f64,
    /// First phase in which the ability may fire.
    pub min_phase: u32,
    /// Players must be inside this radius for the ability to fire.
    pub radius: f32,
    /// Damage factor for damaging abilities, stun seconds for Roar, minion
    /// count for Summon.
    pub power: f32,
}

impl AbilitySpec {
    pub fn new(ability: BossAbility, cooldown: f64, min_phase: u32, radius: f32, power: f32) -> Self {
        Self {
            ability,
            cooldown,
            min_phase,
            radius,
            power,
        }
    }
}

/// Cooldown gate over an ordered ability list.
///
/// List order is priority order; at most one ability fires per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AbilityBook {
    specs: Vec<AbilitySpec>,
    ready_at: Vec<f64>,
}

impl AbilityBook {
    /// Every ability becomes ready half a cooldown after `now`, so a fresh
    /// boss does not open with its whole book.
    pub fn new(specs: Vec<AbilitySpec>, now: f64) -> Self {
        let ready_at = specs.iter().map(|s| now + s.cooldown * 0.5).collect();
        Self { specs, ready_at }
    }

    pub fn default_specs() -> Vec<AbilitySpec> {
        vec![
            AbilitySpec::new(BossAbility::Slam, 8.0, 1, 6.0, 1.5),
            AbilitySpec::new(BossAbility::Roar, 15.0, 2, 15.0, 1.5),
            AbilitySpec::new(BossAbility::Summon, 25.0, 3, 30.0, 2.0),
        ]
    }

    pub fn specs(&self) -> &[AbilitySpec] {
        &self.specs
    }

    pub fn ready_at(&self, index: usize) -> Option<f64> {
        self.ready_at.get(index).copied()
    }

    pub fn is_ready(&self, index: usize, now: f64, phase: u32) -> bool {
        match (self.specs.get(index), self.ready_at.get(index)) {
            (Some(spec), Some(ready)) => phase >= spec.min_phase && now >= *ready,
            _ => false,
        }
    }

    /// Indices of abilities usable now, in priority order.
    pub fn ready(&self, now: f64, phase: u32) -> impl Iterator<Item = usize> + '_ {
        (0..self.specs.len()).filter(move |i| self.is_ready(*i, now, phase))
    }

    /// Starts the cooldown of ability `index`.
    pub fn fire(&mut self, index: usize, now: f64) -> Option<AbilitySpec> {
        let spec = *self.specs.get(index)?;
        self.ready_at[index] = now + spec.cooldown;
        Some(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldowns_and_phase_gate() {
        let mut book = AbilityBook::new(AbilityBook::default_specs(), 0.0);
        assert_eq!(book.ready(3.9, 3).count(), 0);
        assert_eq!(book.ready(4.0, 1).collect::<Vec<_>>(), vec![0]);
        assert_eq!(book.ready(20.0, 3).collect::<Vec<_>>(), vec![0, 1, 2]);

        assert_eq!(book.fire(0, 20.0).map(|s| s.ability), Some(BossAbility::Slam));
        assert!(!book.is_ready(0, 27.9, 3));
        assert!(book.is_ready(0, 28.0, 3));
        assert!(book.fire(7, 0.0).is_none());
    }

    #[test]
    fn fresh_book_waits_half_a_cooldown() {
        let spec = AbilitySpec::new(BossAbility::Roar, 10.0, 1, 15.0, 1.5);
        let book = AbilityBook::new(vec![spec], 100.0);
        assert_eq!(book.ready_at(0), Some(105.0));
        assert!(!book.is_ready(0, 104.9, 1));
        assert!(book.is_ready(0, 105.0, 1));
    }
}
