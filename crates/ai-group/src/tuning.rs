#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GroupTuning {
    /// Minimum seconds between two alert broadcasts.
    pub alert_broadcast_cooldown: f64,
    /// Alert added to the group level by one broadcast (0..=100 scale).
    pub alert_broadcast_boost: f32,
    /// Alert added when any member is hit by an identifiable source.
    pub alert_on_damage: f32,
    /// Group alert decay, per second.
    pub alert_decay_per_second: f32,
    pub retreat_duration: f64,
    pub stampede_duration: f64,
    /// Cumulative per-member threat at which a herd stampedes.
    pub stampede_threat_threshold: f32,
    /// Group alert level at which a herd stampedes.
    pub stampede_alert_threshold: f32,
    /// Lateral distance of flank positions from the target.
    pub flank_distance: f32,
    /// How far ahead of the leader scouts range.
    pub scout_lead: f32,
    pub formation_spacing: f32,
}

impl Default for GroupTuning {
    fn default() -> Self {
        Self {
            alert_broadcast_cooldown: 4.0,
            alert_broadcast_boost: 40.0,
            alert_on_damage: 60.0,
            alert_decay_per_second: 8.0,
            retreat_duration: 8.0,
            stampede_duration: 6.0,
            stampede_threat_threshold: 25.0,
            stampede_alert_threshold: 80.0,
            flank_distance: 3.5,
            scout_lead: 12.0,
            formation_spacing: 2.5,
        }
    }
}
