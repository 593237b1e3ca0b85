#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Species-independent agent tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentTuning {
    /// Seconds a corpse stays before removal.
    pub removal_delay: f64,
    /// Wander points are picked within this radius of home.
    pub wander_radius: f32,
    pub wander_interval_min: f64,
    pub wander_interval_max: f64,
    pub arrival_distance: f32,
    /// Alert gained per second while a hostile is perceived.
    pub alert_gain_per_second: f32,
    pub alert_decay_per_second: f32,
    /// Alert added when hit.
    pub alert_on_hit: f32,
    /// Alert at which an agent counts as alerted.
    pub alert_threshold: f32,
    /// Chasing farther than `territory_radius * leash_factor` from home gives up.
    pub leash_factor: f32,
}

impl Default for AgentTuning {
    fn default() -> Self {
        Self {
            removal_delay: 5.0,
            wander_radius: 8.0,
            wander_interval_min: 3.0,
            wander_interval_max: 8.0,
            arrival_distance: 0.5,
            alert_gain_per_second: 60.0,
            alert_decay_per_second: 10.0,
            alert_on_hit: 100.0,
            alert_threshold: 30.0,
            leash_factor: 2.0,
        }
    }
}
