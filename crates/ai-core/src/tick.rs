use crate::{rng, AgentId, SplitMix64};

/// Clock handed to every decision made during one simulation step.
///
/// `now_seconds` is the simulation time at the start of the step; time-bounded
/// sub-states (charges, warnings, stampedes) compare captured end timestamps
/// against it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
    pub now_seconds: f64,
    pub seed: u64,
}

impl TickContext {
    pub fn new(tick: u64, dt_seconds: f32, now_seconds: f64, seed: u64) -> Self {
        Self {
            tick,
            dt_seconds,
            now_seconds,
            seed,
        }
    }

    /// Context for the step that follows this one.
    pub fn next(&self, dt_seconds: f32) -> Self {
        Self {
            tick: self.tick.wrapping_add(1),
            dt_seconds,
            now_seconds: self.now_seconds + dt_seconds as f64,
            seed: self.seed,
        }
    }

    pub fn rng_for_agent<A: AgentId>(&self, agent: A, stream: u64) -> SplitMix64 {
        let seed = rng::derive_seed(self.seed, agent.stable_id(), stream);
        SplitMix64::new(seed)
    }
}
