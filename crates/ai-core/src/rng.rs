/// Deterministic RNG helpers.
///
/// This is intentionally small and dependency-free. It is **not** cryptographic.
/// Every stochastic creature decision (wander target, role assignment, rarity
/// and ability rolls) draws from one of these so a fixed seed reproduces a run.

pub trait DeterministicRng {
    fn next_u64(&mut self) -> u64;

    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    /// Uniform in `[0, 1)`.
    fn next_f32_unit(&mut self) -> f32 {
        // 24 bits of mantissa
        let x = self.next_u32() >> 8;
        (x as f32) / ((1u32 << 24) as f32)
    }

    fn next_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }

    /// Uniform in `[min, max)`; returns `min` for an empty or inverted range.
    fn next_range_f32(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + (max - min) * self.next_f32_unit()
    }

    fn next_range_f64(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        min + (max - min) * (self.next_f32_unit() as f64)
    }

    /// Uniform index into a collection of `len` items. `len == 0` yields 0.
    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u64() % (len as u64)) as usize
    }

    /// `true` with probability `p` (clamped to `[0, 1]`).
    fn next_chance(&mut self, p: f32) -> bool {
        self.next_f32_unit() < p.clamp(0.0, 1.0)
    }
}

/// SplitMix64: good seeding RNG and small deterministic generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn step(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        mix64(self.state)
    }
}

impl DeterministicRng for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.step()
    }
}

pub fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

/// Derive an independent stream seed for `(agent, stream)` under a global seed.
pub fn derive_seed(global_seed: u64, agent_id: u64, stream: u64) -> u64 {
    let x = global_seed ^ mix64(agent_id.wrapping_add(0x9E3779B97F4A7C15)) ^ mix64(stream);
    mix64(x)
}
