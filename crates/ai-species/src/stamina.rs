//! Sprint stamina with hysteresis.
//!
//! Exhaustion starts when the pool hits `exhausted_at` and only ends once it
//! has refilled to `recovered_at`. Values in between keep whatever flag was
//! set last, so a creature hovering around the low mark never flickers
//! between sprinting and walking.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stamina {
    value: f32,
    max: f32,
    exhausted: bool,
    pub exhausted_at: f32,
    pub recovered_at: f32,
    /// Per second while not spending.
    pub regen_per_second: f32,
}

impl Stamina {
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self {
            value: max,
            max,
            exhausted: false,
            exhausted_at: 0.0,
            recovered_at: max * 0.5,
            regen_per_second: 12.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Sets the pool directly and re-evaluates the flag.
    pub fn set(&mut self, value: f32) {
        self.value = value.clamp(0.0, self.max);
        self.settle();
    }

    /// Spends `amount` if not exhausted. Returns `false` (and spends nothing)
    /// while exhausted.
    pub fn spend(&mut self, amount: f32) -> bool {
        if self.exhausted {
            return false;
        }
        self.set(self.value - amount.max(0.0));
        true
    }

    /// `true` if at least `amount` could be spent right now.
    pub fn can_afford(&self, amount: f32) -> bool {
        !self.exhausted && self.value >= amount
    }

    pub fn regen(&mut self, dt: f32) {
        self.set(self.value + self.regen_per_second * dt.max(0.0));
    }

    fn settle(&mut self) {
        if self.exhausted {
            if self.value >= self.recovered_at {
                self.exhausted = false;
            }
        } else if self.value <= self.exhausted_at {
            self.exhausted = true;
        }
    }
}

impl Default for Stamina {
    fn default() -> Self {
        Self::new(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oscillating_between_marks_keeps_the_flag() {
        let mut fresh = Stamina::new(100.0);
        let mut tired = Stamina::new(100.0);
        tired.set(0.0);
        assert!(tired.is_exhausted());

        for v in [10.0, 40.0, 10.0, 40.0, 25.0] {
            fresh.set(v);
            tired.set(v);
            assert!(!fresh.is_exhausted());
            assert!(tired.is_exhausted());
        }

        tired.set(50.0);
        assert!(!tired.is_exhausted());
        fresh.set(0.0);
        assert!(fresh.is_exhausted());
    }

    #[test]
    fn spending_is_refused_while_exhausted() {
        let mut s = Stamina::new(100.0);
        assert!(s.spend(100.0));
        assert!(s.is_exhausted());
        assert!(!s.spend(1.0));
        assert!(!s.can_afford(0.0));

        for _ in 0..50 {
            s.regen(0.1);
        }
        assert!(s.value() >= 50.0);
        assert!(!s.is_exhausted());
        assert!(s.can_afford(30.0));
    }
}
