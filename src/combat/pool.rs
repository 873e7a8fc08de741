//! Bounded resource gauge (shield charge, mana, battery)

use crate::core::error::ActionFailure;

/// A counter clamped to `0..=max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePool {
    label: &'static str,
    current: u32,
    max: u32,
}

impl ResourcePool {
    /// A full pool
    pub fn full(label: &'static str, max: u32) -> Self {
        Self { label, current: max, max }
    }

    /// A pool at an explicit level (clamped to max)
    pub fn with_current(label: &'static str, current: u32, max: u32) -> Self {
        Self {
            label,
            current: current.min(max),
            max,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Pay `cost` in full or not at all
    pub fn spend(&mut self, cost: u32) -> Result<(), ActionFailure> {
        if cost > self.current {
            return Err(ActionFailure::InsufficientResource {
                resource: self.label,
                needed: cost,
                available: self.current,
            });
        }
        self.current -= cost;
        Ok(())
    }

    /// Add up to `amount`, capped at max. Returns what was actually gained.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - before
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }

    /// Take up to `amount` out of the pool. Returns what was actually taken.
    pub fn take(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.current);
        self.current -= taken;
        taken
    }

    /// Empty the pool, returning what it held
    pub fn drain(&mut self) -> u32 {
        std::mem::take(&mut self.current)
    }
}
