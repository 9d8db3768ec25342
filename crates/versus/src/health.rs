use serde::Serialize;

/// One player's hit points, clamped to `0..=max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Health {
    current: u32,
    max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Subtract `amount`; returns whether the player is still alive
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.current = self.current.saturating_sub(amount);
        !self.is_defeated()
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    pub fn is_defeated(&self) -> bool {
        self.current == 0
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Remaining fraction in `0.0..=1.0`
    pub fn ratio(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }

    pub fn reset(&mut self) {
        self.current = self.max;
    }
}
