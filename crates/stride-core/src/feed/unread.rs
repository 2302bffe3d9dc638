/// Process-scoped unread counter.
///
/// The loaded collection is usually a window, so this counts independently
/// of the `is_read` flags actually in memory. Local increments and
/// decrements are optimistic interpolation between server reconciliations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UnreadCount(u64);

impl UnreadCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn increment(&mut self) {
        self.0 += 1;
    }

    /// Decrement by `n`, flooring at zero. Optimistic decrements can
    /// overshoot when the window disagrees with the server; the floor keeps
    /// the display sane until the next reconcile.
    pub fn decrement_clamped(&mut self, n: u64) {
        self.0 = self.0.saturating_sub(n);
    }

    pub fn reset(&mut self, value: u64) {
        self.0 = value;
    }

    /// Unconditional overwrite with the authoritative server value.
    pub fn reconcile(&mut self, server_value: u64) {
        self.0 = server_value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decrement_floors_at_zero() {
        let mut count = UnreadCount::new();
        count.increment();
        count.decrement_clamped(5);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn reconcile_overwrites_unconditionally() {
        let mut count = UnreadCount::new();
        count.increment();
        count.increment();
        count.reconcile(7);
        assert_eq!(count.get(), 7);
        count.reconcile(0);
        assert_eq!(count.get(), 0);
    }
}
