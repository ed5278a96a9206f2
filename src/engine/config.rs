//! Construction-time engine settings.

/// Pre-allocation sizes for a [`MatchingEngine`](crate::engine::MatchingEngine).
///
/// Capacities are hints: the book and tape still grow past them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Resting order slots reserved in the slab and the order index
    pub order_capacity: usize,
    /// Trades reserved on the tape
    pub trade_capacity: usize,
}

impl EngineConfig {
    pub const DEFAULT_ORDER_CAPACITY: usize = 10_000;
    pub const DEFAULT_TRADE_CAPACITY: usize = 10_000;

    /// Same capacity for resting orders and trades
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order_capacity: capacity,
            trade_capacity: capacity,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            order_capacity: Self::DEFAULT_ORDER_CAPACITY,
            trade_capacity: Self::DEFAULT_TRADE_CAPACITY,
        }
    }
}
