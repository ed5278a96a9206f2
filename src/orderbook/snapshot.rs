//! Read-only views of the book for display.

use std::fmt;

use crate::types::price::from_fixed_trimmed;

/// One price level: its price, total resting quantity and `(order_id, remaining)`
/// pairs in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSnapshot {
    pub price: u64,
    pub total_quantity: u64,
    pub orders: Vec<(u64, u64)>,
}

/// Both sides of the book, best level first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookSnapshot {
    pub bids: Vec<LevelSnapshot>,
    pub asks: Vec<LevelSnapshot>,
}

impl BookSnapshot {
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    fn fmt_side(f: &mut fmt::Formatter<'_>, name: &str, levels: &[LevelSnapshot]) -> fmt::Result {
        writeln!(f, "--- {name} ---")?;
        for level in levels {
            write!(f, "Price {}: ", from_fixed_trimmed(level.price))?;
            for (id, qty) in &level.orders {
                write!(f, "[id={id}, qty={qty}] ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for BookSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::fmt_side(f, "BIDS", &self.bids)?;
        Self::fmt_side(f, "ASKS", &self.asks)
    }
}
