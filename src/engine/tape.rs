//! Append-only record of executed trades.
//!
//! The tape keeps running totals as trades are appended so the summary
//! never rescans history.

use std::fmt;

use rust_decimal::Decimal;

use crate::types::price::{from_fixed_trimmed, vwap};
use crate::types::Trade;

/// Trades in the order they executed.
#[derive(Debug, Clone, Default)]
pub struct TradeTape {
    trades: Vec<Trade>,
    total_quantity: u64,
    total_notional_raw: u128,
}

impl TradeTape {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            trades: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Whether trades totalling `quantity` at prices up to `price_bound`
    /// can be appended without overflowing the running totals.
    pub fn has_room(&self, quantity: u64, price_bound: u64) -> bool {
        let notional = u128::from(quantity) * u128::from(price_bound);
        self.total_quantity.checked_add(quantity).is_some()
            && self.total_notional_raw.checked_add(notional).is_some()
    }

    pub fn push(&mut self, trade: Trade) {
        debug_assert!(trade.quantity > 0, "trades must carry quantity");
        debug_assert!(self.has_room(trade.quantity, trade.price), "tape totals would overflow");
        self.total_quantity += trade.quantity;
        self.total_notional_raw += trade.notional_raw();
        self.trades.push(trade);
    }

    #[inline]
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    #[inline]
    pub fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    /// Σ(price · quantity), prices still scaled by 10^8
    #[inline]
    pub fn total_notional_raw(&self) -> u128 {
        self.total_notional_raw
    }

    /// Σ(price · quantity) / max(1, Σquantity)
    pub fn vwap(&self) -> Decimal {
        vwap(self.total_notional_raw, self.total_quantity)
    }

    pub fn summary(&self) -> TradeSummary {
        TradeSummary {
            trades: self.trades.clone(),
            total_quantity: self.total_quantity,
            total_notional_raw: self.total_notional_raw,
            vwap: self.vwap(),
        }
    }
}

/// Trades plus aggregate volume and VWAP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeSummary {
    pub trades: Vec<Trade>,
    pub total_quantity: u64,
    pub total_notional_raw: u128,
    /// Zero for an empty tape
    pub vwap: Decimal,
}

impl fmt::Display for TradeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Trades ===")?;
        if self.trades.is_empty() {
            return writeln!(f, "No trades executed yet.");
        }

        for trade in &self.trades {
            writeln!(
                f,
                "BUY {} matched with SELL {} qty={} @ {}",
                trade.buy_order_id,
                trade.sell_order_id,
                trade.quantity,
                from_fixed_trimmed(trade.price)
            )?;
        }
        writeln!(f, "Total traded volume: {}", self.total_quantity)?;
        writeln!(f, "VWAP: {}", self.vwap.round_dp(8).normalize())
    }
}
