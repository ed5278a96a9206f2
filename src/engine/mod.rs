//! Matching engine module.
//!
//! ## Matching Rules
//!
//! - **Buy orders** match against asks (lowest price first)
//! - **Sell orders** match against bids (highest price first)
//! - Within a price, the earliest resting order fills first
//! - Trades execute at the resting (maker) order's price
//! - **Limit** remainders rest on the book; **market** remainders are discarded
//!
//! ## Example
//!
//! ```
//! use limit_book::engine::{CancelOutcome, MatchingEngine};
//! use limit_book::types::Side;
//!
//! let mut engine = MatchingEngine::new();
//! engine.submit_limit_order(3, Side::Sell, 900_000_000, 4).unwrap();
//! engine.submit_market_order(4, Side::Buy, 2).unwrap();
//!
//! let summary = engine.trade_summary();
//! assert_eq!(summary.total_quantity, 2);
//! assert_eq!(engine.cancel_order(4), CancelOutcome::NotFound(4));
//! ```

pub mod config;
pub mod matcher;
pub mod tape;

pub use config::EngineConfig;
pub use matcher::{CancelOutcome, Execution, MatchingEngine};
pub use tape::{TradeSummary, TradeTape};
