//! Core data types for the limit order book
//!
//! ## Types
//!
//! - [`Order`]: An order submitted to the book
//! - [`Side`]: Buy or Sell
//! - [`OrderType`]: Limit or Market
//! - [`Trade`]: An executed trade between two orders
//! - [`EngineError`]: Rejections returned by the engine
//!
//! ## Fixed-Point Arithmetic
//!
//! Prices are stored as `u64` scaled by 10^8.
//! Example: 10.25 is stored as 1_025_000_000u64

mod error;
mod order;
mod trade;
pub mod price;

pub use error::EngineError;
pub use order::{Order, OrderType, Side};
pub use trade::Trade;
