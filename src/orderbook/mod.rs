//! Order book: resting liquidity for a single instrument.
//!
//! ## Architecture
//!
//! - **Slab-based storage**: O(1) order insertion, removal, and lookup
//! - **Price levels**: FIFO queues grouped by price in a BTreeMap per side
//! - **Order index**: order id to (side, price, slab key) for O(1) cancel
//!
//! ## Components
//!
//! - [`OrderNode`]: `Order` plus linked-list pointers for its price level
//! - [`PriceLevel`]: FIFO queue of orders at a single price
//! - [`BookSide`]: price levels of one side in execution priority
//! - [`OrderIndex`]: order id to [`OrderLocation`]
//! - [`OrderBook`]: both sides, the slab and the index, kept consistent
//! - [`BookSnapshot`]: read-only view for display
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Add order | O(log n) |
//! | Cancel order by ID | O(log n) |
//! | Best bid/ask | O(log n) |
//! | Fill head order | O(1), O(log n) when a level empties |

pub mod node;
pub mod level;
pub mod side;
pub mod index;
pub mod book;
pub mod snapshot;

pub use node::OrderNode;
pub use level::{LevelIter, PriceLevel};
pub use side::BookSide;
pub use index::{OrderIndex, OrderLocation};
pub use book::OrderBook;
pub use snapshot::{BookSnapshot, LevelSnapshot};
