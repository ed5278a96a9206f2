//! Slab-resident order node.
//!
//! `OrderNode` wraps a resting `Order` with doubly-linked list pointers so a
//! price level can unlink any order in O(1) given its slab key. The pointers
//! are slab keys, never references, so the slab stays the single owner of
//! order data.

use crate::types::{Order, Side};

/// Order node stored in the book's slab.
///
/// - `prev`: the order that arrived earlier at the same price (None at the head)
/// - `next`: the order that arrived later at the same price (None at the tail)
#[derive(Debug, Clone)]
pub struct OrderNode {
    /// The resting order
    pub order: Order,

    /// Next (newer) order in the price level queue
    pub next: Option<usize>,

    /// Previous (older) order in the price level queue
    pub prev: Option<usize>,
}

impl OrderNode {
    /// Create a new, unlinked node
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            next: None,
            prev: None,
        }
    }

    #[inline]
    pub fn order_id(&self) -> u64 {
        self.order.id
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.order.side()
    }

    #[inline]
    pub fn price(&self) -> u64 {
        self.order.price
    }

    #[inline]
    pub fn remaining(&self) -> u64 {
        self.order.remaining
    }

    /// Fill part of the resting order, returning the quantity actually filled
    #[inline]
    pub fn fill(&mut self, quantity: u64) -> u64 {
        self.order.fill(quantity)
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.order.is_filled()
    }

    /// Detach from neighbours (after the level has relinked them)
    #[inline]
    pub(crate) fn unlink(&mut self) {
        self.prev = None;
        self.next = None;
    }
}
