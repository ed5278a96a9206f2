//! Order id to resting location.
//!
//! The index never owns order data. It records where a resting order lives:
//! its side (stored explicitly, so a bid and an ask at the same price are
//! never confused), its price level, and its slab key.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::types::{EngineError, Side};

/// Where a resting order can be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLocation {
    pub side: Side,
    pub price: u64,
    pub key: usize,
}

/// Lookup from order id to [`OrderLocation`].
///
/// An id is present exactly while its order rests in the book.
#[derive(Debug, Clone, Default)]
pub struct OrderIndex {
    locations: HashMap<u64, OrderLocation>,
}

impl OrderIndex {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            locations: HashMap::with_capacity(capacity),
        }
    }

    /// Register a resting order. Rejects an id that is already present.
    pub fn insert(&mut self, order_id: u64, location: OrderLocation) -> Result<(), EngineError> {
        match self.locations.entry(order_id) {
            Entry::Occupied(_) => Err(EngineError::DuplicateOrderId { order_id }),
            Entry::Vacant(slot) => {
                slot.insert(location);
                Ok(())
            }
        }
    }

    #[inline]
    pub fn get(&self, order_id: u64) -> Option<OrderLocation> {
        self.locations.get(&order_id).copied()
    }

    #[inline]
    pub fn remove(&mut self, order_id: u64) -> Option<OrderLocation> {
        self.locations.remove(&order_id)
    }

    #[inline]
    pub fn contains(&self, order_id: u64) -> bool {
        self.locations.contains_key(&order_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, OrderLocation)> + '_ {
        self.locations.iter().map(|(&id, &location)| (id, location))
    }
}
