//! FIFO queue of resting orders at one price.
//!
//! ```text
//! head (oldest) <-> order2 <-> order3 <-> tail (newest)
//! ```
//!
//! New orders join at the tail, matching consumes from the head, and any
//! order can be unlinked in O(1) by slab key. The order data itself lives in
//! the slab; a level only holds queue metadata.

use slab::Slab;

use crate::orderbook::OrderNode;
use crate::types::Order;

/// Orders resting at a single price, served in arrival order.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price for this level (fixed-point, scaled by 10^8)
    pub price: u64,

    /// Sum of remaining quantity of every order at this level
    pub total_quantity: u64,

    /// Oldest order (slab key), the next to match
    pub head: Option<usize>,

    /// Newest order (slab key)
    pub tail: Option<usize>,

    /// Number of orders at this level
    pub order_count: usize,
}

impl PriceLevel {
    pub fn new(price: u64) -> Self {
        Self {
            price,
            total_quantity: 0,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Append a node at the tail of the queue.
    ///
    /// # Panics
    ///
    /// Panics if `key` or the current tail is not in the slab.
    pub fn push_back(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let node = slab.get_mut(key).expect("pushed key missing from slab");
        debug_assert_eq!(node.price(), self.price, "order pushed onto wrong level");
        let quantity = node.remaining();
        node.prev = self.tail;
        node.next = None;

        match self.tail {
            Some(tail_key) => {
                slab.get_mut(tail_key).expect("level tail missing from slab").next = Some(key);
            }
            None => self.head = Some(key),
        }

        self.tail = Some(key);
        self.order_count += 1;
        self.total_quantity += quantity;
    }

    /// Unlink a node from anywhere in the queue.
    ///
    /// The node stays in the slab; the caller decides whether to free it.
    /// Returns the node's remaining quantity.
    pub fn remove(&mut self, key: usize, slab: &mut Slab<OrderNode>) -> u64 {
        let node = slab.get(key).expect("removed key missing from slab");
        let quantity = node.remaining();
        let (prev_key, next_key) = (node.prev, node.next);

        match prev_key {
            Some(prev) => slab.get_mut(prev).expect("prev link dangling").next = next_key,
            None => self.head = next_key,
        }
        match next_key {
            Some(next) => slab.get_mut(next).expect("next link dangling").prev = prev_key,
            None => self.tail = prev_key,
        }

        if let Some(node) = slab.get_mut(key) {
            node.unlink();
        }

        self.order_count -= 1;
        self.total_quantity -= quantity;
        quantity
    }

    /// Slab key of the oldest order
    #[inline]
    pub fn peek_head(&self) -> Option<usize> {
        self.head
    }

    /// Account for a partial fill of one of this level's orders
    #[inline]
    pub fn reduce_quantity(&mut self, filled: u64) {
        debug_assert!(filled <= self.total_quantity);
        self.total_quantity = self.total_quantity.saturating_sub(filled);
    }

    /// Iterate the level's orders oldest first
    pub fn iter<'a>(&self, slab: &'a Slab<OrderNode>) -> LevelIter<'a> {
        LevelIter {
            slab,
            cursor: self.head,
        }
    }
}

/// Walks a price level from head to tail.
pub struct LevelIter<'a> {
    slab: &'a Slab<OrderNode>,
    cursor: Option<usize>,
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = &'a Order;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.slab.get(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    const PRICE: u64 = 1_000_000_000;

    fn insert(slab: &mut Slab<OrderNode>, id: u64, quantity: u64) -> usize {
        slab.insert(OrderNode::new(Order::limit(id, Side::Buy, PRICE, quantity, id)))
    }

    fn ids(level: &PriceLevel, slab: &Slab<OrderNode>) -> Vec<u64> {
        level.iter(slab).map(|o| o.id).collect()
    }

    #[test]
    fn test_push_keeps_arrival_order() {
        let mut slab = Slab::with_capacity(4);
        let mut level = PriceLevel::new(PRICE);

        for (id, qty) in [(1, 5), (2, 3), (3, 1)] {
            let key = insert(&mut slab, id, qty);
            level.push_back(key, &mut slab);
        }

        assert_eq!(ids(&level, &slab), vec![1, 2, 3]);
        assert_eq!(level.order_count, 3);
        assert_eq!(level.total_quantity, 9);
        assert_eq!(slab[level.peek_head().unwrap()].order_id(), 1);
    }

    #[test]
    fn test_remove_middle_relinks_neighbours() {
        let mut slab = Slab::with_capacity(4);
        let mut level = PriceLevel::new(PRICE);
        let keys: Vec<usize> = (1..=3).map(|id| insert(&mut slab, id, 2)).collect();
        for &key in &keys {
            level.push_back(key, &mut slab);
        }

        assert_eq!(level.remove(keys[1], &mut slab), 2);

        assert_eq!(ids(&level, &slab), vec![1, 3]);
        assert_eq!(slab[keys[0]].next, Some(keys[2]));
        assert_eq!(slab[keys[2]].prev, Some(keys[0]));
        assert_eq!(level.total_quantity, 4);
    }

    #[test]
    fn test_remove_head_promotes_next() {
        let mut slab = Slab::with_capacity(4);
        let mut level = PriceLevel::new(PRICE);
        let first = insert(&mut slab, 1, 1);
        let second = insert(&mut slab, 2, 1);
        level.push_back(first, &mut slab);
        level.push_back(second, &mut slab);

        level.remove(first, &mut slab);

        assert_eq!(level.head, Some(second));
        assert_eq!(level.tail, Some(second));
        assert!(slab[second].prev.is_none());
    }

    #[test]
    fn test_remove_last_empties_level() {
        let mut slab = Slab::with_capacity(1);
        let mut level = PriceLevel::new(PRICE);
        let key = insert(&mut slab, 1, 7);
        level.push_back(key, &mut slab);

        level.remove(key, &mut slab);

        assert!(level.is_empty());
        assert_eq!(level.total_quantity, 0);
        assert!(level.head.is_none() && level.tail.is_none());
    }

    #[test]
    fn test_reduce_quantity_after_partial_fill() {
        let mut slab = Slab::with_capacity(1);
        let mut level = PriceLevel::new(PRICE);
        let key = insert(&mut slab, 1, 7);
        level.push_back(key, &mut slab);

        slab[key].fill(3);
        level.reduce_quantity(3);

        assert_eq!(level.total_quantity, 4);
        assert_eq!(level.remove(key, &mut slab), 4);
        assert_eq!(level.total_quantity, 0);
    }
}
