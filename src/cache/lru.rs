//! Recency Order Module
//!
//! Least-recently-used ordering, consulted only when a cache has a capacity bound.

use std::collections::VecDeque;

// == Recency Order ==
/// Keys ordered by last use: front is the most recent, back the least.
#[derive(Debug, Default)]
pub struct RecencyOrder {
    order: VecDeque<String>,
}

impl RecencyOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as just used, inserting it if it is not tracked yet.
    pub fn touch(&mut self, key: &str) {
        self.forget(key);
        self.order.push_front(key.to_owned());
    }

    /// Stops tracking `key`. Unknown keys are ignored.
    pub fn forget(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
    }

    /// Removes and returns the least recently used key.
    pub fn pop_least_recent(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
