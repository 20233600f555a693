//! Capacity-bounded, newest-first list of feed items.

use super::FeedItem;
use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// Most recent items, newest first. `len() <= capacity()` after every mutation.
#[derive(Debug, Clone)]
pub struct BoundedFeed {
    capacity: NonZeroUsize,
    items: VecDeque<FeedItem>,
}

impl BoundedFeed {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity.get()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items newest first.
    pub fn iter(&self) -> impl Iterator<Item = &FeedItem> {
        self.items.iter()
    }

    pub fn newest(&self) -> Option<&FeedItem> {
        self.items.front()
    }

    pub fn get(&self, id: &str) -> Option<&FeedItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Insert at the front. When that overflows capacity, the single oldest item is evicted and returned.
    pub fn accept(&mut self, item: FeedItem) -> Option<FeedItem> {
        self.items.push_front(item);
        if self.items.len() > self.capacity.get() {
            self.items.pop_back()
        } else {
            None
        }
    }

    /// Insert several items in arrival order (the last one ends up on top), then trim to capacity.
    /// Returns everything evicted, newest first.
    pub fn accept_batch(&mut self, items: impl IntoIterator<Item = FeedItem>) -> Vec<FeedItem> {
        for item in items {
            self.items.push_front(item);
        }
        let cap = self.capacity.get();
        if self.items.len() > cap {
            self.items.drain(cap..).collect()
        } else {
            Vec::new()
        }
    }
}
