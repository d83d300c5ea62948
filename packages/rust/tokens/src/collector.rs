//! Fixed-cap, ordered collection shared by every capped pass.
//!
//! Order always comes from the caller's iteration order; the collector only
//! decides whether an item is admitted.

/// Bounded, optionally deduplicating, insertion-ordered collection.
#[derive(Debug, Clone)]
pub struct BoundedCollector<T> {
    cap: usize,
    dedup: bool,
    items: Vec<T>,
}

impl<T: PartialEq> BoundedCollector<T> {
    /// Admit items in order until `cap` is reached. Duplicates are kept.
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            dedup: false,
            items: Vec::with_capacity(cap.min(32)),
        }
    }

    /// Admit items in order until `cap` is reached, dropping duplicates of
    /// earlier items. Duplicates do not count toward the cap.
    pub fn unique(cap: usize) -> Self {
        Self {
            dedup: true,
            ..Self::new(cap)
        }
    }

    /// Returns `true` if the item was admitted.
    pub fn push(&mut self, item: T) -> bool {
        if self.is_full() || (self.dedup && self.items.contains(&item)) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Push every item, stopping early once full.
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            if self.is_full() {
                break;
            }
            self.push(item);
        }
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.cap
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

/// First `cap` items of `iter`.
pub fn collect_bounded<T: PartialEq, I: IntoIterator<Item = T>>(iter: I, cap: usize) -> Vec<T> {
    let mut collector = BoundedCollector::new(cap);
    collector.extend(iter);
    collector.into_vec()
}

/// First `cap` distinct items of `iter`, in first-seen order.
pub fn collect_unique<T: PartialEq, I: IntoIterator<Item = T>>(iter: I, cap: usize) -> Vec<T> {
    let mut collector = BoundedCollector::unique(cap);
    collector.extend(iter);
    collector.into_vec()
}
