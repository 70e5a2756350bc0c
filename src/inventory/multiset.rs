//! Inventory multiset - owned chips bucketed by code
//!
//! Each code maps to a stack of chips; pops take the most recently added
//! chip first. Buckets are kept in a `BTreeMap` so iteration and weight
//! range scans come out in code order, which keeps planning deterministic
//! for a fixed input order.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use crate::core::types::{OwnedItem, ResourceCode};

#[derive(Debug, Clone, Default)]
pub struct InventoryMultiset {
    buckets: BTreeMap<ResourceCode, Vec<OwnedItem>>,
    len: usize,
}

impl InventoryMultiset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: OwnedItem) {
        self.buckets.entry(item.code).or_default().push(item);
        self.len += 1;
    }

    /// Take the most recently added chip with exactly this code
    pub fn pop(&mut self, code: ResourceCode) -> Option<OwnedItem> {
        let bucket = self.buckets.get_mut(&code)?;
        let item = bucket.pop();
        if bucket.is_empty() {
            self.buckets.remove(&code);
        }
        if item.is_some() {
            self.len -= 1;
        }
        item
    }

    /// The chip `pop` would return, without removing it
    pub fn peek(&self, code: ResourceCode) -> Option<&OwnedItem> {
        self.buckets.get(&code).and_then(|bucket| bucket.last())
    }

    pub fn count(&self, code: ResourceCode) -> usize {
        self.buckets.get(&code).map_or(0, Vec::len)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Codes in stock for one kind and level, restricted to a weight range
    ///
    /// Yields in ascending weight; call `.rev()` for heaviest first.
    pub fn codes_in(
        &self,
        kind: i32,
        level: i32,
        weights: RangeInclusive<i32>,
    ) -> impl DoubleEndedIterator<Item = ResourceCode> + '_ {
        let (lo, hi) = weights.into_inner();
        // BTreeMap::range panics on an inverted range
        let range = (lo <= hi).then(|| {
            ResourceCode::new(kind, level, lo)..=ResourceCode::new(kind, level, hi)
        });
        range
            .into_iter()
            .flat_map(move |r| self.buckets.range(r).map(|(code, _)| *code))
    }

    /// Every chip still held, in code order
    pub fn iter(&self) -> impl Iterator<Item = &OwnedItem> + '_ {
        self.buckets.values().flatten()
    }

    /// Empty the multiset, yielding chips in code order
    pub fn drain(&mut self) -> impl Iterator<Item = OwnedItem> {
        self.len = 0;
        std::mem::take(&mut self.buckets).into_values().flatten()
    }
}

impl FromIterator<OwnedItem> for InventoryMultiset {
    fn from_iter<I: IntoIterator<Item = OwnedItem>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<OwnedItem> for InventoryMultiset {
    fn extend<I: IntoIterator<Item = OwnedItem>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}
