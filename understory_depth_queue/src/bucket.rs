// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth bucket: the queued clients sharing one nesting depth.

use core::hash::Hash;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

/// The set of queued clients at a single nesting depth.
///
/// A bucket holds at most one entry per identity. Insertion, removal and
/// membership tests are O(1) expected. Iteration order is unspecified and must
/// only be relied upon for "take any one" behavior.
///
/// Buckets do not know about other depths: keeping an identity out of two
/// buckets at once is the job of [`DepthQueue`](crate::DepthQueue) and its
/// callers.
///
/// # Type Parameters
///
/// - `K`: The identity type, see [`InvalidationClient::Id`](crate::InvalidationClient::Id).
/// - `C`: The stored client value.
///
/// # Example
///
/// ```
/// use understory_depth_queue::DepthBucket;
///
/// let mut bucket = DepthBucket::<u32, &str>::new();
/// assert!(bucket.put(7, "seven"));
/// assert!(!bucket.put(7, "again"));
/// assert_eq!(bucket.len(), 1);
///
/// assert_eq!(bucket.remove(7), Some("seven"));
/// assert_eq!(bucket.remove(7), None);
/// assert!(bucket.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct DepthBucket<K, C>
where
    K: Copy + Eq + Hash,
{
    items: HashMap<K, C>,
}

impl<K, C> Default for DepthBucket<K, C>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> DepthBucket<K, C>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty bucket.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
        }
    }

    /// Inserts `client` under `id` if no entry for `id` exists.
    ///
    /// Returns `true` if the entry was newly inserted. An existing entry is
    /// left untouched.
    pub fn put(&mut self, id: K, client: C) -> bool {
        match self.items.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(client);
                true
            }
        }
    }

    /// Removes the entry for `id`, returning the stored client if there was one.
    pub fn remove(&mut self, id: K) -> Option<C> {
        self.items.remove(&id)
    }

    /// Returns `true` if an entry for `id` exists.
    #[must_use]
    pub fn contains(&self, id: K) -> bool {
        self.items.contains_key(&id)
    }

    /// Returns the stored client for `id`.
    #[must_use]
    pub fn get(&self, id: K) -> Option<&C> {
        self.items.get(&id)
    }

    /// Returns `true` if the bucket has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over `(id, client)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &C)> + '_ {
        self.items.iter().map(|(id, client)| (*id, client))
    }

    /// Removes and returns an arbitrary entry.
    pub fn take_any(&mut self) -> Option<C> {
        let id = *self.items.keys().next()?;
        self.items.remove(&id)
    }

    /// Removes and returns the first entry (in iteration order) matching `pred`.
    pub fn take_first_where(&mut self, mut pred: impl FnMut(&C) -> bool) -> Option<C> {
        let id = self
            .items
            .iter()
            .find_map(|(id, client)| pred(client).then_some(*id))?;
        self.items.remove(&id)
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
