// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth queue: clients bucketed by nesting depth.

use alloc::vec::Vec;
use core::fmt;
use core::ops::RangeInclusive;

use crate::bucket::DepthBucket;
use crate::client::InvalidationClient;

/// A priority queue of invalidated clients keyed by nesting depth.
///
/// Clients are filed into one [`DepthBucket`] per depth. The queue tracks a
/// `[min, max]` depth window that covers every non-empty bucket, which turns
/// "take any client at the shallowest/deepest depth" into amortized O(1).
///
/// # Bounds are estimates
///
/// The depth window is only tight immediately after [`pop`](Self::pop) or
/// [`shift`](Self::shift). [`remove`](Self::remove) never touches it, and the
/// structural removals only narrow it while they walk over empty buckets at
/// its edge. The next `pop`/`shift` skips empty buckets and tightens lazily.
/// [`is_empty`](Self::is_empty) does not depend on the window: the queue keeps
/// an exact count of resident clients.
///
/// # Identity and depth
///
/// A client is filed under the depth it reports at insert time. Inserting the
/// same identity again at the same depth is a no-op. Inserting it at a
/// *different* depth while it is still resident leaves two entries behind;
/// callers must remove a client before reinserting it at a new depth.
///
/// # Example
///
/// ```
/// use understory_depth_queue::{DepthQueue, InvalidationClient};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Widget {
///     id: u32,
///     depth: usize,
/// }
///
/// impl InvalidationClient for Widget {
///     type Id = u32;
///     fn id(&self) -> u32 {
///         self.id
///     }
///     fn nest_level(&self) -> usize {
///         self.depth
///     }
///     fn is_ancestor_of(&self, _other: &Self) -> bool {
///         false
///     }
/// }
///
/// let mut queue = DepthQueue::new();
/// queue.insert(Widget { id: 1, depth: 2 });
/// queue.insert(Widget { id: 2, depth: 0 });
/// queue.insert(Widget { id: 3, depth: 5 });
///
/// // Deepest first.
/// assert_eq!(queue.pop().map(|w| w.id), Some(3));
/// // Shallowest first.
/// assert_eq!(queue.shift().map(|w| w.id), Some(2));
/// assert_eq!(queue.len(), 1);
/// ```
pub struct DepthQueue<C>
where
    C: InvalidationClient,
{
    /// `buckets[depth]` holds the clients queued at `depth`.
    buckets: Vec<DepthBucket<C::Id, C>>,
    /// Lower edge of the depth window (inclusive).
    lo: usize,
    /// Upper edge of the depth window (exclusive). `lo >= hi` means no window.
    hi: usize,
    /// Number of resident clients across all buckets.
    len: usize,
}

impl<C> Default for DepthQueue<C>
where
    C: InvalidationClient,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for DepthQueue<C>
where
    C: InvalidationClient + Clone,
{
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            lo: self.lo,
            hi: self.hi,
            len: self.len,
        }
    }
}

impl<C> fmt::Debug for DepthQueue<C>
where
    C: InvalidationClient + fmt::Debug,
    C::Id: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DepthQueue")
            .field("buckets", &self.buckets)
            .field("lo", &self.lo)
            .field("hi", &self.hi)
            .field("len", &self.len)
            .finish()
    }
}

/// Ensures `vec` has at least `idx + 1` elements, filling with defaults.
#[inline]
fn grow<T: Default>(vec: &mut Vec<T>, idx: usize) {
    if idx >= vec.len() {
        vec.resize_with(idx + 1, T::default);
    }
}

impl<C> DepthQueue<C>
where
    C: InvalidationClient,
{
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            lo: 0,
            hi: 0,
            len: 0,
        }
    }

    /// Returns `true` if no client is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of queued clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the current depth window, or `None` if it is crossed.
    ///
    /// The window covers every non-empty bucket but may be wider than
    /// necessary; see the type-level docs.
    #[must_use]
    pub fn depth_bounds(&self) -> Option<RangeInclusive<usize>> {
        (self.lo < self.hi).then(|| self.lo..=self.hi - 1)
    }

    /// Returns the lower edge of the depth window.
    #[must_use]
    pub fn min_depth(&self) -> Option<usize> {
        self.depth_bounds().map(|r| *r.start())
    }

    /// Returns the upper edge of the depth window.
    #[must_use]
    pub fn max_depth(&self) -> Option<usize> {
        self.depth_bounds().map(|r| *r.end())
    }

    /// Returns `true` if `client` is queued at `depth`.
    #[must_use]
    pub fn contains(&self, client: &C, depth: usize) -> bool {
        self.buckets
            .get(depth)
            .is_some_and(|bucket| bucket.contains(client.id()))
    }

    /// Returns an iterator over `(depth, client)` for every queued client.
    ///
    /// Depths ascend; order within a depth is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &C)> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .flat_map(|(depth, bucket)| bucket.iter().map(move |(_, client)| (depth, client)))
    }

    /// Queues `client` at its current [`nest_level`](InvalidationClient::nest_level).
    ///
    /// Returns `true` if the client was newly queued, `false` if the same
    /// identity was already resident at that depth.
    pub fn insert(&mut self, client: C) -> bool {
        let depth = client.nest_level();
        let id = client.id();

        grow(&mut self.buckets, depth);
        if !self.buckets[depth].put(id, client) {
            return false;
        }

        if self.len == 0 {
            self.lo = depth;
            self.hi = depth + 1;
        } else {
            self.lo = self.lo.min(depth);
            self.hi = self.hi.max(depth + 1);
        }
        self.len += 1;
        true
    }

    /// Removes and returns a client at the deepest queued depth.
    ///
    /// Returns `None` if the queue is empty. Which client is returned among
    /// several at the same depth is unspecified.
    pub fn pop(&mut self) -> Option<C> {
        if self.len == 0 {
            return None;
        }
        self.tighten_hi();
        let depth = self.hi.checked_sub(1)?;
        let client = self.buckets.get_mut(depth)?.take_any()?;
        self.len -= 1;
        self.tighten_hi();
        Some(client)
    }

    /// Removes and returns a client at the shallowest queued depth.
    ///
    /// Mirror of [`pop`](Self::pop).
    pub fn shift(&mut self) -> Option<C> {
        if self.len == 0 {
            return None;
        }
        self.tighten_lo();
        if self.lo >= self.hi {
            return None;
        }
        let client = self.buckets.get_mut(self.lo)?.take_any()?;
        self.len -= 1;
        self.tighten_lo();
        Some(client)
    }

    /// Removes `client` from the bucket at its current nesting depth.
    ///
    /// Returns the stored client, or `None` if it was not queued there. Use
    /// [`remove_at`](Self::remove_at) when the depth may have changed since
    /// insertion. The depth window is left as is.
    pub fn remove(&mut self, client: &C) -> Option<C> {
        self.remove_at(client, client.nest_level())
    }

    /// Removes `client` from the bucket at `depth`.
    ///
    /// Returns the stored client, or `None` if it was not queued at `depth`.
    /// The depth window is left as is.
    pub fn remove_at(&mut self, client: &C, depth: usize) -> Option<C> {
        let removed = self.buckets.get_mut(depth)?.remove(client.id())?;
        self.len -= 1;
        Some(removed)
    }

    /// Removes the deepest queued client that is `ancestor` itself or one of
    /// its descendants.
    ///
    /// Depths are scanned from the deepest queued depth down to
    /// `ancestor.nest_level()`. At the ancestor's own depth only `ancestor`
    /// itself matches; deeper buckets are searched with
    /// [`is_ancestor_of`](InvalidationClient::is_ancestor_of). Among several
    /// matching clients at one depth the choice is unspecified.
    ///
    /// Empty buckets at the top of the window lower its upper edge as the scan
    /// passes them.
    pub fn remove_largest_child(&mut self, ancestor: &C) -> Option<C> {
        if self.len == 0 {
            return None;
        }
        let floor = ancestor.nest_level();
        let id = ancestor.id();

        let mut depth = self.hi;
        while depth > floor {
            depth -= 1;
            match self.buckets.get_mut(depth) {
                Some(bucket) if !bucket.is_empty() => {
                    let found = if depth == floor {
                        bucket.remove(id)
                    } else {
                        bucket.take_first_where(|client| ancestor.is_ancestor_of(client))
                    };
                    if let Some(client) = found {
                        self.len -= 1;
                        return Some(client);
                    }
                }
                _ => {
                    if depth + 1 == self.hi {
                        self.hi = depth;
                    }
                }
            }
        }
        None
    }

    /// Removes the shallowest queued client that is `ancestor` itself or one
    /// of its descendants.
    ///
    /// Mirror of [`remove_largest_child`](Self::remove_largest_child), scanning
    /// from `ancestor.nest_level()` up to the deepest queued depth. Empty
    /// buckets at the bottom of the window raise its lower edge as the scan
    /// passes them.
    pub fn remove_smallest_child(&mut self, ancestor: &C) -> Option<C> {
        if self.len == 0 {
            return None;
        }
        let floor = ancestor.nest_level();
        let id = ancestor.id();

        let mut depth = floor;
        while depth < self.hi {
            match self.buckets.get_mut(depth) {
                Some(bucket) if !bucket.is_empty() => {
                    let found = if depth == floor {
                        bucket.remove(id)
                    } else {
                        bucket.take_first_where(|client| ancestor.is_ancestor_of(client))
                    };
                    if let Some(client) = found {
                        self.len -= 1;
                        return Some(client);
                    }
                }
                _ => {
                    if depth == self.lo {
                        self.lo = depth + 1;
                    }
                }
            }
            depth += 1;
        }
        None
    }

    /// Drops every queued client and resets the depth window.
    ///
    /// Clients are not notified individually.
    pub fn remove_all(&mut self) {
        self.buckets.clear();
        self.lo = 0;
        self.hi = 0;
        self.len = 0;
    }

    fn bucket_is_empty(&self, depth: usize) -> bool {
        self.buckets.get(depth).is_none_or(DepthBucket::is_empty)
    }

    fn tighten_hi(&mut self) {
        while self.lo < self.hi && self.bucket_is_empty(self.hi - 1) {
            self.hi -= 1;
        }
    }

    fn tighten_lo(&mut self) {
        while self.lo < self.hi && self.bucket_is_empty(self.lo) {
            self.lo += 1;
        }
    }
}
