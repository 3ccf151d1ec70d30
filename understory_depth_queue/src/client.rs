// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability a component must expose to be scheduled by a [`DepthQueue`](crate::DepthQueue).

use core::hash::Hash;

/// A component that can be queued for a commit pass.
///
/// The queue never owns the component's state; it stores a client value
/// (typically a small `Clone` handle) and reads three things from it:
///
/// - an **identity**, used as the bucket key,
/// - the current **nesting depth**, used as the bucket index,
/// - a **containment** query, used only by
///   [`remove_largest_child`](crate::DepthQueue::remove_largest_child) and
///   [`remove_smallest_child`](crate::DepthQueue::remove_smallest_child).
///
/// # Depth changes
///
/// `nest_level` may change while a client is queued (for example when it is
/// reparented). The queue files a client under the depth it reported at
/// insert time, so callers that move a queued client must remove it with the
/// old depth ([`DepthQueue::remove_at`](crate::DepthQueue::remove_at)) and
/// insert it again.
///
/// # Example
///
/// ```
/// use understory_depth_queue::InvalidationClient;
///
/// #[derive(Clone, Debug)]
/// struct Handle {
///     id: u32,
///     // Ids from the root down to (and excluding) this node.
///     ancestors: Vec<u32>,
/// }
///
/// impl InvalidationClient for Handle {
///     type Id = u32;
///
///     fn id(&self) -> u32 {
///         self.id
///     }
///
///     fn nest_level(&self) -> usize {
///         self.ancestors.len()
///     }
///
///     fn is_ancestor_of(&self, other: &Self) -> bool {
///         other.ancestors.contains(&self.id)
///     }
/// }
/// ```
pub trait InvalidationClient {
    /// Stable identity, unique among concurrently queued clients.
    type Id: Copy + Eq + Hash;

    /// Returns the identity used as the bucket key.
    fn id(&self) -> Self::Id;

    /// Returns the current nesting depth (distance from the root).
    fn nest_level(&self) -> usize;

    /// Returns `true` if `other` is a strict descendant of `self`.
    fn is_ancestor_of(&self, other: &Self) -> bool;
}
