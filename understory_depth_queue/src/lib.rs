// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Depth Queue: nesting-depth ordered invalidation scheduling.
//!
//! Components in a UI tree mutate logical state (selection, data bindings,
//! layout flags) during a frame. Those mutations must be flushed in a stable,
//! hierarchy-aware order: shallowest-first for top-down property commits,
//! deepest-first for bottom-up measurement. Each component must be flushed at
//! most once per pass, and queueing one must not require walking the tree.
//!
//! This crate provides:
//!
//! - **Client contract** ([`InvalidationClient`]): identity, nesting depth and
//!   containment, the three things the queue needs from a component.
//! - **Buckets** ([`DepthBucket`]): the queued clients at one depth, keyed by
//!   identity.
//! - **Queue** ([`DepthQueue`]): buckets indexed by depth with a lazily
//!   tightened depth window; insert, pop (deepest), shift (shallowest),
//!   targeted and structural removal.
//! - **Pass driver** ([`CommitPass`]): drains a queue in a chosen
//!   [`PassOrder`], letting each commit queue further work that the same pass
//!   observes.
//!
//! ## Quick Start
//!
//! ```rust
//! use understory_depth_queue::{CommitPass, DepthQueue, InvalidationClient, PassOrder};
//!
//! #[derive(Clone, Debug)]
//! struct Node {
//!     id: u32,
//!     path: Vec<u32>,
//! }
//!
//! impl InvalidationClient for Node {
//!     type Id = u32;
//!     fn id(&self) -> u32 {
//!         self.id
//!     }
//!     fn nest_level(&self) -> usize {
//!         self.path.len()
//!     }
//!     fn is_ancestor_of(&self, other: &Self) -> bool {
//!         other.path.contains(&self.id)
//!     }
//! }
//!
//! let root = Node { id: 1, path: vec![] };
//! let child = Node { id: 2, path: vec![1] };
//!
//! let mut queue = DepthQueue::new();
//! queue.insert(child.clone());
//! queue.insert(root.clone());
//!
//! let mut committed = Vec::new();
//! CommitPass::new(PassOrder::ShallowestFirst)
//!     .run(&mut queue, |node, _queue| committed.push(node.id))
//!     .unwrap();
//! assert_eq!(committed, [1, 2]);
//! ```
//!
//! ## Depth window
//!
//! [`DepthQueue`] keeps a `[min, max]` window over the non-empty buckets. It
//! is an estimate: exact only right after [`DepthQueue::pop`] or
//! [`DepthQueue::shift`]. Targeted removal leaves it untouched so that many
//! removals between pops stay O(1) each; the next pop or shift skips the
//! empty buckets it finds at the edge.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! ## Features
//!
//! - `tracing`: emit [`tracing`](https://docs.rs/tracing) events from
//!   [`CommitPass`] (per-commit `trace`, per-pass `debug`, budget `warn`).

#![no_std]

extern crate alloc;

mod bucket;
mod client;
mod pass;
mod queue;

pub use bucket::DepthBucket;
pub use client::InvalidationClient;
pub use pass::{CommitPass, PassError, PassOrder, PassStats};
pub use queue::DepthQueue;
