// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Selection: pending/committed selection for list containers.
//!
//! A list container's selection changes arrive from many places during a
//! frame: a new data source, a click, a programmatic assignment, items being
//! inserted or removed. This crate keeps those as _pending_ state and resolves
//! them once, at commit time, into a single _committed_ selected index.
//!
//! The core type is [`ListSelection`], which tracks:
//! - The committed [`SelectedIndex`] and an optional proposed one.
//! - A pending item proposal, resolved to a position at commit.
//! - Deferred work as [`CommitFlags`] and the [`CommitPhase`] of the container.
//! - A **revision** counter bumped when the committed selection changes.
//!
//! It does **not** own the backing collection or any renderers. Items are
//! passed in as slices; renderer updates and change notifications go to a
//! [`SelectionListener`].
//!
//! ## Commit cycle
//!
//! ```text
//! Clean ──invalidate──▶ Dirty ──commit──▶ Committing ──▶ Clean
//! ```
//!
//! Mutators return `true` on the `Clean → Dirty` edge. That is the signal to
//! queue the container, for example in an
//! [`understory_depth_queue`](https://docs.rs/understory_depth_queue) queue,
//! whose commit pass later calls [`ListSelection::commit`].
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_selection::{
//!     CollectionChange, EventLog, ListSelection, SelectedIndex, SelectionEvent,
//!     SelectionPolicy,
//! };
//!
//! let mut items = vec!["a", "b", "c"];
//! let mut sel = ListSelection::new(SelectionPolicy::default());
//!
//! // A click proposes index 2; the user may veto it at commit.
//! assert!(sel.propose_index(SelectedIndex::Index(2), true));
//! let mut log = EventLog::new();
//! sel.commit(&items, &mut log);
//! assert_eq!(sel.committed_index(), SelectedIndex::Index(2));
//! assert!(log.events.contains(&SelectionEvent::Changed {
//!     old: SelectedIndex::Unselected,
//!     new: SelectedIndex::Index(2),
//! }));
//!
//! // Removing an item in front of the selection shifts it.
//! items.remove(0);
//! sel.apply_collection_change(CollectionChange::Remove { location: 0, count: 1 }, items.len());
//! assert_eq!(sel.committed_index(), SelectedIndex::Index(1));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! ## Features
//!
//! - `tracing`: emit [`tracing`](https://docs.rs/tracing) events when a
//!   selection is applied or vetoed.

#![no_std]

extern crate alloc;

mod events;
mod flags;
mod index;
mod list;
mod listener;

pub use events::{ItemPointerKind, ListEvent, ListEventKind, list_event_kind};
pub use flags::{CommitFlags, CommitPhase};
pub use index::{SelectedIndex, SelectionPolicy};
pub use list::{CollectionChange, CommitOutcome, ListSelection, SelectionCommit};
pub use listener::{EventLog, SelectionEvent, SelectionListener};
