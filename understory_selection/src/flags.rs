// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty flags and commit phases.

bitflags::bitflags! {
    /// Work deferred to the next commit.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CommitFlags: u8 {
        /// The backing collection was replaced or reset.
        const DATA_PROVIDER      = 0b0000_0001;
        /// `require_selection` was switched on.
        const REQUIRE_SELECTION  = 0b0000_0010;
        /// Renderer labels need to be recomputed.
        const LABELS             = 0b0000_0100;
        /// A structural edit shifted the selected index without reselecting.
        const SELECTION_ADJUSTED = 0b0000_1000;
    }
}

/// Where a container is in its invalidate/commit cycle.
///
/// `Clean → Dirty` happens on the first invalidation; that edge is the moment
/// the container should be queued for a commit pass. A commit moves it to
/// `Committing` and back to `Clean`. Invalidations while `Committing` are
/// absorbed by the running commit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum CommitPhase {
    /// No pending work.
    #[default]
    Clean,
    /// Pending work; waiting for a commit.
    Dirty,
    /// A commit is running.
    Committing,
}
