// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notification sink for selection commits.

use alloc::vec::Vec;

use crate::index::SelectedIndex;

/// Receives the notifications emitted while a selection is committed.
///
/// Every method has a default, so implementors only override what they need.
/// `()` is a listener that ignores everything and never vetoes.
pub trait SelectionListener {
    /// Called before a user-driven selection change is applied.
    ///
    /// Return `false` to veto; the previous selection then stays in place.
    fn changing(&mut self, old: SelectedIndex, new: SelectedIndex) -> bool {
        let _ = (old, new);
        true
    }

    /// Called after a user-driven selection change was applied.
    fn changed(&mut self, old: SelectedIndex, new: SelectedIndex) {
        let _ = (old, new);
    }

    /// Called whenever the committed value was (re)established.
    fn value_commit(&mut self) {}

    /// Called to update the selected flag of the renderer at `index`.
    fn item_selected(&mut self, index: usize, selected: bool) {
        let _ = (index, selected);
    }

    /// Called when renderer labels must be recomputed.
    fn labels_changed(&mut self) {}
}

impl SelectionListener for () {}

/// A notification recorded by [`EventLog`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
    /// See [`SelectionListener::changing`].
    Changing {
        /// Committed index before the change.
        old: SelectedIndex,
        /// Proposed index.
        new: SelectedIndex,
    },
    /// See [`SelectionListener::changed`].
    Changed {
        /// Committed index before the change.
        old: SelectedIndex,
        /// Committed index after the change.
        new: SelectedIndex,
    },
    /// See [`SelectionListener::value_commit`].
    ValueCommit,
    /// See [`SelectionListener::item_selected`].
    ItemSelected {
        /// Renderer position.
        index: usize,
        /// New selected flag.
        selected: bool,
    },
    /// See [`SelectionListener::labels_changed`].
    LabelsChanged,
}

/// A listener that records every notification, optionally vetoing changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    /// Recorded notifications, oldest first.
    pub events: Vec<SelectionEvent>,
    /// When set, every `changing` notification is vetoed.
    pub veto: bool,
}

impl EventLog {
    /// Creates an empty log that accepts every change.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            veto: false,
        }
    }

    /// Creates an empty log that vetoes every change.
    #[must_use]
    pub const fn vetoing() -> Self {
        Self {
            events: Vec::new(),
            veto: true,
        }
    }

    /// Removes and returns the recorded notifications.
    pub fn take(&mut self) -> Vec<SelectionEvent> {
        core::mem::take(&mut self.events)
    }
}

impl SelectionListener for EventLog {
    fn changing(&mut self, old: SelectedIndex, new: SelectedIndex) -> bool {
        self.events.push(SelectionEvent::Changing { old, new });
        !self.veto
    }

    fn changed(&mut self, old: SelectedIndex, new: SelectedIndex) {
        self.events.push(SelectionEvent::Changed { old, new });
    }

    fn value_commit(&mut self) {
        self.events.push(SelectionEvent::ValueCommit);
    }

    fn item_selected(&mut self, index: usize, selected: bool) {
        self.events
            .push(SelectionEvent::ItemSelected { index, selected });
    }

    fn labels_changed(&mut self) {
        self.events.push(SelectionEvent::LabelsChanged);
    }
}
