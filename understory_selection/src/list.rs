// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pending/committed selection state of a list container.

use crate::flags::{CommitFlags, CommitPhase};
use crate::index::{SelectedIndex, SelectionPolicy};
use crate::listener::SelectionListener;

/// A structural change reported by the backing collection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CollectionChange {
    /// `count` items were inserted starting at `location`.
    Add {
        /// Position of the first inserted item.
        location: usize,
        /// Number of inserted items.
        count: usize,
    },
    /// `count` items were removed starting at `location`.
    Remove {
        /// Position of the first removed item.
        location: usize,
        /// Number of removed items.
        count: usize,
    },
    /// One item moved from `from` to `to`.
    Move {
        /// Old position.
        from: usize,
        /// New position.
        to: usize,
    },
    /// The collection was rebuilt wholesale.
    Reset,
    /// The collection was re-sorted or re-filtered.
    Refresh,
}

/// Outcome of [`ListSelection::commit_selection`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum SelectionCommit {
    /// There was no proposal to commit.
    #[default]
    Unchanged,
    /// The proposal became the committed selection.
    Applied,
    /// A listener vetoed the proposal; the previous selection is kept.
    Vetoed,
}

/// Outcome of [`ListSelection::commit`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct CommitOutcome {
    /// What happened to the pending selection.
    pub selection: SelectionCommit,
    /// Whether a label refresh was requested.
    pub labels_refreshed: bool,
}

/// Selection state of a list container, split into pending and committed values.
///
/// Setters never change the committed selection directly. They record a
/// proposal and mark the container dirty; [`commit`](Self::commit) resolves
/// every pending change at once, typically when a commit pass pops the
/// container from its invalidation queue. Several proposals before a commit
/// collapse to the last one.
///
/// Methods that can dirty the container return `true` only on the
/// `Clean → Dirty` edge, which is when the caller should queue it.
///
/// The backing collection is not owned: it is passed as a slice to the
/// methods that need to look items up.
///
/// # Example
///
/// ```
/// use understory_selection::{
///     EventLog, ListSelection, SelectedIndex, SelectionCommit, SelectionPolicy,
/// };
///
/// let items = ["red", "green", "blue"];
/// let mut sel = ListSelection::new(SelectionPolicy::REQUIRED);
///
/// // A new data source arrived: resolve selection on the next commit.
/// assert!(sel.data_provider_replaced());
/// let mut log = EventLog::new();
/// sel.commit(&items, &mut log);
/// assert_eq!(sel.committed_index(), SelectedIndex::Index(0));
///
/// // Propose by item; nothing changes until the commit.
/// sel.propose_item("blue", &items, true);
/// assert_eq!(sel.committed_index(), SelectedIndex::Index(0));
/// let outcome = sel.commit(&items, &mut log);
/// assert_eq!(outcome.selection, SelectionCommit::Applied);
/// assert_eq!(sel.selected_item(&items), Some(&"blue"));
/// ```
#[derive(Clone, Debug)]
pub struct ListSelection<T> {
    policy: SelectionPolicy,
    selected: SelectedIndex,
    proposed: Option<SelectedIndex>,
    pending_item: Option<T>,
    custom_item: Option<T>,
    flags: CommitFlags,
    phase: CommitPhase,
    user_driven: bool,
    wholesale: bool,
    revision: u64,
}

impl<T> Default for ListSelection<T> {
    fn default() -> Self {
        Self::new(SelectionPolicy::default())
    }
}

impl<T> ListSelection<T> {
    /// Creates a clean container with nothing selected.
    #[must_use]
    pub const fn new(policy: SelectionPolicy) -> Self {
        Self {
            policy,
            selected: SelectedIndex::Unselected,
            proposed: None,
            pending_item: None,
            custom_item: None,
            flags: CommitFlags::empty(),
            phase: CommitPhase::Clean,
            user_driven: false,
            wholesale: false,
            revision: 0,
        }
    }

    /// Returns the selection rules.
    #[must_use]
    pub const fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Returns the commit phase.
    #[must_use]
    pub const fn phase(&self) -> CommitPhase {
        self.phase
    }

    /// Returns `true` if a commit is pending.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.phase == CommitPhase::Dirty
    }

    /// Returns the deferred work flags.
    #[must_use]
    pub const fn flags(&self) -> CommitFlags {
        self.flags
    }

    /// Returns `true` while a data source replacement is waiting for its commit.
    ///
    /// Structural edits are ignored in this state.
    #[must_use]
    pub const fn is_doing_wholesale_changes(&self) -> bool {
        self.wholesale
    }

    /// Returns the committed selection, ignoring any proposal.
    #[must_use]
    pub const fn committed_index(&self) -> SelectedIndex {
        self.selected
    }

    /// Returns the pending proposal, if any.
    #[must_use]
    pub const fn proposed_index(&self) -> Option<SelectedIndex> {
        self.proposed
    }

    /// Returns the proposal if there is one, else the committed selection.
    #[must_use]
    pub fn selected_index(&self) -> SelectedIndex {
        self.proposed.unwrap_or(self.selected)
    }

    /// Returns `true` if `index` is the selected position.
    #[must_use]
    pub fn is_item_index_selected(&self, index: usize) -> bool {
        self.selected_index() == SelectedIndex::Index(index)
    }

    /// Returns a counter bumped whenever the committed selection changes.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the selected item.
    ///
    /// A pending item proposal wins; otherwise the custom item (when custom
    /// selection is allowed) or the item at the selected position.
    #[must_use]
    pub fn selected_item<'a>(&'a self, items: &'a [T]) -> Option<&'a T> {
        if let Some(item) = &self.pending_item {
            return Some(item);
        }
        match self.selected_index() {
            SelectedIndex::Custom if self.policy.allow_custom_selected_item => {
                self.custom_item.as_ref()
            }
            SelectedIndex::Index(index) => items.get(index),
            SelectedIndex::Custom | SelectedIndex::Unselected => None,
        }
    }

    /// Records that the backing collection was replaced.
    ///
    /// Structural edits are ignored until the next commit, which re-validates
    /// the selection against the new collection.
    pub fn data_provider_replaced(&mut self) -> bool {
        self.flags |= CommitFlags::DATA_PROVIDER;
        self.wholesale = true;
        self.invalidate()
    }

    /// Sets whether a non-empty collection must always have a selection.
    ///
    /// Switching it on is re-validated at the next commit.
    pub fn set_require_selection(&mut self, value: bool) -> bool {
        if value == self.policy.require_selection {
            return false;
        }
        self.policy.require_selection = value;
        if value {
            self.flags |= CommitFlags::REQUIRE_SELECTION;
            self.invalidate()
        } else {
            false
        }
    }

    /// Sets whether items missing from the collection may be selected.
    pub fn set_allow_custom_selected_item(&mut self, value: bool) {
        self.policy.allow_custom_selected_item = value;
    }

    /// Requests a label refresh at the next commit.
    pub fn invalidate_labels(&mut self) -> bool {
        self.flags |= CommitFlags::LABELS;
        self.invalidate()
    }

    /// Proposes a new selected position.
    ///
    /// `user_driven` requests `changing`/`changed` notifications at commit; it
    /// stays requested until a commit consumes it. Proposing the current
    /// [`selected_index`](Self::selected_index) is a no-op.
    pub fn propose_index(&mut self, index: SelectedIndex, user_driven: bool) -> bool {
        if self.pending_item.is_none() && index == self.selected_index() {
            return false;
        }
        self.user_driven |= user_driven;
        self.pending_item = None;
        self.proposed = Some(index);
        self.invalidate()
    }

    /// Marks the container dirty and returns `true` on the `Clean → Dirty` edge.
    pub fn invalidate(&mut self) -> bool {
        if self.phase == CommitPhase::Clean {
            self.phase = CommitPhase::Dirty;
            true
        } else {
            false
        }
    }

    /// Shifts the selected position without reselecting.
    ///
    /// Writes the proposal if there is one, else the committed value. No
    /// renderer is notified; the next commit only emits `value_commit` (unless
    /// it also applies a new selection).
    pub fn adjust_selection(&mut self, index: SelectedIndex) -> bool {
        if self.proposed.is_some() {
            self.proposed = Some(index);
        } else if self.selected != index {
            self.selected = index;
            self.bump_revision();
        }
        self.flags |= CommitFlags::SELECTION_ADJUSTED;
        self.invalidate()
    }

    /// Reacts to an item inserted at `index`.
    ///
    /// Insertion at or before the selected position moves the selection with
    /// its item. Ignored during wholesale changes.
    pub fn item_added(&mut self, index: usize) -> bool {
        if self.wholesale {
            return false;
        }
        match self.selected_index() {
            SelectedIndex::Unselected if self.policy.require_selection => {
                self.adjust_selection(SelectedIndex::Index(index))
            }
            SelectedIndex::Index(selected) if index <= selected => {
                self.adjust_selection(SelectedIndex::Index(selected + 1))
            }
            _ => false,
        }
    }

    /// Reacts to the item at `index` being removed; `remaining` is the
    /// collection length after the removal.
    ///
    /// Removing the selected item selects index 0 when a selection is
    /// required and items remain, and clears the selection otherwise.
    /// Removal before the selection shifts it down. Ignored during wholesale
    /// changes.
    pub fn item_removed(&mut self, index: usize, remaining: usize) -> bool {
        if self.wholesale {
            return false;
        }
        let SelectedIndex::Index(selected) = self.selected_index() else {
            return false;
        };

        if index == selected {
            if self.policy.require_selection && remaining > 0 {
                if index == 0 {
                    // Same position, different item: force a re-commit.
                    self.pending_item = None;
                    self.proposed = Some(SelectedIndex::Index(0));
                    self.invalidate()
                } else {
                    self.propose_index(SelectedIndex::Index(0), false)
                }
            } else {
                self.adjust_selection(SelectedIndex::Unselected)
            }
        } else if index < selected {
            self.adjust_selection(SelectedIndex::Index(selected - 1))
        } else {
            false
        }
    }

    /// Applies a change notification from the backing collection.
    ///
    /// `len` is the collection length after the change.
    pub fn apply_collection_change(&mut self, change: CollectionChange, len: usize) -> bool {
        match change {
            CollectionChange::Add { location, count } => {
                let mut dirtied = false;
                for offset in 0..count {
                    dirtied |= self.item_added(location + offset);
                }
                dirtied
            }
            CollectionChange::Remove { location, count } => {
                let mut dirtied = false;
                for offset in (0..count).rev() {
                    dirtied |= self.item_removed(location + offset, len);
                }
                dirtied
            }
            CollectionChange::Move { from, to } => {
                let removed = self.item_removed(from, len);
                let added = self.item_added(to);
                removed | added
            }
            CollectionChange::Reset => {
                if len == 0 {
                    self.propose_index(SelectedIndex::Unselected, false)
                } else {
                    self.flags |= CommitFlags::DATA_PROVIDER;
                    self.invalidate()
                }
            }
            CollectionChange::Refresh => self.propose_index(SelectedIndex::Unselected, false),
        }
    }

    /// Re-sends the selected flag for the renderer at `index`.
    ///
    /// Call this when a renderer is recycled for a different item.
    pub fn sync_renderer(&self, index: usize, listener: &mut impl SelectionListener) {
        listener.item_selected(index, self.is_item_index_selected(index));
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<T> ListSelection<T>
where
    T: PartialEq,
{
    /// Proposes a new selected item.
    ///
    /// The item is looked up in the collection at commit. Proposing the
    /// current [`selected_item`](Self::selected_item) is a no-op.
    pub fn propose_item(&mut self, item: T, items: &[T], user_driven: bool) -> bool {
        if self.selected_item(items) == Some(&item) {
            return false;
        }
        self.user_driven |= user_driven;
        self.pending_item = Some(item);
        self.invalidate()
    }

    /// Resolves every pending change against `items`.
    ///
    /// In order: re-validate after a data source replacement, enforce a newly
    /// required selection, resolve a pending item to a position, commit the
    /// proposal, report an adjusted selection, and request a label refresh.
    pub fn commit(&mut self, items: &[T], listener: &mut impl SelectionListener) -> CommitOutcome {
        self.phase = CommitPhase::Committing;
        let len = items.len();
        let mut pending_custom = None;

        if self.flags.contains(CommitFlags::DATA_PROVIDER) {
            self.flags.remove(CommitFlags::DATA_PROVIDER);
            self.wholesale = false;

            match self.selected_index() {
                SelectedIndex::Index(index) if index < len => listener.item_selected(index, true),
                _ if self.policy.require_selection => {
                    self.proposed = Some(SelectedIndex::Index(0));
                }
                _ => {
                    self.propose_index(SelectedIndex::Unselected, false);
                }
            }
        }

        if self.flags.contains(CommitFlags::REQUIRE_SELECTION) {
            self.flags.remove(CommitFlags::REQUIRE_SELECTION);
            if self.policy.require_selection
                && self.selected_index() == SelectedIndex::Unselected
                && len > 0
            {
                self.proposed = Some(SelectedIndex::Index(0));
            }
        }

        if let Some(item) = self.pending_item.take() {
            let proposed = match items.iter().position(|candidate| *candidate == item) {
                Some(index) => SelectedIndex::Index(index),
                None if self.policy.allow_custom_selected_item => {
                    pending_custom = Some(item);
                    SelectedIndex::Custom
                }
                None => SelectedIndex::Unselected,
            };
            self.proposed = Some(proposed);
        }

        let selection = self.commit_proposal(len, pending_custom, listener, true);

        if self.flags.contains(CommitFlags::SELECTION_ADJUSTED) {
            self.flags.remove(CommitFlags::SELECTION_ADJUSTED);
            if selection != SelectionCommit::Applied {
                listener.value_commit();
            }
        }

        let labels_refreshed = self.flags.contains(CommitFlags::LABELS);
        if labels_refreshed {
            self.flags.remove(CommitFlags::LABELS);
            listener.labels_changed();
        }

        self.phase = CommitPhase::Clean;
        CommitOutcome {
            selection,
            labels_refreshed,
        }
    }

    /// Commits the pending proposal, if any.
    ///
    /// The proposal is clamped into the collection (a custom proposal is kept
    /// only when allowed). With `require_selection`, a proposal that would
    /// clear a non-empty collection selects index 0 instead. A user-driven
    /// proposal is offered to [`SelectionListener::changing`] first; a veto
    /// drops it and leaves the committed state untouched.
    ///
    /// With `dispatch_changed_events` unset, `changed` and `value_commit` are
    /// left to the caller.
    pub fn commit_selection(
        &mut self,
        items: &[T],
        listener: &mut impl SelectionListener,
        dispatch_changed_events: bool,
    ) -> SelectionCommit {
        self.commit_proposal(items.len(), None, listener, dispatch_changed_events)
    }

    fn commit_proposal(
        &mut self,
        len: usize,
        pending_custom: Option<T>,
        listener: &mut impl SelectionListener,
        dispatch_changed_events: bool,
    ) -> SelectionCommit {
        let Some(mut proposed) = self.proposed else {
            return SelectionCommit::Unchanged;
        };

        let keep_custom =
            self.policy.allow_custom_selected_item && proposed == SelectedIndex::Custom;
        if !keep_custom {
            proposed = match (proposed, len.checked_sub(1)) {
                (SelectedIndex::Index(index), Some(max)) => SelectedIndex::Index(index.min(max)),
                _ => SelectedIndex::Unselected,
            };
            if self.policy.require_selection && proposed == SelectedIndex::Unselected && len > 0
            {
                proposed = SelectedIndex::Index(0);
            }
        }

        let old = self.selected;
        if self.user_driven && !listener.changing(old, proposed) {
            if let SelectedIndex::Index(index) = proposed {
                listener.item_selected(index, false);
            }
            self.proposed = None;
            self.user_driven = false;
            #[cfg(feature = "tracing")]
            tracing::debug!(?old, ?proposed, "selection change vetoed");
            return SelectionCommit::Vetoed;
        }

        self.selected = proposed;
        self.proposed = None;
        if proposed == SelectedIndex::Custom {
            if pending_custom.is_some() {
                self.custom_item = pending_custom;
            }
        } else {
            self.custom_item = None;
        }
        if old != proposed {
            self.bump_revision();
        }

        if let SelectedIndex::Index(index) = old {
            listener.item_selected(index, false);
        }
        if let SelectedIndex::Index(index) = proposed {
            listener.item_selected(index, true);
        }

        if dispatch_changed_events {
            if self.user_driven {
                listener.changed(old, proposed);
                self.user_driven = false;
            }
            listener.value_commit();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(?old, new = ?proposed, "selection committed");
        SelectionCommit::Applied
    }
}
