// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selected-index values and container configuration.

/// The selected position of a list container.
///
/// A pending proposal is held as `Option<SelectedIndex>`, so "no proposal"
/// (`None`) can never be confused with a proposal to deselect
/// (`Some(SelectedIndex::Unselected)`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum SelectedIndex {
    /// Nothing is selected.
    #[default]
    Unselected,
    /// A custom item that is not part of the backing collection is selected.
    ///
    /// Only kept when [`SelectionPolicy::allow_custom_selected_item`] is set.
    Custom,
    /// The item at this position in the backing collection is selected.
    Index(usize),
}

impl SelectedIndex {
    /// Returns the position if this is [`SelectedIndex::Index`].
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(index),
            Self::Unselected | Self::Custom => None,
        }
    }

    /// Returns `true` unless this is [`SelectedIndex::Unselected`].
    #[must_use]
    pub const fn is_selected(self) -> bool {
        !matches!(self, Self::Unselected)
    }
}

/// Configuration of a list container's selection rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct SelectionPolicy {
    /// When set, a non-empty collection always has a selected index in
    /// `0..len`.
    pub require_selection: bool,
    /// When set, proposing an item missing from the collection selects it as
    /// [`SelectedIndex::Custom`] instead of clearing the selection.
    pub allow_custom_selected_item: bool,
}

impl SelectionPolicy {
    /// A policy that requires a selection whenever items exist.
    pub const REQUIRED: Self = Self {
        require_selection: true,
        allow_custom_selected_item: false,
    };
}
