// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping from renderer pointer events to list item events.

/// Pointer transitions observed on an item renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemPointerKind {
    /// The pointer entered the renderer.
    RollOver,
    /// The pointer left the renderer.
    RollOut,
}

/// Item-level events a list emits for its renderers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListEventKind {
    /// The pointer entered an item.
    ItemRollOver,
    /// The pointer left an item.
    ItemRollOut,
}

/// Returns the list event emitted for a renderer pointer transition.
#[must_use]
pub const fn list_event_kind(kind: ItemPointerKind) -> ListEventKind {
    match kind {
        ItemPointerKind::RollOver => ListEventKind::ItemRollOver,
        ItemPointerKind::RollOut => ListEventKind::ItemRollOut,
    }
}

/// An item event resolved against the backing collection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ListEvent<'a, T> {
    /// What happened.
    pub kind: ListEventKind,
    /// Position of the item's renderer.
    pub item_index: usize,
    /// The data item at `item_index`, if it is in range.
    pub item: Option<&'a T>,
}

impl<'a, T> ListEvent<'a, T> {
    /// Builds the list event for a pointer transition on the renderer at `item_index`.
    #[must_use]
    pub fn from_pointer(kind: ItemPointerKind, item_index: usize, items: &'a [T]) -> Self {
        Self {
            kind: list_event_kind(kind),
            item_index,
            item: items.get(item_index),
        }
    }
}
