// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! List commit pass.
//!
//! Drive a small tree of list containers through a frame loop: input events
//! propose selections, mutators queue dirty lists in a `DepthQueue`, and one
//! `CommitPass` per frame commits them parents-first.
//!
//! Run:
//! - `cargo run -p understory_demos --example list_commit_pass`

use understory_depth_queue::{CommitPass, DepthQueue, InvalidationClient, PassOrder};
use understory_selection::{
    CollectionChange, ItemPointerKind, ListEvent, ListSelection, SelectedIndex, SelectionCommit,
    SelectionListener, SelectionPolicy,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct ListId {
    slot: usize,
    parent: Option<usize>,
    depth: usize,
}

struct Panel {
    id: ListId,
    name: &'static str,
    items: Vec<&'static str>,
    selection: ListSelection<&'static str>,
}

struct Ui {
    panels: Vec<Panel>,
    queue: DepthQueue<ListId>,
}

impl InvalidationClient for ListId {
    type Id = usize;

    fn id(&self) -> usize {
        self.slot
    }

    fn nest_level(&self) -> usize {
        self.depth
    }

    // Panels form a chain, so any shallower panel is an ancestor.
    fn is_ancestor_of(&self, other: &Self) -> bool {
        other.parent.is_some() && self.depth < other.depth
    }
}

/// Prints notifications and vetoes selecting any item named `locked`.
struct Console<'a> {
    panel: &'static str,
    items: &'a [&'static str],
}

impl SelectionListener for Console<'_> {
    fn changing(&mut self, old: SelectedIndex, new: SelectedIndex) -> bool {
        let allowed = new
            .index()
            .and_then(|i| self.items.get(i))
            .is_none_or(|item| *item != "locked");
        println!(
            "  [{}] changing {old:?} -> {new:?}{}",
            self.panel,
            if allowed { "" } else { " (vetoed)" }
        );
        allowed
    }

    fn changed(&mut self, old: SelectedIndex, new: SelectedIndex) {
        println!("  [{}] changed {old:?} -> {new:?}", self.panel);
    }

    fn labels_changed(&mut self) {
        println!("  [{}] labels refreshed", self.panel);
    }
}

const CATEGORIES: usize = 0;
const ITEMS: usize = 1;

impl Ui {
    fn new() -> Self {
        let categories = ListId {
            slot: CATEGORIES,
            parent: None,
            depth: 0,
        };
        let items = ListId {
            slot: ITEMS,
            parent: Some(CATEGORIES),
            depth: 1,
        };
        Self {
            panels: vec![
                Panel {
                    id: categories,
                    name: "categories",
                    items: vec!["tools", "fruit", "locked"],
                    selection: ListSelection::new(SelectionPolicy::default()),
                },
                Panel {
                    id: items,
                    name: "items",
                    items: vec![],
                    selection: ListSelection::new(SelectionPolicy::REQUIRED),
                },
            ],
            queue: DepthQueue::new(),
        }
    }

    fn mark(&mut self, slot: usize, dirtied: bool) {
        if dirtied {
            self.queue.insert(self.panels[slot].id);
        }
    }

    fn contents(category: &str) -> Vec<&'static str> {
        match category {
            "tools" => vec!["hammer", "saw"],
            "fruit" => vec!["apple", "pear", "plum"],
            _ => vec![],
        }
    }

    fn commit_panel(panels: &mut [Panel], id: ListId, queue: &mut DepthQueue<ListId>) {
        let panel = &mut panels[id.slot];
        let mut console = Console {
            panel: panel.name,
            items: &panel.items,
        };
        let outcome = panel.selection.commit(&panel.items, &mut console);

        if id.slot == CATEGORIES && outcome.selection == SelectionCommit::Applied {
            let category = panel.selection.selected_item(&panel.items).copied();
            let child = &mut panels[ITEMS];
            child.items = category.map(Self::contents).unwrap_or_default();
            if child.selection.data_provider_replaced() {
                queue.insert(child.id);
            }
        }
    }

    fn frame(&mut self, label: &str) {
        println!("frame: {label}");
        let Self { panels, queue } = self;
        match CommitPass::new(PassOrder::ShallowestFirst)
            .with_budget(16)
            .run(queue, |id, queue| Self::commit_panel(panels, id, queue))
        {
            Ok(stats) => println!(
                "  committed {} panel(s), {} cascaded",
                stats.committed, stats.cascaded
            ),
            Err(err) => println!("  pass stopped: {err}"),
        }
        for panel in &self.panels {
            println!(
                "  {:<10} -> {:?}",
                panel.name,
                panel.selection.selected_item(&panel.items)
            );
        }
    }
}

fn main() {
    let mut ui = Ui::new();

    // Click on "fruit": the categories list proposes, the items list follows.
    let dirtied = ui.panels[CATEGORIES]
        .selection
        .propose_index(SelectedIndex::Index(1), true);
    ui.mark(CATEGORIES, dirtied);
    ui.frame("select fruit");

    // Hovering resolves the renderer position against the data.
    let hover = ListEvent::from_pointer(ItemPointerKind::RollOver, 2, &ui.panels[ITEMS].items);
    println!("hover: {:?} on {:?}", hover.kind, hover.item);

    // An item is inserted in front of the selection: the index shifts.
    let panel = &mut ui.panels[ITEMS];
    panel.items.insert(0, "banana");
    let dirtied = panel.selection.apply_collection_change(
        CollectionChange::Add {
            location: 0,
            count: 1,
        },
        panel.items.len(),
    );
    ui.mark(ITEMS, dirtied);
    ui.frame("insert banana");

    // The listener vetoes "locked"; nothing cascades.
    let panel = &mut ui.panels[CATEGORIES];
    let dirtied = panel.selection.propose_item("locked", &panel.items, true);
    ui.mark(CATEGORIES, dirtied);
    ui.frame("select locked");

    // Programmatic changes skip the veto.
    let dirtied = ui.panels[CATEGORIES]
        .selection
        .propose_index(SelectedIndex::Index(0), false);
    ui.mark(CATEGORIES, dirtied);
    ui.frame("select tools");
}
