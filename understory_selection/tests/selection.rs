// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_selection` crate.
//!
//! These drive `ListSelection<T>` containers through an
//! `understory_depth_queue` commit pass, the way a UI frame loop would.

use understory_depth_queue::{CommitPass, DepthQueue, InvalidationClient, PassOrder};
use understory_selection::{
    EventLog, ListSelection, SelectedIndex, SelectionCommit, SelectionEvent, SelectionPolicy,
};

#[derive(Clone, Debug, PartialEq)]
struct Handle {
    slot: usize,
    ancestors: Vec<usize>,
}

impl InvalidationClient for Handle {
    type Id = usize;

    fn id(&self) -> usize {
        self.slot
    }

    fn nest_level(&self) -> usize {
        self.ancestors.len()
    }

    fn is_ancestor_of(&self, other: &Self) -> bool {
        other.ancestors.contains(&self.slot)
    }
}

struct ListNode {
    handle: Handle,
    items: Vec<&'static str>,
    selection: ListSelection<&'static str>,
    log: EventLog,
}

/// A master list whose selection picks the items of a detail list.
struct Scene {
    nodes: Vec<ListNode>,
}

const MASTER: usize = 0;
const DETAIL: usize = 1;

impl Scene {
    fn new(detail_policy: SelectionPolicy) -> Self {
        let master = Handle {
            slot: MASTER,
            ancestors: vec![],
        };
        let detail = Handle {
            slot: DETAIL,
            ancestors: vec![MASTER],
        };
        Self {
            nodes: vec![
                ListNode {
                    handle: master,
                    items: vec!["fruit", "veg"],
                    selection: ListSelection::new(SelectionPolicy::default()),
                    log: EventLog::new(),
                },
                ListNode {
                    handle: detail,
                    items: vec![],
                    selection: ListSelection::new(detail_policy),
                    log: EventLog::new(),
                },
            ],
        }
    }

    fn detail_items_for(category: &str) -> Vec<&'static str> {
        match category {
            "fruit" => vec!["apple", "pear", "plum"],
            "veg" => vec!["leek", "kale"],
            _ => vec![],
        }
    }

    fn commit(&mut self, handle: Handle, queue: &mut DepthQueue<Handle>) {
        let node = &mut self.nodes[handle.slot];
        let outcome = node.selection.commit(&node.items, &mut node.log);

        if handle.slot == MASTER && outcome.selection == SelectionCommit::Applied {
            let category = node.selection.selected_item(&node.items).copied();
            let detail = &mut self.nodes[DETAIL];
            detail.items = category.map(Self::detail_items_for).unwrap_or_default();
            if detail.selection.data_provider_replaced() {
                queue.insert(detail.handle.clone());
            }
        }
    }
}

#[test]
fn master_commit_cascades_into_detail_in_same_pass() {
    let mut scene = Scene::new(SelectionPolicy::REQUIRED);
    let mut queue = DepthQueue::new();

    let master = &mut scene.nodes[MASTER];
    if master.selection.propose_index(SelectedIndex::Index(1), true) {
        queue.insert(master.handle.clone());
    }

    let stats = CommitPass::new(PassOrder::ShallowestFirst)
        .run(&mut queue, |handle, queue| scene.commit(handle, queue))
        .unwrap();

    assert_eq!(stats.committed, 2);
    assert_eq!(stats.cascaded, 1);
    assert!(queue.is_empty());

    let detail = &scene.nodes[DETAIL];
    assert_eq!(detail.items, ["leek", "kale"]);
    assert_eq!(detail.selection.committed_index(), SelectedIndex::Index(0));
    assert_eq!(detail.selection.selected_item(&detail.items), Some(&"leek"));
}

#[test]
fn vetoed_master_change_leaves_detail_untouched() {
    let mut scene = Scene::new(SelectionPolicy::default());
    let mut queue = DepthQueue::new();

    let master = &mut scene.nodes[MASTER];
    master.log.veto = true;
    if master.selection.propose_index(SelectedIndex::Index(0), true) {
        queue.insert(master.handle.clone());
    }

    let stats = CommitPass::default()
        .run(&mut queue, |handle, queue| scene.commit(handle, queue))
        .unwrap();

    assert_eq!(stats.committed, 1);
    let master = &scene.nodes[MASTER];
    assert_eq!(master.selection.committed_index(), SelectedIndex::Unselected);
    assert_eq!(
        master.log.events.first(),
        Some(&SelectionEvent::Changing {
            old: SelectedIndex::Unselected,
            new: SelectedIndex::Index(0),
        })
    );
    assert!(scene.nodes[DETAIL].items.is_empty());
    assert!(!scene.nodes[DETAIL].selection.is_dirty());
}

#[test]
fn subtree_pass_commits_only_detail() {
    let mut scene = Scene::new(SelectionPolicy::default());
    let mut queue = DepthQueue::new();

    for slot in [MASTER, DETAIL] {
        let node = &mut scene.nodes[slot];
        if node.selection.invalidate_labels() {
            queue.insert(node.handle.clone());
        }
    }

    let detail_handle = scene.nodes[DETAIL].handle.clone();
    CommitPass::default()
        .run_subtree(&mut queue, &detail_handle, |handle, queue| {
            scene.commit(handle, queue);
        })
        .unwrap();

    assert!(!scene.nodes[DETAIL].selection.is_dirty());
    assert_eq!(
        scene.nodes[DETAIL].log.events,
        [SelectionEvent::LabelsChanged]
    );
    assert!(scene.nodes[MASTER].selection.is_dirty());
    assert_eq!(queue.len(), 1);
}

#[test]
fn repeated_proposals_queue_the_container_once() {
    let mut scene = Scene::new(SelectionPolicy::default());
    let mut queue = DepthQueue::new();

    let master = &mut scene.nodes[MASTER];
    for index in [0, 1, 0] {
        if master.selection.propose_index(SelectedIndex::Index(index), false) {
            queue.insert(master.handle.clone());
        }
        // Re-inserting an already queued client is harmless too.
        queue.insert(master.handle.clone());
    }
    assert_eq!(queue.len(), 1);

    CommitPass::default()
        .run(&mut queue, |handle, queue| scene.commit(handle, queue))
        .unwrap();
    assert_eq!(
        scene.nodes[MASTER].selection.committed_index(),
        SelectedIndex::Index(0)
    );
    assert_eq!(scene.nodes[DETAIL].items, ["apple", "pear", "plum"]);
}
