// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Commit pass driver: drain a [`DepthQueue`] in depth order.

use core::fmt;

use crate::client::InvalidationClient;
use crate::queue::DepthQueue;

/// Which end of the depth range a pass drains from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum PassOrder {
    /// Parents before children, via [`DepthQueue::shift`].
    ///
    /// Used for top-down passes such as property commits.
    #[default]
    ShallowestFirst,
    /// Children before parents, via [`DepthQueue::pop`].
    ///
    /// Used for bottom-up passes such as measurement.
    DeepestFirst,
}

/// Summary of a completed pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Number of clients handed to the commit callback.
    pub committed: usize,
    /// Net number of clients queued by commit callbacks during the pass.
    pub cascaded: usize,
}

/// Error returned when a pass stops before its queue is drained.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PassError {
    /// The commit budget ran out while clients were still queued.
    ///
    /// This usually means a commit keeps re-queueing clients without
    /// clearing their dirty state.
    BudgetExhausted {
        /// Number of clients committed before stopping.
        committed: usize,
        /// Number of clients still queued (for subtree passes, in the whole queue).
        remaining: usize,
    },
}

impl fmt::Display for PassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BudgetExhausted {
                committed,
                remaining,
            } => write!(
                f,
                "commit budget exhausted after {committed} commits with {remaining} clients still queued"
            ),
        }
    }
}

impl core::error::Error for PassError {}

/// Configuration for draining a [`DepthQueue`].
///
/// A pass repeatedly takes one client from the queue and hands it to a commit
/// callback together with the queue itself, so a commit may queue further
/// clients (for example children whose derived state must also flush). The
/// pass re-checks the queue after every commit and observes those inserts.
///
/// # Example
///
/// ```
/// use understory_depth_queue::{CommitPass, DepthQueue, InvalidationClient, PassOrder};
///
/// #[derive(Clone, Debug)]
/// struct Widget(u32, usize);
///
/// impl InvalidationClient for Widget {
///     type Id = u32;
///     fn id(&self) -> u32 {
///         self.0
///     }
///     fn nest_level(&self) -> usize {
///         self.1
///     }
///     fn is_ancestor_of(&self, _other: &Self) -> bool {
///         false
///     }
/// }
///
/// let mut queue = DepthQueue::new();
/// queue.insert(Widget(1, 0));
///
/// let mut order = Vec::new();
/// let stats = CommitPass::new(PassOrder::ShallowestFirst)
///     .run(&mut queue, |widget, queue| {
///         order.push(widget.0);
///         // Committing the parent dirties a child.
///         if widget.0 == 1 {
///             queue.insert(Widget(2, 1));
///         }
///     })
///     .unwrap();
///
/// assert_eq!(order, [1, 2]);
/// assert_eq!(stats.committed, 2);
/// assert!(queue.is_empty());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CommitPass {
    order: PassOrder,
    budget: usize,
}

impl Default for CommitPass {
    fn default() -> Self {
        Self::new(PassOrder::default())
    }
}

impl CommitPass {
    /// Creates a pass draining in `order` with no commit limit.
    #[must_use]
    pub const fn new(order: PassOrder) -> Self {
        Self {
            order,
            budget: usize::MAX,
        }
    }

    /// Limits the number of commits a single run may perform.
    #[must_use]
    pub const fn with_budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    /// Returns the drain order.
    #[must_use]
    pub const fn order(&self) -> PassOrder {
        self.order
    }

    /// Returns the commit budget.
    #[must_use]
    pub const fn budget(&self) -> usize {
        self.budget
    }

    /// Drains `queue` until it is empty, calling `commit` for each client.
    ///
    /// # Errors
    ///
    /// Returns [`PassError::BudgetExhausted`] if the budget runs out before
    /// the queue is empty. Clients still queued are left in place.
    pub fn run<C, F>(&self, queue: &mut DepthQueue<C>, commit: F) -> Result<PassStats, PassError>
    where
        C: InvalidationClient,
        F: FnMut(C, &mut DepthQueue<C>),
    {
        let order = self.order;
        self.drive(queue, commit, |queue| match order {
            PassOrder::ShallowestFirst => queue.shift(),
            PassOrder::DeepestFirst => queue.pop(),
        })
    }

    /// Drains only `ancestor` and its queued descendants.
    ///
    /// This validates one subtree synchronously without touching unrelated
    /// queued clients. Shallowest-first uses
    /// [`DepthQueue::remove_smallest_child`], deepest-first uses
    /// [`DepthQueue::remove_largest_child`].
    ///
    /// # Errors
    ///
    /// Returns [`PassError::BudgetExhausted`] if the budget runs out while
    /// the queue is not empty.
    pub fn run_subtree<C, F>(
        &self,
        queue: &mut DepthQueue<C>,
        ancestor: &C,
        commit: F,
    ) -> Result<PassStats, PassError>
    where
        C: InvalidationClient,
        F: FnMut(C, &mut DepthQueue<C>),
    {
        let order = self.order;
        self.drive(queue, commit, |queue| match order {
            PassOrder::ShallowestFirst => queue.remove_smallest_child(ancestor),
            PassOrder::DeepestFirst => queue.remove_largest_child(ancestor),
        })
    }

    fn drive<C, F, T>(
        &self,
        queue: &mut DepthQueue<C>,
        mut commit: F,
        mut take: T,
    ) -> Result<PassStats, PassError>
    where
        C: InvalidationClient,
        F: FnMut(C, &mut DepthQueue<C>),
        T: FnMut(&mut DepthQueue<C>) -> Option<C>,
    {
        let mut stats = PassStats::default();
        loop {
            if stats.committed == self.budget {
                if queue.is_empty() {
                    break;
                }
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    committed = stats.committed,
                    remaining = queue.len(),
                    "commit pass over budget"
                );
                return Err(PassError::BudgetExhausted {
                    committed: stats.committed,
                    remaining: queue.len(),
                });
            }

            let Some(client) = take(queue) else {
                break;
            };

            #[cfg(feature = "tracing")]
            tracing::trace!(depth = client.nest_level(), "commit");

            let before = queue.len();
            commit(client, queue);
            stats.committed += 1;
            stats.cascaded += queue.len().saturating_sub(before);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            committed = stats.committed,
            cascaded = stats.cascaded,
            order = ?self.order,
            "commit pass complete"
        );
        Ok(stats)
    }
}
