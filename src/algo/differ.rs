//! Shadow tree differentiation
//!
//! Computes the ordered mutation list that turns the mounted view tree of an
//! old snapshot into the one of a new snapshot. This is a **pure algorithm
//! module**: it reads two immutable trees and returns data.
//!
//! # Algorithm
//!
//! 1. Match nodes by [`Tag`] (not by position)
//! 2. Prune pointer-identical subtrees without looking inside them
//! 3. Emit `Update` when props, state or layout of a matched pair differ
//! 4. Reconcile each child list with an LCS over tags (see `siblings`)
//!
//! # Complexity
//!
//! - Time: O(n log n) over all child lists (see `lcs`)
//! - Space: O(n) for the mutation list plus per-level scratch

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::error::{DiffError, DiffResult};
use crate::mutation::{Mutation, MutationList};
use crate::node::{ShadowNode, ShadowNodeFragment, ShadowView, SharedShadowNode};
use crate::tag::Tag;

/// Default maximum tree depth before the diff is rejected.
const DEFAULT_MAX_DIFF_DEPTH: usize = 500;

// =============================================================================
// Public Types
// =============================================================================

/// Configuration for the differ.
#[derive(Debug, Clone, Copy)]
pub struct DiffConfig {
    /// Maximum nesting depth the differ walks before failing with
    /// [`DiffError::DepthLimitExceeded`].
    /// Default: 500
    pub max_depth: usize,
    /// Emit one `RemoveDeleteTree` for a removed node that has descendants,
    /// instead of `Remove` + `Delete` for every node of the subtree.
    /// Default: true
    pub collapse_removed_subtrees: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DIFF_DEPTH,
            collapse_removed_subtrees: true,
        }
    }
}

impl DiffConfig {
    /// Create config with a custom depth limit.
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Config that tears removed subtrees down node by node.
    ///
    /// For mount layers without a `RemoveDeleteTree` primitive.
    pub fn expanded() -> Self {
        Self {
            collapse_removed_subtrees: false,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_collapse(mut self, collapse: bool) -> Self {
        self.collapse_removed_subtrees = collapse;
        self
    }
}

/// Statistics from a diff
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct DiffStats {
    /// Matched node pairs that were compared
    pub nodes_compared: usize,
    /// Matched node pairs skipped because they are the same allocation
    pub nodes_pruned: usize,
    /// Matched nodes that received an `Update`
    pub nodes_updated: usize,
    /// Matched nodes that changed position
    pub nodes_moved: usize,
    /// Nodes created (including descendants of new subtrees)
    pub nodes_created: usize,
    /// Nodes deleted (including descendants of removed subtrees)
    pub nodes_deleted: usize,
    /// Removed subtrees collapsed into one `RemoveDeleteTree`
    pub subtrees_collapsed: usize,
}

/// Result of [`diff_with_config`].
#[derive(Debug, Clone)]
#[must_use]
pub struct Diff {
    pub mutations: MutationList,
    pub stats: DiffStats,
}

impl Diff {
    /// Check if any changes were detected
    pub fn has_changes(&self) -> bool {
        !self.mutations.is_empty()
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Calculate the mutations that transform the view tree of `old` into the
/// view tree of `new`.
///
/// Both roots must carry the same tag. Neither tree is modified.
///
/// # Preconditions
///
/// A tag must appear at most once in each tree. Duplicates within one child
/// list, and tags created twice, are rejected with [`DiffError::DuplicateTag`].
/// A subtree shared by pointer between the two snapshots is never visited, so
/// a new node reusing a tag that lives inside such a subtree is not detected:
/// the differ emits a `Create` for a view that is already mounted.
///
/// # Example
///
/// ```
/// use shadow_diff::{calculate_mutations, ShadowNode, Tag};
///
/// let child = ShadowNode::new(Tag::from_raw(2), "View").into_shared();
/// let old = ShadowNode::new(Tag::from_raw(1), "Root");
/// let new = old.clone().with_children([child]);
///
/// let mutations = calculate_mutations(&old, &new).unwrap();
/// assert_eq!(mutations.len(), 2); // Create + Insert
/// ```
pub fn calculate_mutations(old: &ShadowNode, new: &ShadowNode) -> DiffResult<MutationList> {
    diff_with_config(old, new, DiffConfig::default()).map(|diff| diff.mutations)
}

/// Diff two snapshots with custom configuration, returning statistics too.
pub fn diff_with_config(
    old: &ShadowNode,
    new: &ShadowNode,
    config: DiffConfig,
) -> DiffResult<Diff> {
    let mut ctx = DiffContext::new(config);
    let result = ctx.diff_roots(old, new);

    match result {
        Ok(mutations) => {
            tracing::debug!(
                root = %new.tag(),
                mutations = mutations.len(),
                compared = ctx.stats.nodes_compared,
                pruned = ctx.stats.nodes_pruned,
                created = ctx.stats.nodes_created,
                deleted = ctx.stats.nodes_deleted,
                moved = ctx.stats.nodes_moved,
                "shadow tree diff complete"
            );
            Ok(Diff {
                mutations: MutationList::from(mutations),
                stats: ctx.stats,
            })
        }
        Err(err) => {
            tracing::warn!(root = %new.tag(), error = %err, "rejected malformed shadow tree");
            Err(err)
        }
    }
}

/// Mutations that mount every descendant of `root` onto a view tree holding
/// only the root view.
pub fn calculate_mount_mutations(root: &ShadowNode) -> DiffResult<MutationList> {
    let empty = root.clone_with(ShadowNodeFragment::new().children(std::iter::empty()));
    calculate_mutations(&empty, root)
}

/// Diff independent root pairs.
///
/// With the `parallel` feature the pairs are diffed on the rayon pool; results
/// keep the order of `pairs` either way.
pub fn calculate_mutations_batch(
    pairs: &[(SharedShadowNode, SharedShadowNode)],
    config: DiffConfig,
) -> Vec<DiffResult<MutationList>> {
    let diff_one = |(old, new): &(SharedShadowNode, SharedShadowNode)| {
        diff_with_config(old, new, config).map(|diff| diff.mutations)
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        pairs.par_iter().map(diff_one).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        pairs.iter().map(diff_one).collect()
    }
}

// =============================================================================
// Internal Context
// =============================================================================

pub(super) struct DiffContext {
    pub(super) config: DiffConfig,
    pub(super) depth: usize,
    pub(super) stats: DiffStats,
    /// Tags of every node created by this diff
    pub(super) created: FxHashSet<Tag>,
    /// Tags of every node deleted by this diff
    pub(super) deleted: FxHashSet<Tag>,
}

impl DiffContext {
    fn new(config: DiffConfig) -> Self {
        Self {
            config,
            depth: 0,
            stats: DiffStats::default(),
            created: FxHashSet::default(),
            deleted: FxHashSet::default(),
        }
    }

    fn diff_roots(&mut self, old: &ShadowNode, new: &ShadowNode) -> DiffResult<Vec<Mutation>> {
        if old.tag() != new.tag() {
            return Err(DiffError::RootTagMismatch {
                old: old.tag(),
                new: new.tag(),
            });
        }

        let mut mutations = Vec::new();

        if std::ptr::eq(old, new) {
            self.stats.nodes_pruned += 1;
            return Ok(mutations);
        }

        check_same_component(old, new)?;
        self.stats.nodes_compared += 1;

        if needs_update(old, new) {
            mutations.push(Mutation::Update {
                parent: None,
                view: ShadowView::new(new),
                index: None,
            });
            self.stats.nodes_updated += 1;
        }

        self.reconcile_children(&mut mutations, new.tag(), old.children(), new.children())?;
        self.check_reparenting()?;

        Ok(mutations)
    }

    /// Diff a matched pair found at `index` of `parent`'s new child list.
    ///
    /// The `Update` goes to `updates`; child-level mutations go to `downward`.
    pub(super) fn diff_pair(
        &mut self,
        updates: &mut Vec<Mutation>,
        downward: &mut Vec<Mutation>,
        parent: Tag,
        old: &SharedShadowNode,
        new: &SharedShadowNode,
        index: usize,
    ) -> DiffResult<()> {
        if Arc::ptr_eq(old, new) {
            self.stats.nodes_pruned += 1;
            return Ok(());
        }

        check_same_component(old, new)?;
        self.stats.nodes_compared += 1;

        if needs_update(old, new) {
            updates.push(Mutation::Update {
                parent: Some(parent),
                view: ShadowView::new(new),
                index: Some(index),
            });
            self.stats.nodes_updated += 1;
        }

        self.descend(new.tag(), |ctx| {
            ctx.reconcile_children(downward, new.tag(), old.children(), new.children())
        })
    }

    /// Run `f` one level deeper, enforcing the depth limit.
    pub(super) fn descend<F>(&mut self, tag: Tag, f: F) -> DiffResult<()>
    where
        F: FnOnce(&mut Self) -> DiffResult<()>,
    {
        if self.depth >= self.config.max_depth {
            return Err(DiffError::DepthLimitExceeded {
                tag,
                limit: self.config.max_depth,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// A tag both deleted and created moved to another parent.
    fn check_reparenting(&self) -> DiffResult<()> {
        match self.created.intersection(&self.deleted).min() {
            Some(&tag) => Err(DiffError::Reparented { tag }),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn check_same_component(old: &ShadowNode, new: &ShadowNode) -> DiffResult<()> {
    if old.component() != new.component() {
        return Err(DiffError::ComponentMismatch {
            tag: new.tag(),
            old: old.component().clone(),
            new: new.component().clone(),
        });
    }
    Ok(())
}

/// Whether the native view of a matched pair observes a change.
fn needs_update(old: &ShadowNode, new: &ShadowNode) -> bool {
    let props_equal = Arc::ptr_eq(old.props(), new.props()) || old.props() == new.props();
    let state_equal = match (old.state(), new.state()) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a == b,
        _ => false,
    };
    !(props_equal && state_equal && old.layout_metrics() == new.layout_metrics())
}

// =============================================================================
// Tests
// =============================================================================
