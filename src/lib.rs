//! shadow-diff - Shadow tree differentiation for native view mounting
//!
//! ## Core Concepts
//!
//! **Immutable snapshots**: a UI is described by a tree of `Arc`-shared
//! [`ShadowNode`]s. A commit produces a new root; unchanged subtrees are the
//! same allocations as in the previous snapshot.
//!
//! **Tag identity**: nodes are matched across snapshots by [`Tag`], so a
//! reordered child keeps its native view (scroll offset, focus, animations).
//!
//! **Ordered mutations**: the differ emits a [`MutationList`] whose order is
//! safe to apply step by step against a live view hierarchy.
//!
//! ## Modules
//! - `node`: ShadowNode, ShadowNodeFragment, ShadowView
//! - `algo`: the differ, sibling reconciliation, LCS move detection
//! - `mutation`: Mutation and MutationList
//! - `stub`: in-memory view tree that applies and validates mutations
//! - `tree`: committed root holder
//!
//! ## Usage
//!
//! ```
//! use shadow_diff::{calculate_mutations, Mutation, ShadowNode, Tag};
//!
//! let leaf = |tag| ShadowNode::new(Tag::from_raw(tag), "View").into_shared();
//! let old = ShadowNode::new(Tag::from_raw(1), "Root").with_children([leaf(2), leaf(3)]);
//! let new = ShadowNode::new(Tag::from_raw(1), "Root").with_children([leaf(3), leaf(4)]);
//!
//! let mutations = calculate_mutations(&old, &new).unwrap();
//! assert!(matches!(mutations[0], Mutation::Remove { index: 0, .. }));
//! ```

#[macro_use]
mod macros;

/// Stable node identity
pub mod tag;

/// Props and state payloads
pub mod props;

/// Layout metrics
pub mod layout;

/// Node types: ShadowNode, ShadowNodeFragment, ShadowView
pub mod node;

/// Mutation records
pub mod mutation;

/// Algorithms: differ, sibling reconciliation, lcs
pub mod algo;

/// Error types
pub mod error;

/// In-memory view tree for applying mutations
pub mod stub;

/// Committed shadow tree holder
pub mod tree;

/// Debug rendering of mutation lists
pub mod render;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Identity
pub use tag::{Tag, TagAllocator};

// Node types
pub use node::{
    ComponentName, ShadowNode, ShadowNodeFragment, ShadowNodeList, ShadowView, SharedShadowNode,
};

// Payloads
pub use layout::LayoutMetrics;
pub use props::{PropValue, Props, PropsExt, SharedProps, SharedState, State};

// Mutations
pub use mutation::{Mutation, MutationKind, MutationList};

// Algorithms
pub use algo::{
    calculate_mount_mutations, calculate_mutations, calculate_mutations_batch, diff_with_config,
    Diff, DiffConfig, DiffStats,
};

// Error types
pub use error::{ApplyError, ApplyResult, DiffError, DiffResult};

// Stub and tree
pub use stub::{StubView, StubViewTree};
pub use tree::ShadowTree;

// Render
pub use render::render_mutations;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_types_are_thread_safe() {
        static_assertions::assert_impl_all!(ShadowNode: Send, Sync);
        static_assertions::assert_impl_all!(Mutation: Send, Sync);
        static_assertions::assert_impl_all!(MutationList: Send, Sync);
        static_assertions::assert_impl_all!(ShadowTree: Send, Sync);
    }

    #[test]
    fn test_diff_on_other_thread() {
        let old = ShadowNode::new(Tag::from_raw(1), "Root").into_shared();
        let new = old
            .clone_with(ShadowNodeFragment::new().children([
                ShadowNode::new(Tag::from_raw(2), "View").into_shared(),
            ]))
            .into_shared();

        let handle = std::thread::spawn(move || calculate_mutations(&old, &new));
        let mutations = handle.join().unwrap().unwrap();
        assert_eq!(mutations.count(MutationKind::Create), 1);
        assert_eq!(mutations.count(MutationKind::Insert), 1);
    }
}
