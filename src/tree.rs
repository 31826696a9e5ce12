//! Committed shadow tree holder.
//!
//! A `ShadowTree` owns the last committed root of one surface. Committing a
//! new root diffs it against the current one and swaps it in; the caller
//! forwards the returned mutations to its mount layer. When to commit is the
//! caller's decision.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::algo::{diff_with_config, DiffConfig};
use crate::error::{DiffError, DiffResult};
use crate::mutation::MutationList;
use crate::node::SharedShadowNode;
use crate::tag::Tag;

#[derive(Debug)]
struct Committed {
    root: SharedShadowNode,
    revision: u64,
}

/// Thread-safe holder of the committed root.
///
/// Uses `parking_lot::RwLock`: readers take cheap snapshots of the root while
/// commits are serialized, so every diff runs against the latest root.
#[derive(Debug)]
pub struct ShadowTree {
    root_tag: Tag,
    config: DiffConfig,
    inner: RwLock<Committed>,
}

impl ShadowTree {
    /// Create a tree at revision 0 with `root` committed.
    pub fn new(root: SharedShadowNode) -> Self {
        Self::with_config(root, DiffConfig::default())
    }

    pub fn with_config(root: SharedShadowNode, config: DiffConfig) -> Self {
        Self {
            root_tag: root.tag(),
            config,
            inner: RwLock::new(Committed { root, revision: 0 }),
        }
    }

    pub fn root_tag(&self) -> Tag {
        self.root_tag
    }

    /// Snapshot of the committed root.
    pub fn root(&self) -> SharedShadowNode {
        Arc::clone(&self.inner.read().root)
    }

    /// Number of successful commits that changed the root.
    pub fn revision(&self) -> u64 {
        self.inner.read().revision
    }

    /// Commit `new_root`, returning the mutations from the previous root.
    ///
    /// On error the committed root is left unchanged. Committing the current
    /// root again is a no-op that keeps the revision.
    pub fn commit(&self, new_root: SharedShadowNode) -> DiffResult<MutationList> {
        self.commit_with(|_| new_root)
    }

    /// Derive the new root from the committed one and commit it atomically.
    ///
    /// `transaction` runs under the write lock and must not call back into
    /// this tree.
    pub fn commit_with<F>(&self, transaction: F) -> DiffResult<MutationList>
    where
        F: FnOnce(&SharedShadowNode) -> SharedShadowNode,
    {
        let mut committed = self.inner.write();
        let new_root = transaction(&committed.root);

        if new_root.tag() != self.root_tag {
            return Err(DiffError::RootTagMismatch {
                old: self.root_tag,
                new: new_root.tag(),
            });
        }

        if Arc::ptr_eq(&committed.root, &new_root) {
            return Ok(MutationList::new());
        }

        let diff = diff_with_config(&committed.root, &new_root, self.config)?;
        committed.root = new_root;
        committed.revision += 1;

        tracing::debug!(
            root = %self.root_tag,
            revision = committed.revision,
            mutations = diff.mutations.len(),
            "committed shadow tree"
        );

        Ok(diff.mutations)
    }

    /// Mutations mounting the committed root onto an empty surface.
    pub fn mount_mutations(&self) -> DiffResult<MutationList> {
        crate::algo::calculate_mount_mutations(&self.root())
    }
}
