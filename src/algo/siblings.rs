//! Sibling list reconciliation
//!
//! Reconciles one parent's old and new child lists:
//!
//! - Kept (on the LCS of tags): recurse only
//! - Moved (same tag, off the LCS): `Remove` at the old index, `Insert` at the
//!   new index, recurse
//! - Old only: `Remove` + `Delete`, or one `RemoveDeleteTree` for a node with
//!   descendants
//! - New only: `Create` + `Insert`, creating all descendants
//!
//! # Output order for one parent
//!
//! ```text
//! [destructive descendant teardown]
//! [Update ...]
//! [Remove / RemoveDeleteTree ...]   descending old index
//! [Delete ...]
//! [Create ...]
//! [descendant mutations ...]
//! [Insert ...]                      ascending new index
//! ```
//!
//! Removing in descending old index never shifts a slot that is still to be
//! removed. After all removals the remaining children are exactly the kept
//! ones, already in new order, so inserting in ascending new index lands every
//! child at its final position.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::error::{DiffError, DiffResult};
use crate::mutation::Mutation;
use crate::node::{ShadowNode, ShadowView, SharedShadowNode};
use crate::tag::Tag;

use super::differ::DiffContext;
use super::lcs::{diff_indexed_sequences, Edit, TagIndex};

/// Mutations addressing one child slot, keyed by the slot index.
type SlotMutations = SmallVec<[(usize, Mutation); 4]>;

/// Per-level output buckets, flushed in safe application order.
#[derive(Default)]
struct Buckets {
    destructive: Vec<Mutation>,
    updates: Vec<Mutation>,
    removes: SlotMutations,
    deletes: Vec<Mutation>,
    creates: Vec<Mutation>,
    downward: Vec<Mutation>,
    inserts: SlotMutations,
}

impl Buckets {
    fn flush_into(mut self, out: &mut Vec<Mutation>) {
        self.removes.sort_by(|a, b| b.0.cmp(&a.0));
        self.inserts.sort_by_key(|(index, _)| *index);

        out.reserve(
            self.destructive.len()
                + self.updates.len()
                + self.removes.len()
                + self.deletes.len()
                + self.creates.len()
                + self.downward.len()
                + self.inserts.len(),
        );
        out.append(&mut self.destructive);
        out.append(&mut self.updates);
        out.extend(self.removes.into_iter().map(|(_, m)| m));
        out.append(&mut self.deletes);
        out.append(&mut self.creates);
        out.append(&mut self.downward);
        out.extend(self.inserts.into_iter().map(|(_, m)| m));
    }
}

impl DiffContext {
    /// Reconcile the children of `parent`, appending mutations to `out`.
    pub(super) fn reconcile_children(
        &mut self,
        out: &mut Vec<Mutation>,
        parent: Tag,
        old_children: &[SharedShadowNode],
        new_children: &[SharedShadowNode],
    ) -> DiffResult<()> {
        if old_children.is_empty() && new_children.is_empty() {
            return Ok(());
        }

        // Shared or element-wise identical child lists
        if std::ptr::eq(old_children, new_children)
            || (old_children.len() == new_children.len()
                && old_children.iter().zip(new_children).all(|(o, n)| Arc::ptr_eq(o, n)))
        {
            self.stats.nodes_pruned += old_children.len();
            return Ok(());
        }

        let (old_tags, old_index) = index_children(parent, old_children)?;
        let (new_tags, new_index) = index_children(parent, new_children)?;

        let lcs = diff_indexed_sequences(&old_tags, &new_tags, &old_index, &new_index);

        tracing::trace!(
            parent = %parent,
            old = old_children.len(),
            new = new_children.len(),
            kept = lcs.stats.kept,
            moved = lcs.stats.moved,
            inserted = lcs.stats.inserted,
            deleted = lcs.stats.deleted,
            "reconciling children"
        );

        let mut buckets = Buckets::default();

        for edit in &lcs.edits {
            match *edit {
                Edit::Keep { old_idx, new_idx } => {
                    self.diff_pair(
                        &mut buckets.updates,
                        &mut buckets.downward,
                        parent,
                        &old_children[old_idx],
                        &new_children[new_idx],
                        new_idx,
                    )?;
                }
                Edit::Move { old_idx, new_idx } => {
                    let old = &old_children[old_idx];
                    let new = &new_children[new_idx];
                    buckets.removes.push((
                        old_idx,
                        Mutation::Remove {
                            parent,
                            view: ShadowView::new(old),
                            index: old_idx,
                        },
                    ));
                    buckets.inserts.push((
                        new_idx,
                        Mutation::Insert {
                            parent,
                            view: ShadowView::new(new),
                            index: new_idx,
                        },
                    ));
                    self.stats.nodes_moved += 1;
                    self.diff_pair(
                        &mut buckets.updates,
                        &mut buckets.downward,
                        parent,
                        old,
                        new,
                        new_idx,
                    )?;
                }
                Edit::Delete { old_idx } => {
                    self.remove_subtree(&mut buckets, parent, &old_children[old_idx], old_idx)?;
                }
                Edit::Insert { new_idx } => {
                    let new = &new_children[new_idx];
                    self.create_subtree(&mut buckets.creates, &mut buckets.downward, parent, new)?;
                    buckets.inserts.push((
                        new_idx,
                        Mutation::Insert {
                            parent,
                            view: ShadowView::new(new),
                            index: new_idx,
                        },
                    ));
                }
            }
        }

        buckets.flush_into(out);
        Ok(())
    }

    /// Schedule removal of an old-only child and everything below it.
    fn remove_subtree(
        &mut self,
        buckets: &mut Buckets,
        parent: Tag,
        node: &ShadowNode,
        index: usize,
    ) -> DiffResult<()> {
        self.deleted.insert(node.tag());
        self.stats.nodes_deleted += 1;

        if self.config.collapse_removed_subtrees && node.has_children() {
            for descendant in node.descendants() {
                self.deleted.insert(descendant.tag());
                self.stats.nodes_deleted += 1;
            }
            self.stats.subtrees_collapsed += 1;
            buckets.removes.push((
                index,
                Mutation::RemoveDeleteTree {
                    parent,
                    view: ShadowView::new(node),
                    index,
                },
            ));
            return Ok(());
        }

        let view = ShadowView::new(node);
        buckets.removes.push((
            index,
            Mutation::Remove {
                parent,
                view: view.clone(),
                index,
            },
        ));
        buckets.deletes.push(Mutation::Delete { view });

        if node.has_children() {
            let destructive = &mut buckets.destructive;
            self.descend(node.tag(), |ctx| {
                ctx.reconcile_children(destructive, node.tag(), node.children(), &[])
            })?;
        }
        Ok(())
    }

    /// Schedule creation of a new-only child and everything below it.
    fn create_subtree(
        &mut self,
        creates: &mut Vec<Mutation>,
        downward: &mut Vec<Mutation>,
        parent: Tag,
        node: &ShadowNode,
    ) -> DiffResult<()> {
        if !self.created.insert(node.tag()) {
            return Err(DiffError::DuplicateTag {
                parent,
                tag: node.tag(),
            });
        }
        self.stats.nodes_created += 1;
        creates.push(Mutation::Create {
            view: ShadowView::new(node),
        });

        if node.has_children() {
            self.descend(node.tag(), |ctx| {
                ctx.reconcile_children(downward, node.tag(), &[], node.children())
            })?;
        }
        Ok(())
    }
}

/// Collect the tags of a child list and their positions, rejecting duplicates.
fn index_children(
    parent: Tag,
    children: &[SharedShadowNode],
) -> DiffResult<(SmallVec<[Tag; 8]>, TagIndex)> {
    let mut tags = SmallVec::with_capacity(children.len());
    let mut index = TagIndex::default();
    index.reserve(children.len());

    for (i, child) in children.iter().enumerate() {
        let tag = child.tag();
        if index.insert(tag, i).is_some() {
            return Err(DiffError::DuplicateTag { parent, tag });
        }
        tags.push(tag);
    }

    Ok((tags, index))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::algo::{calculate_mutations, diff_with_config, DiffConfig};
    use crate::mutation::{MutationKind, MutationList};
    use crate::node::ShadowNodeFragment;
    use crate::props::props;
    use crate::render::render_mutations;
    use crate::stub::StubViewTree;

    const ROOT: u64 = 1000;

    fn t(tag: u64) -> Tag {
        Tag::from_raw(tag)
    }

    fn leaf(tag: u64) -> SharedShadowNode {
        ShadowNode::new(t(tag), "View").into_shared()
    }

    fn node(tag: u64, children: Vec<SharedShadowNode>) -> SharedShadowNode {
        ShadowNode::new(t(tag), "View")
            .with_children(children)
            .into_shared()
    }

    fn root(children: Vec<SharedShadowNode>) -> ShadowNode {
        ShadowNode::new(t(ROOT), "RootView").with_children(children)
    }

    fn leaves(tags: &[u64]) -> ShadowNode {
        root(tags.iter().map(|&t| leaf(t)).collect())
    }

    fn view(tag: u64) -> ShadowView {
        ShadowView::new(&ShadowNode::new(t(tag), "View"))
    }

    fn remove(parent: u64, tag: u64, index: usize) -> Mutation {
        Mutation::Remove {
            parent: t(parent),
            view: view(tag),
            index,
        }
    }

    fn insert(parent: u64, tag: u64, index: usize) -> Mutation {
        Mutation::Insert {
            parent: t(parent),
            view: view(tag),
            index,
        }
    }

    fn assert_round_trip(old: &ShadowNode, new: &ShadowNode, config: DiffConfig) -> MutationList {
        let diff = diff_with_config(old, new, config).unwrap();
        let mut mounted = StubViewTree::from_snapshot(old);
        if let Err(err) = mounted.apply(&diff.mutations) {
            panic!("{err} while applying:\n{}", render_mutations(&diff.mutations));
        }
        assert_eq!(
            mounted,
            StubViewTree::from_snapshot(new),
            "mounted tree diverged after:\n{}",
            render_mutations(&diff.mutations)
        );
        diff.mutations
    }

    /// Replay one parent's Remove/Insert mutations against a plain list.
    fn replay_child_order(parent: Tag, old: &[Tag], mutations: &MutationList) -> Vec<Tag> {
        let mut list = old.to_vec();
        for m in mutations.for_parent(parent) {
            match m {
                Mutation::Remove { view, index, .. }
                | Mutation::RemoveDeleteTree { view, index, .. } => {
                    let removed = list.remove(*index);
                    assert_eq!(removed, view.tag, "removal index points at wrong child");
                }
                Mutation::Insert { view, index, .. } => list.insert(*index, view.tag),
                _ => {}
            }
        }
        list
    }

    // =========================================================================
    // Exact sequences
    // =========================================================================

    #[test]
    fn test_replace_first_append_last() {
        // [A, B, C] -> [B, C, D]
        let (a, b, c, d) = (10, 11, 12, 13);
        let old = leaves(&[a, b, c]);
        let new = leaves(&[b, c, d]);

        let mutations = assert_round_trip(&old, &new, DiffConfig::default());
        assert_eq!(
            mutations.as_slice(),
            &[
                remove(ROOT, a, 0),
                Mutation::Delete { view: view(a) },
                Mutation::Create { view: view(d) },
                insert(ROOT, d, 2),
            ]
        );
    }

    #[test]
    fn test_pure_reorder_is_minimal() {
        let old = leaves(&[1, 2, 3]);
        let new = leaves(&[3, 1, 2]);

        let diff = diff_with_config(&old, &new, DiffConfig::default()).unwrap();
        assert_eq!(
            diff.mutations.as_slice(),
            &[remove(ROOT, 3, 2), insert(ROOT, 3, 0)]
        );
        assert_eq!(diff.stats.nodes_moved, 1);
        let _ = assert_round_trip(&old, &new, DiffConfig::default());
    }

    #[test]
    fn test_moved_and_changed_child() {
        let old = leaves(&[1, 2, 3]);
        let opacity = ShadowNodeFragment::new().props(props([("opacity", 0.5)]));
        let changed = leaf(3).clone_with(opacity);
        let new = root(vec![changed.clone().into_shared(), leaf(1), leaf(2)]);

        let mutations = assert_round_trip(&old, &new, DiffConfig::default());
        assert_eq!(
            mutations.as_slice(),
            &[
                Mutation::Update {
                    parent: Some(t(ROOT)),
                    view: ShadowView::new(&changed),
                    index: Some(0),
                },
                remove(ROOT, 3, 2),
                Mutation::Insert {
                    parent: t(ROOT),
                    view: ShadowView::new(&changed),
                    index: 0,
                },
            ]
        );
    }

    #[test]
    fn test_removed_subtree_collapses() {
        // [1, 2(4, 5), 3] -> [1, 3]
        let old = root(vec![leaf(1), node(2, vec![leaf(4), leaf(5)]), leaf(3)]);
        let new = leaves(&[1, 3]);

        let diff = diff_with_config(&old, &new, DiffConfig::default()).unwrap();
        assert_eq!(
            diff.mutations.as_slice(),
            &[Mutation::RemoveDeleteTree {
                parent: t(ROOT),
                view: view(2),
                index: 1,
            }]
        );
        assert!(!diff.mutations.touches(t(4)));
        assert!(!diff.mutations.touches(t(5)));
        assert_eq!(diff.stats.subtrees_collapsed, 1);
        assert_eq!(diff.stats.nodes_deleted, 3);
        let _ = assert_round_trip(&old, &new, DiffConfig::default());
    }

    #[test]
    fn test_removed_subtree_expanded() {
        let old = root(vec![leaf(1), node(2, vec![leaf(4), leaf(5)]), leaf(3)]);
        let new = leaves(&[1, 3]);

        let mutations = assert_round_trip(&old, &new, DiffConfig::expanded());
        assert_eq!(
            mutations.as_slice(),
            &[
                remove(2, 5, 1),
                remove(2, 4, 0),
                Mutation::Delete { view: view(4) },
                Mutation::Delete { view: view(5) },
                remove(ROOT, 2, 1),
                Mutation::Delete { view: view(2) },
            ]
        );
    }

    #[test]
    fn test_empty_old_list_creates_everything() {
        let old = root(vec![]);
        let new = root(vec![node(2, vec![leaf(4)]), leaf(3)]);

        let diff = diff_with_config(&old, &new, DiffConfig::default()).unwrap();
        assert_eq!(
            diff.mutations.as_slice(),
            &[
                Mutation::Create { view: view(2) },
                Mutation::Create { view: view(3) },
                Mutation::Create { view: view(4) },
                insert(2, 4, 0),
                insert(ROOT, 2, 0),
                insert(ROOT, 3, 1),
            ]
        );
        assert_eq!(diff.stats.nodes_created, 3);
        let _ = assert_round_trip(&old, &new, DiffConfig::default());
    }

    #[test]
    fn test_empty_new_list_removes_everything() {
        let old = root(vec![node(2, vec![leaf(4)]), leaf(3)]);
        let new = root(vec![]);

        let mutations = assert_round_trip(&old, &new, DiffConfig::default());
        assert_eq!(
            mutations.as_slice(),
            &[
                remove(ROOT, 3, 1),
                Mutation::RemoveDeleteTree {
                    parent: t(ROOT),
                    view: view(2),
                    index: 0,
                },
                Mutation::Delete { view: view(3) },
            ]
        );
    }

    // =========================================================================
    // Larger lists
    // =========================================================================

    #[test]
    fn test_nested_reorder_and_growth() {
        let old = root(vec![
            node(2, vec![leaf(20), leaf(21), leaf(22)]),
            node(3, vec![leaf(30)]),
            leaf(4),
        ]);
        let new = root(vec![
            leaf(4),
            node(3, vec![leaf(31), leaf(30)]),
            node(2, vec![leaf(22), leaf(20), node(23, vec![leaf(230)])]),
        ]);

        let _ = assert_round_trip(&old, &new, DiffConfig::default());
        let _ = assert_round_trip(&old, &new, DiffConfig::expanded());
        let _ = assert_round_trip(&new, &old, DiffConfig::default());
        let _ = assert_round_trip(&new, &old, DiffConfig::expanded());
    }

    #[test]
    fn test_long_list_reorder_round_trip() {
        let old_tags: Vec<u64> = (1..=40).collect();
        let mut new_tags: Vec<u64> = old_tags.iter().copied().filter(|t| t % 7 != 0).collect();
        new_tags.reverse();
        new_tags.extend(41..=45);

        let mutations = assert_round_trip(
            &leaves(&old_tags),
            &leaves(&new_tags),
            DiffConfig::default(),
        );
        assert_eq!(mutations.count(MutationKind::Create), 5);
        assert_eq!(mutations.count(MutationKind::Delete), 5);
        assert_eq!(mutations.count(MutationKind::Update), 0);
    }

    #[test]
    fn test_interleaved_inserts_never_move_kept_children() {
        // [0, 1, ..] -> [0, 10000, 1, 10001, ..]
        let old_tags: Vec<u64> = (0..600).collect();
        let new_tags: Vec<u64> = old_tags.iter().flat_map(|&t| [t, 10_000 + t]).collect();
        let (old, new) = (leaves(&old_tags), leaves(&new_tags));

        let diff = diff_with_config(&old, &new, DiffConfig::default()).unwrap();
        assert_eq!(diff.stats.nodes_moved, 0);
        assert_eq!(diff.stats.nodes_created, 600);
        assert_eq!(diff.mutations.count(MutationKind::Remove), 0);
        assert_eq!(diff.mutations.count(MutationKind::Insert), 600);
        assert_eq!(diff.mutations.len(), 1200);
        let _ = assert_round_trip(&old, &new, DiffConfig::default());
    }

    #[test]
    fn test_large_reorder_moves_only_off_run_children() {
        // Swap adjacent pairs of 1000 children: half of them stay put
        let old_tags: Vec<u64> = (0..1000).collect();
        let new_tags: Vec<u64> = old_tags
            .chunks(2)
            .flat_map(|pair| [pair[1], pair[0]])
            .collect();

        let diff = diff_with_config(
            &leaves(&old_tags),
            &leaves(&new_tags),
            DiffConfig::default(),
        )
        .unwrap();
        assert_eq!(diff.stats.nodes_moved, 500);
        assert_eq!(diff.mutations.count(MutationKind::Remove), 500);
        assert_eq!(diff.mutations.count(MutationKind::Insert), 500);
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// A shuffled subset of `0..max`.
    fn tag_list(max: u64) -> impl Strategy<Value = Vec<u64>> {
        proptest::sample::subsequence((0..max).collect::<Vec<u64>>(), 0..=max as usize)
            .prop_shuffle()
    }

    /// A shuffle of `0..len`.
    fn permutation(len: u64) -> impl Strategy<Value = Vec<u64>> {
        Just((0..len).collect::<Vec<u64>>()).prop_shuffle()
    }

    /// Child `tag`, optionally with grandchild `100 + tag`, with a revision prop.
    fn child(tag: u64, grandchild: bool, revision: u64) -> SharedShadowNode {
        let children = if grandchild { vec![leaf(100 + tag)] } else { vec![] };
        ShadowNode::new(t(tag), "View")
            .with_props(props([("rev", revision as f64)]))
            .with_children(children)
            .into_shared()
    }

    proptest! {
        #[test]
        fn prop_replay_reproduces_new_order(old in tag_list(12), new in tag_list(16)) {
            let mutations = calculate_mutations(&leaves(&old), &leaves(&new)).unwrap();
            let old_tags: Vec<Tag> = old.iter().map(|&n| t(n)).collect();
            let new_tags: Vec<Tag> = new.iter().map(|&n| t(n)).collect();

            prop_assert_eq!(replay_child_order(t(ROOT), &old_tags, &mutations), new_tags);
        }

        #[test]
        fn prop_permutation_only_moves(order in permutation(10)) {
            let old: Vec<u64> = (0..10).collect();
            let mutations = calculate_mutations(&leaves(&old), &leaves(&order)).unwrap();

            let removes = mutations.count(MutationKind::Remove);
            prop_assert_eq!(removes, mutations.count(MutationKind::Insert));
            prop_assert_eq!(removes * 2, mutations.len());
            // At least one child is always on the LCS
            prop_assert!(removes < 10);
        }

        #[test]
        fn prop_round_trip_nested(
            old in tag_list(12),
            new in tag_list(16),
            collapse in any::<bool>(),
        ) {
            let old_root = root(old.iter().map(|&t| child(t, t % 3 == 0, 0)).collect());
            let new_root = root(new.iter().map(|&t| child(t, t % 2 == 0, t % 4)).collect());
            let config = DiffConfig::default().with_collapse(collapse);

            let diff = diff_with_config(&old_root, &new_root, config).unwrap();
            let mut mounted = StubViewTree::from_snapshot(&old_root);
            let applied = mounted.apply(&diff.mutations);
            prop_assert!(applied.is_ok(), "{:?}\n{}", applied, render_mutations(&diff.mutations));
            prop_assert_eq!(mounted, StubViewTree::from_snapshot(&new_root));
        }
    }
}
