//! Longest common subsequence of sibling tag lists
//!
//! Tags are unique within a child list, so the LCS of two lists is exactly the
//! longest strictly increasing run of old positions, read in new-list order.
//! Children on that run keep their relative order and need no structural
//! mutation; every other child present in both lists is a move.
//!
//! # Complexity
//!
//! | Step | Time | Space |
//! |------|------|-------|
//! | Match new children to old positions | O(n + m) | O(m) |
//! | Patience sorting over the matches | O(k log k) | O(k) |
//!
//! where k is the number of children present in both lists. There is no
//! edit-distance cap: the run is minimal for any list size or reorder.

use rustc_hash::FxHashMap;

use crate::tag::Tag;

/// Position of each tag in a sibling list.
pub type TagIndex = FxHashMap<Tag, usize>;

// =============================================================================
// Public Types
// =============================================================================

/// Edit operation in a diff sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Child at old_idx stays in relative order, now at new_idx
    Keep { old_idx: usize, new_idx: usize },
    /// Child at new_idx has no old counterpart
    Insert { new_idx: usize },
    /// Child at old_idx has no new counterpart
    Delete { old_idx: usize },
    /// Child moved from old_idx to new_idx
    Move { old_idx: usize, new_idx: usize },
}

impl Edit {
    pub fn is_keep(&self) -> bool {
        matches!(self, Edit::Keep { .. })
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Edit::Move { .. })
    }
}

/// Result of diff operation
#[derive(Debug, Default)]
pub struct LcsResult {
    pub edits: Vec<Edit>,
    pub stats: LcsStats,
}

/// Statistics from diff computation
#[derive(Debug, Default, Clone, Copy)]
pub struct LcsStats {
    pub kept: usize,
    pub inserted: usize,
    pub deleted: usize,
    pub moved: usize,
}

impl LcsStats {
    pub fn edit_count(&self) -> usize {
        self.inserted + self.deleted + self.moved
    }

    pub fn is_empty(&self) -> bool {
        self.edit_count() == 0
    }
}

// =============================================================================
// Main API
// =============================================================================

/// Compute the edit script between two tag sequences.
///
/// Tags must be unique within each sequence.
pub fn diff_sequences(old: &[Tag], new: &[Tag]) -> LcsResult {
    let old_map = index_of(old);
    let new_map = index_of(new);
    diff_indexed_sequences(old, new, &old_map, &new_map)
}

/// Same as [`diff_sequences`], reusing tag indexes the caller already built.
///
/// Deletes come first in old-list order, then keeps, moves and inserts in
/// new-list order.
pub fn diff_indexed_sequences(
    old: &[Tag],
    new: &[Tag],
    old_map: &TagIndex,
    new_map: &TagIndex,
) -> LcsResult {
    let mut edits = Vec::with_capacity(old.len().max(new.len()));
    let mut stats = LcsStats::default();

    for (old_idx, tag) in old.iter().enumerate() {
        if !new_map.contains_key(tag) {
            edits.push(Edit::Delete { old_idx });
            stats.deleted += 1;
        }
    }

    // (old_idx, new_idx) of every surviving child, in new-list order
    let matched: Vec<(usize, usize)> = new
        .iter()
        .enumerate()
        .filter_map(|(new_idx, tag)| old_map.get(tag).map(|&old_idx| (old_idx, new_idx)))
        .collect();
    let kept = longest_increasing_run(&matched);

    let mut next_match = 0;
    for new_idx in 0..new.len() {
        match matched.get(next_match) {
            Some(&(old_idx, at)) if at == new_idx => {
                if kept[next_match] {
                    edits.push(Edit::Keep { old_idx, new_idx });
                    stats.kept += 1;
                } else {
                    edits.push(Edit::Move { old_idx, new_idx });
                    stats.moved += 1;
                }
                next_match += 1;
            }
            _ => {
                edits.push(Edit::Insert { new_idx });
                stats.inserted += 1;
            }
        }
    }

    LcsResult { edits, stats }
}

// =============================================================================
// Patience sorting
// =============================================================================

/// Mark one longest run of `matched` whose old positions strictly increase.
fn longest_increasing_run(matched: &[(usize, usize)]) -> Vec<bool> {
    // tails[len - 1] = entry ending the run of length `len` with the smallest
    // old position seen so far
    let mut tails: Vec<usize> = Vec::new();
    let mut predecessor: Vec<Option<usize>> = vec![None; matched.len()];

    for (i, &(old_idx, _)) in matched.iter().enumerate() {
        let len = tails.partition_point(|&t| matched[t].0 < old_idx);
        if len > 0 {
            predecessor[i] = Some(tails[len - 1]);
        }
        if len == tails.len() {
            tails.push(i);
        } else {
            tails[len] = i;
        }
    }

    let mut on_run = vec![false; matched.len()];
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        on_run[i] = true;
        cursor = predecessor[i];
    }
    on_run
}

fn index_of(tags: &[Tag]) -> TagIndex {
    tags.iter().copied().enumerate().map(|(i, t)| (t, i)).collect()
}

// =============================================================================
// Tests
// =============================================================================
