//! Algorithm implementations for shadow tree diffing.
//!
//! - `differ`: tree-pair walk producing the mutation list
//! - `siblings`: per-parent child list reconciliation
//! - `lcs`: longest common subsequence of sibling tags for move detection

mod differ;
mod lcs;
mod siblings;

pub use differ::{
    calculate_mount_mutations, calculate_mutations, calculate_mutations_batch, diff_with_config,
    Diff, DiffConfig, DiffStats,
};
pub use lcs::{diff_sequences, Edit, LcsResult, LcsStats};
