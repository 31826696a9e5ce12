//! Stable node identity for shadow tree diffing
//!
//! Every shadow node carries a [`Tag`]. Two nodes with the same tag in an old
//! and a new snapshot are the *same logical view*: the differ updates it in
//! place instead of destroying and recreating it.
//!
//! # Uniqueness
//!
//! Tags are assigned by the tree-construction layer. Within one snapshot a tag
//! must be unique among siblings; the differ reports a violation as
//! [`DiffError::DuplicateTag`](crate::DiffError::DuplicateTag).
//!
//! Example: `[A, B, C]` → `[C, A, B]`
//! - Position-based identity: every child changes → Delete + Create × 3
//! - Tag-based identity: children keep their views → one Remove + Insert

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

// =============================================================================
// Tag
// =============================================================================

/// Stable identity of a shadow node and of the native view it mounts.
///
/// # Memory Layout
///
/// - 8 bytes (u64)
/// - Copy, no heap allocation
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[must_use]
pub struct Tag(pub(crate) u64);

impl Tag {
    /// Create a tag from a raw u64 value.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw u64 representation
    #[inline]
    pub const fn as_raw(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Tag {
    #[inline]
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.0)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// TagAllocator
// =============================================================================

/// Hands out process-unique tags.
///
/// The allocator is an explicit handle rather than a global: whoever builds
/// trees owns one and passes it along. Tags are never reused.
#[derive(Debug)]
pub struct TagAllocator {
    next: AtomicU64,
}

impl TagAllocator {
    /// Create an allocator whose first tag is `1`.
    pub const fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create an allocator whose first tag is `first`.
    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Allocate the next tag.
    #[inline]
    pub fn allocate(&self) -> Tag {
        Tag(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for TagAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
