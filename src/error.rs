//! Error types for shadow-diff.
//!
//! `DiffError` reports malformed input trees. These are bugs in the layer that
//! builds the trees: the differ refuses to emit a mutation list rather than
//! risk corrupting the mounted view hierarchy.
//!
//! `ApplyError` reports a mutation list that does not fit the view tree it is
//! applied to (see [`StubViewTree`](crate::StubViewTree)).

use thiserror::Error;

use crate::node::ComponentName;
use crate::tag::Tag;

/// Precondition violations detected while diffing two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// The two roots are not the same logical node
    #[error("root tag mismatch: old root is {old}, new root is {new}")]
    RootTagMismatch {
        /// Tag of the old root
        old: Tag,
        /// Tag of the new root
        new: Tag,
    },

    /// A tag occurs twice in one child list, or is created twice
    #[error("duplicate tag {tag} under parent {parent}")]
    DuplicateTag {
        /// Parent whose child list holds the duplicate
        parent: Tag,
        /// The duplicated tag
        tag: Tag,
    },

    /// A matched node pair changed component
    #[error("component mismatch for {tag}: {old} became {new}")]
    ComponentMismatch {
        tag: Tag,
        old: ComponentName,
        new: ComponentName,
    },

    /// A tag left one parent and reappeared under another
    #[error("tag {tag} moved to a different parent; reparenting is not supported")]
    Reparented { tag: Tag },

    /// The tree is deeper than the configured limit
    #[error("tree depth exceeds limit of {limit} at {tag}")]
    DepthLimitExceeded {
        /// Node at which the limit was hit
        tag: Tag,
        /// Configured maximum depth
        limit: usize,
    },
}

/// Result type alias for diff operations.
pub type DiffResult<T> = Result<T, DiffError>;

/// Failures while applying mutations to a stub view tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("unknown view {0}")]
    UnknownView(Tag),

    #[error("view {0} already exists")]
    ViewExists(Tag),

    #[error("view {0} is already attached to {1}")]
    AlreadyAttached(Tag, Tag),

    #[error("view {0} is still attached to {1}")]
    StillAttached(Tag, Tag),

    #[error("view {0} still has children")]
    HasChildren(Tag),

    #[error("index {index} out of bounds for {parent} with {len} children")]
    IndexOutOfBounds { parent: Tag, index: usize, len: usize },

    #[error("child {index} of {parent} is {found}, expected {expected}")]
    ChildMismatch {
        parent: Tag,
        index: usize,
        expected: Tag,
        found: Tag,
    },
}

/// Result type alias for mutation application.
pub type ApplyResult<T> = Result<T, ApplyError>;

impl DiffError {
    /// The tag the error is about
    pub fn tag(&self) -> Tag {
        match self {
            Self::RootTagMismatch { new, .. } => *new,
            Self::DuplicateTag { tag, .. }
            | Self::ComponentMismatch { tag, .. }
            | Self::Reparented { tag }
            | Self::DepthLimitExceeded { tag, .. } => *tag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DiffError::DuplicateTag {
            parent: Tag::from_raw(1),
            tag: Tag::from_raw(7),
        };
        assert_eq!(err.to_string(), "duplicate tag #7 under parent #1");
        assert_eq!(err.tag(), Tag::from_raw(7));

        let err = DiffError::RootTagMismatch {
            old: Tag::from_raw(1),
            new: Tag::from_raw(2),
        };
        assert_eq!(err.to_string(), "root tag mismatch: old root is #1, new root is #2");

        let err = ApplyError::IndexOutOfBounds {
            parent: Tag::from_raw(1),
            index: 4,
            len: 2,
        };
        assert_eq!(err.to_string(), "index 4 out of bounds for #1 with 2 children");
    }

    #[test]
    fn test_error_is_send_sync() {
        static_assertions::assert_impl_all!(DiffError: Send, Sync, std::error::Error);
        static_assertions::assert_impl_all!(ApplyError: Send, Sync, std::error::Error);
    }
}
