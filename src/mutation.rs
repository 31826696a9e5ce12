//! View mutations produced by the differ
//!
//! A [`Mutation`] is one atomic instruction for the mount layer. The variants
//! form a closed set, so an apply step can match on them exhaustively.
//!
//! # Index semantics
//!
//! - `Insert::index` is the position in the parent's *new* child list.
//! - `Remove::index` / `RemoveDeleteTree::index` is the position in the
//!   parent's *old* child list.
//!
//! Within a [`MutationList`], removals for one parent appear in descending old
//! index and insertions in ascending new index, so applying them one by one
//! against a mutable child list needs no index translation.

use std::ops::Deref;

use crate::node::ShadowView;
use crate::tag::Tag;

// =============================================================================
// Mutation
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Create a detached view
    Create { view: ShadowView },

    /// Destroy a detached, childless view
    Delete { view: ShadowView },

    /// Attach a view as child `index` of `parent`
    Insert {
        parent: Tag,
        view: ShadowView,
        index: usize,
    },

    /// Detach child `index` of `parent`
    Remove {
        parent: Tag,
        view: ShadowView,
        index: usize,
    },

    /// Update a mounted view in place with the new node's data.
    ///
    /// `parent` and `index` are `None` for the root.
    Update {
        parent: Option<Tag>,
        view: ShadowView,
        index: Option<usize>,
    },

    /// Detach child `index` of `parent` and destroy it with its whole subtree
    RemoveDeleteTree {
        parent: Tag,
        view: ShadowView,
        index: usize,
    },
}

/// Discriminant of a [`Mutation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Delete,
    Insert,
    Remove,
    Update,
    RemoveDeleteTree,
}

impl MutationKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Delete => "Delete",
            Self::Insert => "Insert",
            Self::Remove => "Remove",
            Self::Update => "Update",
            Self::RemoveDeleteTree => "RemoveDeleteTree",
        }
    }
}

impl Mutation {
    crate::impl_mutation_predicates!(Create, Delete, Insert, Remove, Update, RemoveDeleteTree);
    crate::impl_mutation_kind!(
        MutationKind,
        Create,
        Delete,
        Insert,
        Remove,
        Update,
        RemoveDeleteTree
    );

    /// The view this mutation acts on
    pub fn view(&self) -> &ShadowView {
        match self {
            Self::Create { view }
            | Self::Delete { view }
            | Self::Insert { view, .. }
            | Self::Remove { view, .. }
            | Self::Update { view, .. }
            | Self::RemoveDeleteTree { view, .. } => view,
        }
    }

    /// Tag of the view this mutation acts on
    #[inline]
    pub fn target(&self) -> Tag {
        self.view().tag
    }

    /// Parent tag, for mutations that address a child slot
    pub fn parent(&self) -> Option<Tag> {
        match self {
            Self::Insert { parent, .. }
            | Self::Remove { parent, .. }
            | Self::RemoveDeleteTree { parent, .. } => Some(*parent),
            Self::Update { parent, .. } => *parent,
            Self::Create { .. } | Self::Delete { .. } => None,
        }
    }

    /// Child index, for mutations that address a child slot
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Insert { index, .. }
            | Self::Remove { index, .. }
            | Self::RemoveDeleteTree { index, .. } => Some(*index),
            Self::Update { index, .. } => *index,
            Self::Create { .. } | Self::Delete { .. } => None,
        }
    }

    /// Whether this mutation detaches a child from its parent
    #[inline]
    pub fn is_removal(&self) -> bool {
        matches!(self, Self::Remove { .. } | Self::RemoveDeleteTree { .. })
    }
}

// =============================================================================
// MutationList
// =============================================================================

/// Ordered list of mutations. Order is part of the contract.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct MutationList(Vec<Mutation>);

impl MutationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mutations of the given kind
    pub fn count(&self, kind: MutationKind) -> usize {
        self.0.iter().filter(|m| m.kind() == kind).count()
    }

    /// Mutations of one parent's child slots, in list order
    pub fn for_parent(&self, parent: Tag) -> impl Iterator<Item = &Mutation> {
        self.0.iter().filter(move |m| m.parent() == Some(parent))
    }

    /// Whether any mutation targets `tag`
    pub fn touches(&self, tag: Tag) -> bool {
        self.0.iter().any(|m| m.target() == tag)
    }

    pub fn as_slice(&self) -> &[Mutation] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Mutation> {
        self.0
    }
}

impl Deref for MutationList {
    type Target = [Mutation];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Mutation>> for MutationList {
    fn from(mutations: Vec<Mutation>) -> Self {
        Self(mutations)
    }
}

impl IntoIterator for MutationList {
    type Item = Mutation;
    type IntoIter = std::vec::IntoIter<Mutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MutationList {
    type Item = &'a Mutation;
    type IntoIter = std::slice::Iter<'a, Mutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// Tests
// =============================================================================
