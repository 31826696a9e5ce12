//! ShadowNode - immutable node of a shadow tree snapshot
//!
//! Nodes are never mutated once shared. A new snapshot is produced by cloning
//! the nodes on the path to a change with [`ShadowNode::clone_with`]; every
//! other subtree is shared by `Arc` between the old and the new snapshot.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::layout::LayoutMetrics;
use crate::props::{Props, SharedProps, SharedState};
use crate::tag::Tag;

use super::{ComponentName, ShadowNodeFragment};

/// Shared ownership handle for a node.
pub type SharedShadowNode = Arc<ShadowNode>;

/// Ordered child list.
pub type ShadowNodeList = SmallVec<[SharedShadowNode; 4]>;

/// Child list shared between snapshots.
pub type SharedShadowNodeList = Arc<ShadowNodeList>;

// =============================================================================
// ShadowNode
// =============================================================================

/// Immutable node with a stable tag, a component name, props, optional state,
/// layout metrics and ordered children.
#[derive(Debug, Clone)]
pub struct ShadowNode {
    tag: Tag,
    component: ComponentName,
    props: SharedProps,
    state: Option<SharedState>,
    layout_metrics: LayoutMetrics,
    children: SharedShadowNodeList,
}

impl ShadowNode {
    /// Create a childless node with empty props and no state.
    pub fn new(tag: Tag, component: impl Into<ComponentName>) -> Self {
        Self {
            tag,
            component: component.into(),
            props: Arc::new(Props::new()),
            state: None,
            layout_metrics: LayoutMetrics::EMPTY,
            children: Arc::default(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Construction
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace props.
    pub fn with_props(mut self, props: impl Into<SharedProps>) -> Self {
        self.props = props.into();
        self
    }

    /// Attach state.
    pub fn with_state(mut self, state: impl Into<SharedState>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Replace layout metrics.
    pub fn with_layout(mut self, layout_metrics: LayoutMetrics) -> Self {
        self.layout_metrics = layout_metrics;
        self
    }

    /// Replace children.
    pub fn with_children(mut self, children: impl IntoIterator<Item = SharedShadowNode>) -> Self {
        self.children = Arc::new(children.into_iter().collect());
        self
    }

    /// Move the node behind an `Arc`.
    #[inline]
    pub fn into_shared(self) -> SharedShadowNode {
        Arc::new(self)
    }

    /// Clone this node, replacing the fields set in `fragment`.
    ///
    /// Fields absent from the fragment keep sharing this node's allocations,
    /// so unchanged props and child lists remain pointer-equal.
    pub fn clone_with(&self, fragment: ShadowNodeFragment) -> Self {
        Self {
            tag: self.tag,
            component: self.component.clone(),
            props: fragment.props.unwrap_or_else(|| Arc::clone(&self.props)),
            state: fragment.state.or_else(|| self.state.clone()),
            layout_metrics: fragment.layout_metrics.unwrap_or(self.layout_metrics),
            children: fragment.children.unwrap_or_else(|| Arc::clone(&self.children)),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    #[inline]
    pub fn component(&self) -> &ComponentName {
        &self.component
    }

    #[inline]
    pub fn props(&self) -> &SharedProps {
        &self.props
    }

    #[inline]
    pub fn state(&self) -> Option<&SharedState> {
        self.state.as_ref()
    }

    #[inline]
    pub fn layout_metrics(&self) -> &LayoutMetrics {
        &self.layout_metrics
    }

    #[inline]
    pub fn children(&self) -> &[SharedShadowNode] {
        &self.children
    }

    /// The shared child list, for identity comparison between snapshots.
    #[inline]
    pub fn shared_children(&self) -> &SharedShadowNodeList {
        &self.children
    }

    /// Check if the node has children
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Traversal
    // ─────────────────────────────────────────────────────────────────────────

    /// Depth-first, pre-order iterator over all descendants (not `self`).
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack: Vec<&ShadowNode> = Vec::with_capacity(self.children.len());
        stack.extend(self.children.iter().rev().map(|c| c.as_ref()));
        Descendants { stack }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.descendants().count()
    }

    /// Find a node by tag in this subtree (depth-first).
    pub fn find(&self, tag: Tag) -> Option<&ShadowNode> {
        if self.tag == tag {
            return Some(self);
        }
        self.descendants().find(|n| n.tag == tag)
    }
}

/// Iterator returned by [`ShadowNode::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a ShadowNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a ShadowNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev().map(|c| c.as_ref()));
        Some(node)
    }
}
