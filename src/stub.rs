//! In-memory view tree for applying mutation lists
//!
//! `StubViewTree` mirrors what a native mount layer holds: a map from tag to
//! view with parent/child links. Applying a mutation list validates every
//! step the way a real view hierarchy would fail, which makes it the oracle
//! for round-trip tests: `from_snapshot(A) + diff(A, B) == from_snapshot(B)`.

use rustc_hash::FxHashMap;

use crate::error::{ApplyError, ApplyResult};
use crate::layout::LayoutMetrics;
use crate::mutation::{Mutation, MutationList};
use crate::node::{ComponentName, ShadowNode, ShadowView};
use crate::props::{SharedProps, SharedState};
use crate::tag::Tag;

// =============================================================================
// StubView
// =============================================================================

/// One mounted view.
#[derive(Debug, Clone, PartialEq)]
pub struct StubView {
    pub tag: Tag,
    pub component: ComponentName,
    pub props: SharedProps,
    pub state: Option<SharedState>,
    pub layout_metrics: LayoutMetrics,
    pub parent: Option<Tag>,
    pub children: Vec<Tag>,
}

impl StubView {
    fn detached(view: &ShadowView) -> Self {
        Self {
            tag: view.tag,
            component: view.component.clone(),
            props: view.props.clone(),
            state: view.state.clone(),
            layout_metrics: view.layout_metrics,
            parent: None,
            children: Vec::new(),
        }
    }

    fn update(&mut self, view: &ShadowView) {
        self.component = view.component.clone();
        self.props = view.props.clone();
        self.state = view.state.clone();
        self.layout_metrics = view.layout_metrics;
    }
}

// =============================================================================
// StubViewTree
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct StubViewTree {
    root: Tag,
    views: FxHashMap<Tag, StubView>,
}

impl StubViewTree {
    /// A tree holding only the root view.
    pub fn new(root: &ShadowNode) -> Self {
        let mut views = FxHashMap::default();
        views.insert(root.tag(), StubView::detached(&ShadowView::new(root)));
        Self {
            root: root.tag(),
            views,
        }
    }

    /// A tree with the whole snapshot mounted.
    pub fn from_snapshot(root: &ShadowNode) -> Self {
        let mut tree = Self::new(root);
        let mut stack: Vec<&ShadowNode> = vec![root];

        while let Some(node) = stack.pop() {
            for child in node.children() {
                let mut view = StubView::detached(&ShadowView::new(child));
                view.parent = Some(node.tag());
                tree.views.insert(child.tag(), view);
                stack.push(child);
            }
            if let Some(view) = tree.views.get_mut(&node.tag()) {
                view.children = node.children().iter().map(|c| c.tag()).collect();
            }
        }

        tree
    }

    pub fn root(&self) -> Tag {
        self.root
    }

    pub fn get(&self, tag: Tag) -> Option<&StubView> {
        self.views.get(&tag)
    }

    /// Number of live views, attached or not.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Children of `tag` in mount order.
    pub fn children(&self, tag: Tag) -> Option<&[Tag]> {
        self.views.get(&tag).map(|v| v.children.as_slice())
    }

    /// Apply a mutation list, stopping at the first invalid mutation.
    ///
    /// Mutations before the failing one stay applied.
    pub fn apply(&mut self, mutations: &MutationList) -> ApplyResult<()> {
        for mutation in mutations {
            self.apply_one(mutation)?;
        }
        Ok(())
    }

    pub fn apply_one(&mut self, mutation: &Mutation) -> ApplyResult<()> {
        match mutation {
            Mutation::Create { view } => {
                if self.views.contains_key(&view.tag) {
                    return Err(ApplyError::ViewExists(view.tag));
                }
                self.views.insert(view.tag, StubView::detached(view));
            }
            Mutation::Delete { view } => {
                let stub = self.view(view.tag)?;
                if let Some(parent) = stub.parent {
                    return Err(ApplyError::StillAttached(view.tag, parent));
                }
                if !stub.children.is_empty() {
                    return Err(ApplyError::HasChildren(view.tag));
                }
                self.views.remove(&view.tag);
            }
            Mutation::Insert {
                parent,
                view,
                index,
            } => {
                if let Some(current) = self.view(view.tag)?.parent {
                    return Err(ApplyError::AlreadyAttached(view.tag, current));
                }
                let siblings = &mut self.view_mut(*parent)?.children;
                if *index > siblings.len() {
                    return Err(ApplyError::IndexOutOfBounds {
                        parent: *parent,
                        index: *index,
                        len: siblings.len(),
                    });
                }
                siblings.insert(*index, view.tag);
                self.view_mut(view.tag)?.parent = Some(*parent);
            }
            Mutation::Remove {
                parent,
                view,
                index,
            } => {
                self.detach(*parent, view.tag, *index)?;
            }
            Mutation::RemoveDeleteTree {
                parent,
                view,
                index,
            } => {
                self.detach(*parent, view.tag, *index)?;
                let mut stack = vec![view.tag];
                while let Some(tag) = stack.pop() {
                    if let Some(removed) = self.views.remove(&tag) {
                        stack.extend(removed.children);
                    }
                }
            }
            Mutation::Update { view, .. } => {
                self.view_mut(view.tag)?.update(view);
            }
        }
        Ok(())
    }

    fn detach(&mut self, parent: Tag, tag: Tag, index: usize) -> ApplyResult<()> {
        let siblings = &mut self.view_mut(parent)?.children;
        let found = *siblings.get(index).ok_or(ApplyError::IndexOutOfBounds {
            parent,
            index,
            len: siblings.len(),
        })?;
        if found != tag {
            return Err(ApplyError::ChildMismatch {
                parent,
                index,
                expected: tag,
                found,
            });
        }
        let _detached = siblings.remove(index);
        self.view_mut(tag)?.parent = None;
        Ok(())
    }

    fn view(&self, tag: Tag) -> ApplyResult<&StubView> {
        self.views.get(&tag).ok_or(ApplyError::UnknownView(tag))
    }

    fn view_mut(&mut self, tag: Tag) -> ApplyResult<&mut StubView> {
        self.views.get_mut(&tag).ok_or(ApplyError::UnknownView(tag))
    }
}

// =============================================================================
// Tests
// =============================================================================
