//! Overrides applied by [`ShadowNode::clone_with`](super::ShadowNode::clone_with).

use std::sync::Arc;

use crate::layout::LayoutMetrics;
use crate::props::{SharedProps, SharedState};

use super::{SharedShadowNode, SharedShadowNodeList};

/// Set of fields to replace when cloning a node. `None` keeps the original.
#[derive(Debug, Clone, Default)]
pub struct ShadowNodeFragment {
    pub props: Option<SharedProps>,
    pub state: Option<SharedState>,
    pub layout_metrics: Option<LayoutMetrics>,
    pub children: Option<SharedShadowNodeList>,
}

impl ShadowNodeFragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn props(mut self, props: impl Into<SharedProps>) -> Self {
        self.props = Some(props.into());
        self
    }

    pub fn state(mut self, state: impl Into<SharedState>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn layout_metrics(mut self, layout_metrics: LayoutMetrics) -> Self {
        self.layout_metrics = Some(layout_metrics);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = SharedShadowNode>) -> Self {
        self.children = Some(Arc::new(children.into_iter().collect()));
        self
    }

    /// Reuse an existing shared child list as-is.
    pub fn shared_children(mut self, children: SharedShadowNodeList) -> Self {
        self.children = Some(children);
        self
    }
}
