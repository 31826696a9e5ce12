//! ShadowView - the child-less payload carried by mutations
//!
//! A view is what the mount layer needs to create or update one native view:
//! identity, component, props, state and layout. Children are expressed by
//! separate `Insert`/`Remove` mutations, never inside a view.

use crate::layout::LayoutMetrics;
use crate::props::{SharedProps, SharedState};
use crate::tag::Tag;

use super::{ComponentName, ShadowNode};

#[derive(Debug, Clone, PartialEq)]
pub struct ShadowView {
    pub tag: Tag,
    pub component: ComponentName,
    pub props: SharedProps,
    pub state: Option<SharedState>,
    pub layout_metrics: LayoutMetrics,
}

impl ShadowView {
    pub fn new(node: &ShadowNode) -> Self {
        Self {
            tag: node.tag(),
            component: node.component().clone(),
            props: node.props().clone(),
            state: node.state().cloned(),
            layout_metrics: *node.layout_metrics(),
        }
    }
}

impl From<&ShadowNode> for ShadowView {
    fn from(node: &ShadowNode) -> Self {
        Self::new(node)
    }
}
