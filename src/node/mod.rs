//! Shadow tree node types.
//!
//! - `ShadowNode`: immutable, `Arc`-shared node of a snapshot
//! - `ShadowNodeFragment`: field overrides for persistent updates
//! - `ShadowView`: child-less node payload carried by mutations

mod fragment;
mod shadow_node;
mod view;

pub use fragment::ShadowNodeFragment;
pub use shadow_node::{
    Descendants, ShadowNode, ShadowNodeList, SharedShadowNode, SharedShadowNodeList,
};
pub use view::ShadowView;

use compact_str::CompactString;

/// Component name of a node (e.g. `"View"`, `"Text"`).
pub type ComponentName = CompactString;
