//! Prelude module for common imports.
//!
//! ```
//! use shadow_diff::prelude::*;
//! ```

// Identity
pub use crate::tag::{Tag, TagAllocator};

// Node types
pub use crate::node::{
    ComponentName, ShadowNode, ShadowNodeFragment, ShadowNodeList, ShadowView, SharedShadowNode,
};

// Payloads
pub use crate::layout::{DisplayType, EdgeInsets, LayoutDirection, LayoutMetrics, Point, Rect, Size};
pub use crate::props::{props, PropValue, Props, PropsExt, SharedProps, SharedState, State};

// Mutations
pub use crate::mutation::{Mutation, MutationKind, MutationList};

// Algorithms
pub use crate::algo::{
    calculate_mount_mutations, calculate_mutations, calculate_mutations_batch, diff_with_config,
    Diff, DiffConfig, DiffStats,
};

// Error
pub use crate::error::{ApplyError, ApplyResult, DiffError, DiffResult};

// Stub and tree
pub use crate::stub::{StubView, StubViewTree};
pub use crate::tree::ShadowTree;

// Render
pub use crate::render::render_mutations;
