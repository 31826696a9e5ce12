//! Human-readable rendering of mutation lists
//!
//! Used in log output and in assertion messages; not a wire format.

use std::fmt::{self, Write};

use crate::mutation::{Mutation, MutationList};

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create { view } => write!(f, "Create {} <{}>", view.tag, view.component),
            Self::Delete { view } => write!(f, "Delete {}", view.tag),
            Self::Insert { parent, view, index } => {
                write!(f, "Insert {} into {} at {}", view.tag, parent, index)
            }
            Self::Remove { parent, view, index } => {
                write!(f, "Remove {} from {} at {}", view.tag, parent, index)
            }
            Self::RemoveDeleteTree { parent, view, index } => {
                write!(f, "RemoveDeleteTree {} from {} at {}", view.tag, parent, index)
            }
            Self::Update {
                parent: Some(parent),
                view,
                index: Some(index),
            } => write!(f, "Update {} in {} at {}", view.tag, parent, index),
            Self::Update { view, .. } => write!(f, "Update {}", view.tag),
        }
    }
}

impl fmt::Display for MutationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, m) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{m}")?;
        }
        f.write_str("]")
    }
}

/// Render one mutation per line, prefixed with its position.
pub fn render_mutations(mutations: &MutationList) -> String {
    let mut output = String::new();
    for (i, m) in mutations.iter().enumerate() {
        // Writing to a String cannot fail
        let _ = writeln!(output, "{i:>4}: {m}");
    }
    output
}
