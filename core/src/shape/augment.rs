//! Declares the low-level HTTP verbs under a `raw` namespace.

use crate::error::ShapeError;

use super::node::{Namespace, ShapeNode};
use super::placeholder;

/// Key the verbs are declared under.
pub const RAW_KEY: &str = "raw";

/// Request helpers exposed by the raw transport. Introspecting a client does
/// not reveal them, so they are declared by hand.
pub const RAW_VERBS: [&str; 9] = [
    "get", "post", "put", "patch", "delete", "request", "all", "head", "options",
];

/// Append a `raw` namespace mapping every verb in [`RAW_VERBS`] to the
/// placeholder.
///
/// # Errors
/// `ShapeError::NotANamespace` when the root is not a namespace and
/// `ShapeError::RawCollision` when it already has a `raw` key.
pub fn augment(shape: ShapeNode) -> Result<ShapeNode, ShapeError> {
    let ShapeNode::Namespace(mut root) = shape else {
        return Err(ShapeError::NotANamespace);
    };
    if root.contains_key(RAW_KEY) {
        return Err(ShapeError::RawCollision);
    }

    let raw: Namespace = RAW_VERBS
        .iter()
        .map(|verb| ((*verb).to_string(), placeholder()))
        .collect();
    root.insert(RAW_KEY, ShapeNode::Namespace(raw));
    Ok(ShapeNode::Namespace(root))
}
