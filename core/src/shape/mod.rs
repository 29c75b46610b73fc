//! Mock-type generation from an introspected client shape.
//!
//! # Overview
//! A client describes itself as a [`ShapeNode`] tree through [`Introspect`].
//! [`generate_mock_types`] then runs three pure stages over that tree:
//!
//! 1. [`transform`] replaces every callable with the `MockFn` placeholder.
//! 2. [`augment`] declares the raw transport verbs under `raw`.
//! 3. [`emit`] prints the result as a type declaration.
//!
//! Each stage takes the previous stage's output and returns a new value.
//! Nothing here performs I/O.

pub mod augment;
pub mod emit;
pub mod node;
pub mod walker;

pub use augment::{augment, RAW_KEY, RAW_VERBS};
pub use emit::{emit, LABEL};
pub use node::{classify, Callable, Namespace, NodeKind, Scalar, ShapeNode};
pub use walker::{transform, MAX_DEPTH};

use crate::error::ShapeError;

/// Type parameter every callable is replaced with.
pub const PLACEHOLDER: &str = "MockFn";

/// The placeholder as a shape leaf.
pub fn placeholder() -> ShapeNode {
    ShapeNode::string(PLACEHOLDER)
}

/// Something that can describe its own structure without doing I/O.
pub trait Introspect {
    fn shape(&self) -> ShapeNode;
}

/// Run the full pipeline over `source` and return the declaration text.
pub fn generate_mock_types<T: Introspect + ?Sized>(source: &T) -> Result<String, ShapeError> {
    let shape = source.shape();

    let mut replaced = 0usize;
    let mocked = transform(&shape, |callable| {
        replaced += 1;
        tracing::trace!(name = %callable.name, "replacing callable");
        placeholder()
    })?;
    tracing::debug!(replaced, "callables replaced with placeholder");

    let augmented = augment(mocked)?;
    tracing::debug!(verbs = RAW_VERBS.len(), "raw verbs declared");

    let text = emit(&augmented)?;
    tracing::debug!(bytes = text.len(), "mock type emitted");
    Ok(text)
}
