//! Renders a shape as a type declaration.

use crate::error::ShapeError;

use super::node::ShapeNode;

/// First line of every emitted declaration.
pub const LABEL: &str = "export type MockClient<MockFn> =";

/// Render `shape` as `LABEL`, a newline, and the type literal.
///
/// The shape is pretty-printed as JSON with two-space indentation, then
/// rewritten in this order: every `"` removed, every `,` removed, every `}`
/// turned into `};`. The order is part of the output format.
///
/// # Errors
/// `ShapeError::Serialize` if the shape still contains a callable or an
/// opaque value.
pub fn emit(shape: &ShapeNode) -> Result<String, ShapeError> {
    let json = serde_json::to_string_pretty(shape)?;
    let body = json.replace('"', "").replace(',', "").replace('}', "};");
    Ok(format!("{LABEL}\n{body}"))
}
