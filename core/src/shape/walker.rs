//! Structure-preserving transform over a shape tree.

use crate::error::ShapeError;

use super::node::{classify, Callable, Namespace, NodeKind, ShapeNode};

/// Deepest nesting the walker accepts. The root sits at depth 0.
pub const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy)]
enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

fn render_path(path: &[Segment<'_>]) -> String {
    if path.is_empty() {
        return "<root>".to_string();
    }
    let mut rendered = String::new();
    for segment in path {
        match segment {
            Segment::Key(key) if rendered.is_empty() => rendered.push_str(key),
            Segment::Key(key) => {
                rendered.push('.');
                rendered.push_str(key);
            }
            Segment::Index(index) => rendered.push_str(&format!("[{index}]")),
        }
    }
    rendered
}

/// Rebuild `node` with every callable replaced by `leaf(callable)`.
///
/// Namespace keys keep their order, sequences keep their length and order,
/// and scalars are copied as they are. The input is never modified.
///
/// # Errors
/// `ShapeError::Unsupported` for an opaque node and `ShapeError::TooDeep`
/// once nesting passes [`MAX_DEPTH`]. Both carry the path of the offending
/// node.
pub fn transform<F>(node: &ShapeNode, mut leaf: F) -> Result<ShapeNode, ShapeError>
where
    F: FnMut(&Callable) -> ShapeNode,
{
    let mut path = Vec::new();
    walk(node, &mut leaf, &mut path)
}

fn walk<'a, F>(
    node: &'a ShapeNode,
    leaf: &mut F,
    path: &mut Vec<Segment<'a>>,
) -> Result<ShapeNode, ShapeError>
where
    F: FnMut(&Callable) -> ShapeNode,
{
    if path.len() > MAX_DEPTH {
        return Err(ShapeError::TooDeep {
            path: render_path(path),
            limit: MAX_DEPTH,
        });
    }

    let Some(kind) = classify(node) else {
        let type_name = match node {
            ShapeNode::Opaque(type_name) => type_name.clone(),
            _ => "unknown".to_string(),
        };
        return Err(ShapeError::Unsupported {
            path: render_path(path),
            type_name,
        });
    };

    match kind {
        NodeKind::Callable(callable) => Ok(leaf(callable)),
        NodeKind::Sequence(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                path.push(Segment::Index(index));
                out.push(walk(item, leaf, path)?);
                path.pop();
            }
            Ok(ShapeNode::Sequence(out))
        }
        NodeKind::Namespace(namespace) => {
            let mut out = Namespace::new();
            for (key, value) in namespace.iter() {
                path.push(Segment::Key(key.as_str()));
                out.insert(key.clone(), walk(value, leaf, path)?);
                path.pop();
            }
            Ok(ShapeNode::Namespace(out))
        }
        NodeKind::Scalar(scalar) => Ok(ShapeNode::Scalar(scalar.clone())),
    }
}
