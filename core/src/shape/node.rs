//! The recursive shape tree and its classifier.

use serde::ser::Error as _;
use serde::{Serialize, Serializer};

use crate::http::HttpMethod;

/// One node of an introspected client shape.
///
/// `ShapeNode` owns its children, so a shape is always a finite tree: cycles
/// cannot be expressed.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeNode {
    Callable(Callable),
    Sequence(Vec<ShapeNode>),
    Namespace(Namespace),
    Scalar(Scalar),
    /// A value that is none of the above, identified by its type name.
    /// It never classifies and makes every pipeline stage fail.
    Opaque(String),
}

impl ShapeNode {
    pub fn string(value: impl Into<String>) -> Self {
        ShapeNode::Scalar(Scalar::String(value.into()))
    }

    pub fn null() -> Self {
        ShapeNode::Scalar(Scalar::Null)
    }
}

impl From<Callable> for ShapeNode {
    fn from(callable: Callable) -> Self {
        ShapeNode::Callable(callable)
    }
}

impl From<Namespace> for ShapeNode {
    fn from(namespace: Namespace) -> Self {
        ShapeNode::Namespace(namespace)
    }
}

impl From<Scalar> for ShapeNode {
    fn from(scalar: Scalar) -> Self {
        ShapeNode::Scalar(scalar)
    }
}

impl From<Vec<ShapeNode>> for ShapeNode {
    fn from(items: Vec<ShapeNode>) -> Self {
        ShapeNode::Sequence(items)
    }
}

/// An invocable client operation.
///
/// A callable may carry members of its own (a request function that also
/// exposes helper methods). It still classifies as a callable and its
/// members are never walked.
#[derive(Debug, Clone, PartialEq)]
pub struct Callable {
    pub name: String,
    pub route: Option<(HttpMethod, String)>,
    pub members: Namespace,
}

impl Callable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            route: None,
            members: Namespace::new(),
        }
    }

    /// A callable that issues `method` against `path`.
    pub fn route(name: impl Into<String>, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            route: Some((method, path.into())),
            ..Self::new(name)
        }
    }

    pub fn with_member(mut self, key: impl Into<String>, node: impl Into<ShapeNode>) -> Self {
        self.members.insert(key, node.into());
        self
    }
}

/// Leaf values that pass through the walker untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl Scalar {
    /// A float scalar. NaN and infinities become `Null`, matching JSON.
    pub fn float(value: f64) -> Self {
        serde_json::Number::from_f64(value).map_or(Scalar::Null, Scalar::Number)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

macro_rules! scalar_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::Number(value.into())
                }
            }
        )*
    };
}

scalar_from_integer!(i32, i64, u32, u64);

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

/// Insertion-ordered mapping from names to sub-shapes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    entries: Vec<(String, ShapeNode)>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `node` under `key`. An existing key keeps its position and the
    /// previous value is returned.
    pub fn insert(&mut self, key: impl Into<String>, node: ShapeNode) -> Option<ShapeNode> {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, node)),
            None => {
                self.entries.push((key, node));
                None
            }
        }
    }

    /// Builder form of [`Namespace::insert`].
    pub fn with(mut self, key: impl Into<String>, node: impl Into<ShapeNode>) -> Self {
        self.insert(key, node.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&ShapeNode> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, node)| node)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ShapeNode)> {
        self.entries.iter().map(|(key, node)| (key, node))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ShapeNode)> for Namespace {
    fn from_iter<I: IntoIterator<Item = (String, ShapeNode)>>(iter: I) -> Self {
        let mut namespace = Namespace::new();
        for (key, node) in iter {
            namespace.insert(key, node);
        }
        namespace
    }
}

impl IntoIterator for Namespace {
    type Item = (String, ShapeNode);
    type IntoIter = std::vec::IntoIter<(String, ShapeNode)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Result of classifying a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind<'a> {
    Callable(&'a Callable),
    Sequence(&'a [ShapeNode]),
    Namespace(&'a Namespace),
    Scalar(&'a Scalar),
}

/// Classify `node`, or `None` if it is opaque.
///
/// Precedence is callable, sequence, namespace, scalar. The callable test
/// comes first so a callable that carries members is never treated as a
/// namespace.
pub fn classify(node: &ShapeNode) -> Option<NodeKind<'_>> {
    match node {
        ShapeNode::Callable(callable) => Some(NodeKind::Callable(callable)),
        ShapeNode::Sequence(items) => Some(NodeKind::Sequence(items)),
        ShapeNode::Namespace(namespace) => Some(NodeKind::Namespace(namespace)),
        ShapeNode::Scalar(scalar) => Some(NodeKind::Scalar(scalar)),
        ShapeNode::Opaque(_) => None,
    }
}

/// Serializes like the equivalent JSON value. Callables and opaque values
/// have no textual form and fail serialization.
impl Serialize for ShapeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ShapeNode::Scalar(scalar) => scalar.serialize(serializer),
            ShapeNode::Sequence(items) => serializer.collect_seq(items),
            ShapeNode::Namespace(namespace) => serializer.collect_map(namespace.iter()),
            ShapeNode::Callable(callable) => Err(S::Error::custom(format!(
                "callable `{}` was not replaced",
                callable.name
            ))),
            ShapeNode::Opaque(type_name) => Err(S::Error::custom(format!(
                "opaque value `{type_name}` cannot be serialized"
            ))),
        }
    }
}
