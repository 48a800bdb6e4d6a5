//! Abstract Syntax Tree (AST) node types
//!
//! A parsed Propex string is a tree of [`PropexNode`]s. Nodes are immutable
//! once built and are shared between threads behind an `Arc` by the cache.

use std::fmt;

/// A shape description: either an object with named fields or an array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropexNode {
    /// Object with fields in declaration order (`{a,b{c}}`)
    Object(Vec<FieldSpec>),

    /// Array with an optional element shape (`[{a}]`).
    ///
    /// `Array(None)` (`[]`) only accepts empty arrays.
    Array(Option<Box<PropexNode>>),
}

/// A named field inside an object node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    name: String,
    shape: Option<PropexNode>,
}

impl FieldSpec {
    /// Create a leaf field
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: None,
        }
    }

    /// Create a field whose value is validated structurally
    pub fn nested(name: impl Into<String>, shape: PropexNode) -> Self {
        Self {
            name: name.into(),
            shape: Some(shape),
        }
    }

    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nested shape, if the field is a container
    pub fn shape(&self) -> Option<&PropexNode> {
        self.shape.as_ref()
    }

    /// Returns true when the field has no nested shape
    pub fn is_leaf(&self) -> bool {
        self.shape.is_none()
    }
}

impl PropexNode {
    /// An empty object shape (`{}`)
    pub fn empty_object() -> Self {
        Self::Object(Vec::new())
    }

    /// An array shape with no element shape (`[]`)
    pub fn empty_array() -> Self {
        Self::Array(None)
    }

    /// An array shape whose elements follow `element`
    pub fn array_of(element: PropexNode) -> Self {
        Self::Array(Some(Box::new(element)))
    }

    /// Returns true for object nodes
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns true for array nodes
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Fields of an object node; empty for arrays
    pub fn fields(&self) -> &[FieldSpec] {
        match self {
            Self::Object(fields) => fields,
            Self::Array(_) => &[],
        }
    }

    /// Looks up a field of an object node by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields().iter().find(|field| field.name == name)
    }

    /// Element shape of an array node
    pub fn element(&self) -> Option<&PropexNode> {
        match self {
            Self::Array(element) => element.as_deref(),
            Self::Object(_) => None,
        }
    }

    /// Bracket nesting depth (`{}` is 1, `{a[{b}]}` is 3)
    pub fn depth(&self) -> usize {
        let inner = match self {
            Self::Object(fields) => fields
                .iter()
                .filter_map(FieldSpec::shape)
                .map(PropexNode::depth)
                .max()
                .unwrap_or(0),
            Self::Array(element) => element.as_deref().map_or(0, PropexNode::depth),
        };
        1 + inner
    }
}

/// Renders the canonical Propex text, without whitespace.
impl fmt::Display for PropexNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(fields) => {
                f.write_str("{")?;
                for (index, field) in fields.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{field}")?;
                }
                f.write_str("}")
            }
            Self::Array(element) => {
                f.write_str("[")?;
                if let Some(element) = element {
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        match &self.shape {
            Some(shape) => write!(f, "{shape}"),
            None => Ok(()),
        }
    }
}
