//! The intermediate node model.
//!
//! These are the values derived from the schema elements that code
//! generation works with: the kind of a node, its reference edges and the
//! argument descriptors decoded from variable values.

use core::fmt;

/// The kinds of node that a NodeSet declares.
///
/// The declaration order is the order in which the classifier groups
/// nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Object,
    ObjectType,
    DataType,
    ReferenceType,
    Variable,
    VariableType,
    Method,
}

impl NodeKind {
    /// Every kind, in classification order.
    pub const ALL: [NodeKind; 7] = [
        NodeKind::Object,
        NodeKind::ObjectType,
        NodeKind::DataType,
        NodeKind::ReferenceType,
        NodeKind::Variable,
        NodeKind::VariableType,
        NodeKind::Method,
    ];

    /// The name of the kind, which is also the name of the address space
    /// type that represents the kind.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Object => "Object",
            NodeKind::ObjectType => "ObjectType",
            NodeKind::DataType => "DataType",
            NodeKind::ReferenceType => "ReferenceType",
            NodeKind::Variable => "Variable",
            NodeKind::VariableType => "VariableType",
            NodeKind::Method => "Method",
        }
    }

    /// The element name of the kind in a NodeSet document.
    pub fn element_name(&self) -> &'static str {
        match self {
            NodeKind::Object => "UAObject",
            NodeKind::ObjectType => "UAObjectType",
            NodeKind::DataType => "UADataType",
            NodeKind::ReferenceType => "UAReferenceType",
            NodeKind::Variable => "UAVariable",
            NodeKind::VariableType => "UAVariableType",
            NodeKind::Method => "UAMethod",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text with an optional locale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalizedText {
    pub locale: String,
    pub text: String,
}

impl LocalizedText {
    pub fn new(locale: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            text: text.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceDirection {
    Forward,
    Inverse,
}

/// A typed, directed edge from the declaring node to a target node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceEdge {
    /// The identifier literal of the node at the other end.
    pub target: String,
    /// The reference type as written in the document, normally a symbolic
    /// name such as `HasSubtype`.
    pub reference_type: String,
    pub direction: ReferenceDirection,
}

/// The array dimensions that an argument declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgumentDimensions {
    /// No dimensions are given.
    Unspecified,
    /// A single dimension of variable length.
    VariableLength,
}

/// An input or output argument of a method, decoded from the extension
/// objects in the value of a variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgumentDescriptor {
    pub name: String,
    /// The identifier literal of the argument data type.
    pub data_type: String,
    pub value_rank: i32,
    pub array_dimensions: ArgumentDimensions,
    pub description: Option<LocalizedText>,
}
