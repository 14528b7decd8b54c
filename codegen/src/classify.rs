//! Groups the node elements of a NodeSet into one ordered sequence.
//!
//! Nodes are grouped by kind in the order of [`NodeKind::ALL`] and keep
//! their document order within a kind. Each entry receives its ordinal
//! here; the ordinal names the insertion routine of the node.

use nodesetc_dsl::{
    core::{Located, SourceSpan},
    node::NodeKind,
};
use nodesetc_sources::xml::{
    NodeElement, UADataType, UAMethod, UANode, UANodeSet, UAObject, UAObjectType,
    UAReferenceType, UAVariable, UAVariableType,
};

/// A node element of any kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SchemaNode<'a> {
    Object(&'a UAObject),
    ObjectType(&'a UAObjectType),
    DataType(&'a UADataType),
    ReferenceType(&'a UAReferenceType),
    Variable(&'a UAVariable),
    VariableType(&'a UAVariableType),
    Method(&'a UAMethod),
}

impl<'a> SchemaNode<'a> {
    fn element(&self) -> &'a dyn NodeElement {
        match *self {
            SchemaNode::Object(node) => node,
            SchemaNode::ObjectType(node) => node,
            SchemaNode::DataType(node) => node,
            SchemaNode::ReferenceType(node) => node,
            SchemaNode::Variable(node) => node,
            SchemaNode::VariableType(node) => node,
            SchemaNode::Method(node) => node,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.element().kind()
    }

    pub fn base(&self) -> &'a UANode {
        self.element().base()
    }
}

impl Located for SchemaNode<'_> {
    fn span(&self) -> SourceSpan {
        self.element().span()
    }
}

/// A node together with its 1-based position in the classified sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeEntry<'a> {
    pub ordinal: usize,
    pub node: SchemaNode<'a>,
}

impl NodeEntry<'_> {
    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    /// The name of the routine that inserts this node.
    pub fn routine_name(&self) -> String {
        format!(
            "add_{}_{}",
            self.kind().name().to_ascii_lowercase(),
            self.ordinal
        )
    }
}

/// Returns the node entries of the node set in classification order.
pub fn classify(node_set: &UANodeSet) -> Vec<NodeEntry<'_>> {
    let mut nodes: Vec<SchemaNode<'_>> = Vec::with_capacity(node_set.node_count());
    for kind in NodeKind::ALL {
        match kind {
            NodeKind::Object => nodes.extend(node_set.objects.iter().map(SchemaNode::Object)),
            NodeKind::ObjectType => {
                nodes.extend(node_set.object_types.iter().map(SchemaNode::ObjectType))
            }
            NodeKind::DataType => {
                nodes.extend(node_set.data_types.iter().map(SchemaNode::DataType))
            }
            NodeKind::ReferenceType => nodes.extend(
                node_set
                    .reference_types
                    .iter()
                    .map(SchemaNode::ReferenceType),
            ),
            NodeKind::Variable => {
                nodes.extend(node_set.variables.iter().map(SchemaNode::Variable))
            }
            NodeKind::VariableType => nodes.extend(
                node_set
                    .variable_types
                    .iter()
                    .map(SchemaNode::VariableType),
            ),
            NodeKind::Method => nodes.extend(node_set.methods.iter().map(SchemaNode::Method)),
        }
    }

    nodes
        .into_iter()
        .enumerate()
        .map(|(index, node)| NodeEntry {
            ordinal: index + 1,
            node,
        })
        .collect()
}
