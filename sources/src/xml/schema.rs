//! NodeSet XML schema structures
//!
//! These structs map to the OPC UA `UANodeSet` schema. Only the elements
//! needed to generate an address space are implemented. Attribute values
//! are validated when read, so booleans and integers arrive typed; node
//! identifier literals stay as text because parsing them is part of code
//! generation.

use nodesetc_dsl::core::{Located, SourceSpan};
use nodesetc_dsl::node::{LocalizedText, NodeKind};

/// The root `UANodeSet` element.
///
/// Node elements may be interleaved in any order in the document. Each kind
/// is collected into its own list, keeping document order within the kind.
#[derive(Debug, Default)]
pub struct UANodeSet {
    pub aliases: Vec<Alias>,
    pub objects: Vec<UAObject>,
    pub object_types: Vec<UAObjectType>,
    pub data_types: Vec<UADataType>,
    pub reference_types: Vec<UAReferenceType>,
    pub variables: Vec<UAVariable>,
    pub variable_types: Vec<UAVariableType>,
    pub methods: Vec<UAMethod>,
}

impl UANodeSet {
    /// The number of node elements of every kind.
    pub fn node_count(&self) -> usize {
        self.objects.len()
            + self.object_types.len()
            + self.data_types.len()
            + self.reference_types.len()
            + self.variables.len()
            + self.variable_types.len()
            + self.methods.len()
    }
}

/// An entry of the `Aliases` section, `<Alias Alias="Int32">i=6</Alias>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub alias: String,
    /// The identifier literal that the alias stands for.
    pub target: String,
    pub span: SourceSpan,
}

/// A `<Reference>` child of the `References` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub reference_type: String,
    /// The `IsForward` attribute, `None` when it is absent.
    pub is_forward: Option<bool>,
    /// The identifier literal of the referenced node.
    pub target: String,
    pub span: SourceSpan,
}

/// The attributes and children that every node element has.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UANode {
    pub node_id: String,
    pub browse_name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub references: Vec<Reference>,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UAObject {
    pub base: UANode,
    pub event_notifier: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UAObjectType {
    pub base: UANode,
    pub is_abstract: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UADataType {
    pub base: UANode,
    pub is_abstract: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UAReferenceType {
    pub base: UANode,
    pub is_abstract: bool,
    pub symmetric: bool,
    pub inverse_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UAVariable {
    pub base: UANode,
    /// An alias, an identifier literal or a well-known type name.
    pub data_type: Option<String>,
    pub value_rank: Option<i32>,
    pub array_dimensions: Option<Vec<u32>>,
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UAVariableType {
    pub base: UANode,
    pub data_type: Option<String>,
    pub is_abstract: bool,
    pub value_rank: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UAMethod {
    pub base: UANode,
    pub executable: bool,
    pub user_executable: bool,
}

impl Default for UAMethod {
    fn default() -> Self {
        Self {
            base: UANode::default(),
            executable: true,
            user_executable: true,
        }
    }
}

/// The content of the `Value` element of a variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    ListOfExtensionObject(Vec<ExtensionObject>),
    Scalar(ScalarValue),
    /// Any other value, identified by its element name.
    Unsupported(String),
}

/// A single value of a built-in type.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Boolean(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(String),
    LocalizedText(LocalizedText),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionObject {
    /// The `TypeId/Identifier` literal as declared.
    pub type_id: Option<String>,
    pub body: ExtensionObjectBody,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionObjectBody {
    Argument(ArgumentElement),
    /// A body of any other structure, identified by its element name.
    Other(String),
    Empty,
}

/// The `<Argument>` structure of an extension object body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentElement {
    pub name: String,
    /// The `DataType/Identifier` literal.
    pub data_type: Option<String>,
    pub value_rank: Option<i32>,
    pub description: Option<LocalizedText>,
    pub span: SourceSpan,
}

/// Gives access to the common part of every node element.
pub trait NodeElement: Located {
    fn base(&self) -> &UANode;
    fn kind(&self) -> NodeKind;
}

macro_rules! node_element {
    ($struct_name:ident, $kind:ident) => {
        impl NodeElement for $struct_name {
            fn base(&self) -> &UANode {
                &self.base
            }

            fn kind(&self) -> NodeKind {
                NodeKind::$kind
            }
        }

        impl Located for $struct_name {
            fn span(&self) -> SourceSpan {
                self.base.span.clone()
            }
        }
    };
}

node_element!(UAObject, Object);
node_element!(UAObjectType, ObjectType);
node_element!(UADataType, DataType);
node_element!(UAReferenceType, ReferenceType);
node_element!(UAVariable, Variable);
node_element!(UAVariableType, VariableType);
node_element!(UAMethod, Method);

impl Located for Reference {
    fn span(&self) -> SourceSpan {
        self.span.clone()
    }
}

impl Located for ArgumentElement {
    fn span(&self) -> SourceSpan {
        self.span.clone()
    }
}
