//! NodeSet XML reader using roxmltree
//!
//! This module reads a `UANodeSet` document into the schema structs in a
//! single pass. Elements are matched by local name so that documents that
//! prefix the types namespace (`uax:ListOfExtensionObject`) read the same as
//! documents that make it the default namespace.

use std::str::FromStr;

use log::{debug, trace};
use nodesetc_dsl::{
    core::{FileId, SourceSpan},
    diagnostic::{Diagnostic, Label},
    node::{LocalizedText, NodeKind},
};
use nodesetc_problems::Problem;
use roxmltree::Node;

use super::schema::{
    Alias, ArgumentElement, ExtensionObject, ExtensionObjectBody, Reference, ScalarValue,
    UADataType, UAMethod, UANode, UANodeSet, UAObject, UAObjectType, UAReferenceType, UAVariable,
    UAVariableType, Value,
};

const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Parse a NodeSet XML document into a `UANodeSet`.
///
/// Returns a `Diagnostic` error with the location of the offending element
/// if the document is not well-formed, is not a NodeSet, or has an attribute
/// whose value does not match the attribute type.
pub fn parse_node_set(xml_content: &str, file_id: &FileId) -> Result<UANodeSet, Diagnostic> {
    let doc = roxmltree::Document::parse(xml_content).map_err(|e| {
        Diagnostic::problem(
            Problem::XmlMalformed,
            Label::file(file_id.clone(), format!("XML parse error: {}", e)),
        )
    })?;

    let root = doc.root_element();
    if root.tag_name().name() != "UANodeSet" {
        return Err(Diagnostic::problem(
            Problem::NotNodeSet,
            Label::file(
                file_id.clone(),
                format!(
                    "Expected root element 'UANodeSet', found '{}'",
                    root.tag_name().name()
                ),
            ),
        ));
    }

    let node_set = Reader { file_id }.node_set(root)?;
    debug!(
        "Parsed node set {} with {} aliases and {} nodes",
        file_id,
        node_set.aliases.len(),
        node_set.node_count()
    );
    Ok(node_set)
}

struct Reader<'a> {
    file_id: &'a FileId,
}

impl Reader<'_> {
    fn node_set(&self, node: Node) -> Result<UANodeSet, Diagnostic> {
        let mut node_set = UANodeSet::default();

        for child in elements(node) {
            match child.tag_name().name() {
                "Aliases" => node_set.aliases = self.aliases(child),
                "UAObject" => node_set.objects.push(self.object(child)?),
                "UAObjectType" => node_set.object_types.push(self.object_type(child)?),
                "UADataType" => node_set.data_types.push(self.data_type(child)?),
                "UAReferenceType" => node_set.reference_types.push(self.reference_type(child)?),
                "UAVariable" => node_set.variables.push(self.variable(child)?),
                "UAVariableType" => node_set.variable_types.push(self.variable_type(child)?),
                "UAMethod" => node_set.methods.push(self.method(child)?),
                // NamespaceUris, Models, Extensions and anything else
                other => trace!("Ignoring element {}", other),
            }
        }

        Ok(node_set)
    }

    fn aliases(&self, node: Node) -> Vec<Alias> {
        elements(node)
            .filter(|child| child.tag_name().name() == "Alias")
            .map(|child| Alias {
                alias: child.attribute("Alias").unwrap_or("").to_string(),
                target: text(child).trim().to_string(),
                span: self.span(child),
            })
            .collect()
    }

    fn base(&self, node: Node, kind: NodeKind) -> Result<UANode, Diagnostic> {
        let node_id = node.attribute("NodeId").ok_or_else(|| {
            Diagnostic::problem(
                Problem::MissingNodeId,
                Label::span(&self.span(node), kind.element_name()),
            )
        })?;

        let mut base = UANode {
            node_id: node_id.to_string(),
            browse_name: node.attribute("BrowseName").unwrap_or("").to_string(),
            span: self.span(node),
            ..Default::default()
        };

        let mut display_name = None;
        for child in elements(node) {
            match child.tag_name().name() {
                // Only the first of possibly several localized names is kept
                "DisplayName" if display_name.is_none() => display_name = Some(text(child)),
                "Description" if base.description.is_none() => {
                    base.description = Some(text(child))
                }
                "References" => base.references = self.references(child)?,
                _ => {}
            }
        }
        base.display_name = display_name.unwrap_or_default();

        Ok(base)
    }

    fn references(&self, node: Node) -> Result<Vec<Reference>, Diagnostic> {
        elements(node)
            .filter(|child| child.tag_name().name() == "Reference")
            .map(|child| {
                Ok(Reference {
                    reference_type: child.attribute("ReferenceType").unwrap_or("").to_string(),
                    is_forward: self.optional_bool(child, "IsForward")?,
                    target: text(child).trim().to_string(),
                    span: self.span(child),
                })
            })
            .collect()
    }

    fn object(&self, node: Node) -> Result<UAObject, Diagnostic> {
        Ok(UAObject {
            base: self.base(node, NodeKind::Object)?,
            event_notifier: self.optional_number(node, "EventNotifier")?.unwrap_or(0),
        })
    }

    fn object_type(&self, node: Node) -> Result<UAObjectType, Diagnostic> {
        Ok(UAObjectType {
            base: self.base(node, NodeKind::ObjectType)?,
            is_abstract: self.bool_or(node, "IsAbstract", false)?,
        })
    }

    fn data_type(&self, node: Node) -> Result<UADataType, Diagnostic> {
        Ok(UADataType {
            base: self.base(node, NodeKind::DataType)?,
            is_abstract: self.bool_or(node, "IsAbstract", false)?,
        })
    }

    fn reference_type(&self, node: Node) -> Result<UAReferenceType, Diagnostic> {
        Ok(UAReferenceType {
            base: self.base(node, NodeKind::ReferenceType)?,
            is_abstract: self.bool_or(node, "IsAbstract", false)?,
            symmetric: self.bool_or(node, "Symmetric", false)?,
            inverse_name: child_element(node, "InverseName").map(text),
        })
    }

    fn variable(&self, node: Node) -> Result<UAVariable, Diagnostic> {
        let value = match child_element(node, "Value") {
            Some(value) => self.value(value)?,
            None => None,
        };

        Ok(UAVariable {
            base: self.base(node, NodeKind::Variable)?,
            data_type: node.attribute("DataType").map(String::from),
            value_rank: self.optional_number(node, "ValueRank")?,
            array_dimensions: self.array_dimensions(node)?,
            value,
        })
    }

    fn variable_type(&self, node: Node) -> Result<UAVariableType, Diagnostic> {
        Ok(UAVariableType {
            base: self.base(node, NodeKind::VariableType)?,
            data_type: node.attribute("DataType").map(String::from),
            is_abstract: self.bool_or(node, "IsAbstract", false)?,
            value_rank: self.optional_number(node, "ValueRank")?,
        })
    }

    fn method(&self, node: Node) -> Result<UAMethod, Diagnostic> {
        Ok(UAMethod {
            base: self.base(node, NodeKind::Method)?,
            executable: self.bool_or(node, "Executable", true)?,
            user_executable: self.bool_or(node, "UserExecutable", true)?,
        })
    }

    /// Reads the single element inside `<Value>`. An empty value element is
    /// the same as no value.
    fn value(&self, node: Node) -> Result<Option<Value>, Diagnostic> {
        let Some(inner) = elements(node).next() else {
            return Ok(None);
        };

        let name = inner.tag_name().name();
        let value = match name {
            "ListOfExtensionObject" => Value::ListOfExtensionObject(
                elements(inner)
                    .filter(|child| child.tag_name().name() == "ExtensionObject")
                    .map(|child| self.extension_object(child))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            "Boolean" => Value::Scalar(ScalarValue::Boolean(self.bool_text(inner)?)),
            "SByte" => Value::Scalar(ScalarValue::SByte(self.number_text(inner)?)),
            "Byte" => Value::Scalar(ScalarValue::Byte(self.number_text(inner)?)),
            "Int16" => Value::Scalar(ScalarValue::Int16(self.number_text(inner)?)),
            "UInt16" => Value::Scalar(ScalarValue::UInt16(self.number_text(inner)?)),
            "Int32" => Value::Scalar(ScalarValue::Int32(self.number_text(inner)?)),
            "UInt32" => Value::Scalar(ScalarValue::UInt32(self.number_text(inner)?)),
            "Int64" => Value::Scalar(ScalarValue::Int64(self.number_text(inner)?)),
            "UInt64" => Value::Scalar(ScalarValue::UInt64(self.number_text(inner)?)),
            "Float" => Value::Scalar(ScalarValue::Float(self.number_text(inner)?)),
            "Double" => Value::Scalar(ScalarValue::Double(self.number_text(inner)?)),
            "String" => Value::Scalar(ScalarValue::String(text(inner))),
            "LocalizedText" => Value::Scalar(ScalarValue::LocalizedText(localized_text(inner))),
            other => Value::Unsupported(other.to_string()),
        };
        Ok(Some(value))
    }

    fn extension_object(&self, node: Node) -> Result<ExtensionObject, Diagnostic> {
        let type_id = child_element(node, "TypeId")
            .and_then(|type_id| child_element(type_id, "Identifier"))
            .map(|identifier| text(identifier).trim().to_string());

        let body = match child_element(node, "Body").and_then(|body| elements(body).next()) {
            Some(structure) if structure.tag_name().name() == "Argument" => {
                ExtensionObjectBody::Argument(self.argument(structure)?)
            }
            Some(structure) => ExtensionObjectBody::Other(structure.tag_name().name().to_string()),
            None => ExtensionObjectBody::Empty,
        };

        Ok(ExtensionObject {
            type_id,
            body,
            span: self.span(node),
        })
    }

    fn argument(&self, node: Node) -> Result<ArgumentElement, Diagnostic> {
        let value_rank = match child_element(node, "ValueRank") {
            Some(rank) => Some(self.number_text(rank)?),
            None => None,
        };

        let description = child_element(node, "Description")
            .filter(|description| !is_nil(*description))
            .map(localized_text);

        Ok(ArgumentElement {
            name: child_element(node, "Name").map(text).unwrap_or_default(),
            data_type: child_element(node, "DataType")
                .and_then(|data_type| child_element(data_type, "Identifier"))
                .map(|identifier| text(identifier).trim().to_string()),
            value_rank,
            description,
            span: self.span(node),
        })
    }

    fn array_dimensions(&self, node: Node) -> Result<Option<Vec<u32>>, Diagnostic> {
        let Some(value) = node.attribute("ArrayDimensions") else {
            return Ok(None);
        };
        if value.trim().is_empty() {
            return Ok(None);
        }
        value
            .split(',')
            .map(|dimension| {
                dimension
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| self.invalid_attribute(node, "ArrayDimensions", value))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    fn bool_or(&self, node: Node, name: &str, default: bool) -> Result<bool, Diagnostic> {
        Ok(self.optional_bool(node, name)?.unwrap_or(default))
    }

    fn optional_bool(&self, node: Node, name: &str) -> Result<Option<bool>, Diagnostic> {
        match node.attribute(name) {
            Some(value) => parse_bool(value)
                .map(Some)
                .ok_or_else(|| self.invalid_attribute(node, name, value)),
            None => Ok(None),
        }
    }

    fn optional_number<T: FromStr>(&self, node: Node, name: &str) -> Result<Option<T>, Diagnostic> {
        match node.attribute(name) {
            Some(value) => value
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|_| self.invalid_attribute(node, name, value)),
            None => Ok(None),
        }
    }

    fn bool_text(&self, node: Node) -> Result<bool, Diagnostic> {
        let value = text(node);
        parse_bool(value.trim()).ok_or_else(|| self.invalid_text(node, &value))
    }

    fn number_text<T: FromStr>(&self, node: Node) -> Result<T, Diagnostic> {
        let value = text(node);
        value
            .trim()
            .parse::<T>()
            .map_err(|_| self.invalid_text(node, &value))
    }

    fn invalid_attribute(&self, node: Node, name: &str, value: &str) -> Diagnostic {
        Diagnostic::problem(
            Problem::InvalidAttribute,
            Label::span(
                &self.span(node),
                format!("Attribute {} has value '{}'", name, value),
            ),
        )
        .with_context("element", node.tag_name().name())
    }

    fn invalid_text(&self, node: Node, value: &str) -> Diagnostic {
        Diagnostic::problem(
            Problem::InvalidAttribute,
            Label::span(
                &self.span(node),
                format!("Element {} has value '{}'", node.tag_name().name(), value),
            ),
        )
    }

    fn span(&self, node: Node) -> SourceSpan {
        let range = node.range();
        SourceSpan::range(range.start, range.end).with_file_id(self.file_id)
    }
}

/// The child elements, skipping text, comments and processing instructions.
fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    elements(node).find(|child| child.tag_name().name() == name)
}

/// The text content of an element, empty when the element has none.
fn text(node: Node) -> String {
    node.text().unwrap_or("").to_string()
}

fn localized_text(node: Node) -> LocalizedText {
    match (child_element(node, "Locale"), child_element(node, "Text")) {
        (None, None) => LocalizedText::new(node.attribute("Locale").unwrap_or(""), text(node)),
        (locale, text_node) => LocalizedText::new(
            locale.map(text).unwrap_or_default(),
            text_node.map(text).unwrap_or_default(),
        ),
    }
}

fn is_nil(node: Node) -> bool {
    node.attribute((XSI_NAMESPACE, "nil"))
        .and_then(parse_bool)
        .unwrap_or(false)
}

/// Parses an `xs:boolean` lexical value.
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
