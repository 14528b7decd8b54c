//! Builds the code model of each partition.
//!
//! A partition becomes a module with one `populate_address_space` entry
//! point and one insertion routine per node. The entry point calls the
//! insertion routines in ordinal order.

use log::{trace, warn};
use nodesetc_dsl::{
    core::{FileId, Located, SourceSpan},
    diagnostic::{Diagnostic, Label},
    node::{
        ArgumentDescriptor, ArgumentDimensions, LocalizedText, NodeKind, ReferenceDirection,
        ReferenceEdge,
    },
    node_id::{Identifier, IdentifierError, IdentifierValue},
};
use nodesetc_problems::Problem;
use nodesetc_sources::xml::{
    ScalarValue, UADataType, UAMethod, UAObject, UAObjectType, UAReferenceType, UAVariable,
    UAVariableType, Value,
};

use crate::{
    alias::AliasTable,
    arguments::{decode_arguments, ARGUMENT_ENCODING_DEFAULT_BINARY},
    classify::{NodeEntry, SchemaNode},
    code::{Expr, Function, Module, Param, Stmt, Use, UseTree},
    config::CompilerConfig,
    partition::Partition,
    references::build_edges,
};

/// The name of the entry point of every generated module.
pub const ENTRY_POINT: &str = "populate_address_space";

const COPYRIGHT_HEADER: [&str; 2] = ["OPCUA for Rust", "SPDX-License-Identifier: MPL-2.0"];

/// Builds modules for the partitions of one document.
///
/// The emitter collects the non-fatal diagnostics of every partition it
/// builds.
pub struct Emitter<'a> {
    config: &'a CompilerConfig,
    aliases: &'a AliasTable,
    file_id: &'a FileId,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Emitter<'a> {
    pub fn new(config: &'a CompilerConfig, aliases: &'a AliasTable, file_id: &'a FileId) -> Self {
        Self {
            config,
            aliases,
            file_id,
            diagnostics: vec![],
        }
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Builds the module for one partition.
    pub fn partition(&mut self, partition: &Partition<'_, NodeEntry<'_>>) -> Result<Module, Diagnostic> {
        let mut functions = vec![self.entry_point(partition.entries)];
        for entry in partition.entries {
            functions.push(self.insertion(entry)?);
        }

        Ok(Module {
            header: self.header(),
            children: vec![],
            uses: self.uses(),
            functions,
        })
    }

    /// Builds the module that declares the partition modules and calls the
    /// entry point of each one.
    pub fn index(&self, module_names: &[String]) -> Module {
        let body = module_names
            .iter()
            .map(|name| {
                Stmt::Expr(Expr::call(
                    &format!("{}::{}", name, ENTRY_POINT),
                    vec![Expr::path("address_space")],
                ))
            })
            .collect();

        Module {
            header: self.header(),
            children: module_names.to_vec(),
            uses: vec![Use::new(UseTree::path(&format!(
                "{}::address_space::types::*",
                self.config.crate_qualifier()
            )))
            .with_attribute("allow(unused_imports)")],
            functions: vec![populate_function(body)],
        }
    }

    fn header(&self) -> Vec<String> {
        let mut header = vec![];
        if self.config.include_copyright_header {
            header.extend(COPYRIGHT_HEADER.iter().map(|line| line.to_string()));
        }
        header.push(single_line(&format!(
            "This file was autogenerated from {} by {}",
            self.file_id.file_name(),
            self.config.generator_label
        )));
        header.push("DO NOT EDIT THIS FILE".to_string());
        header
    }

    fn uses(&self) -> Vec<Use> {
        let mut uses = vec![Use::new(UseTree::group(
            "std",
            vec![UseTree::path("convert::TryFrom"), UseTree::path("str::FromStr")],
        ))
        .with_attribute("allow(unused_imports)")];

        if self.config.trace_diagnostics {
            uses.push(Use::new(UseTree::path("log::trace")).with_attribute("allow(unused_imports)"));
        }

        let prelude = [
            "DataTypeId",
            "ExtensionObject",
            "LocalizedText",
            "NodeId",
            "ReferenceTypeId",
            "service_types::Argument",
            "UAString",
            "Variant",
            "VariantTypeId",
        ];
        uses.push(
            Use::new(UseTree::group(
                self.config.crate_qualifier(),
                vec![
                    UseTree::group(
                        "address_space",
                        vec![UseTree::path("EventNotifier"), UseTree::path("types::*")],
                    ),
                    UseTree::group("prelude", prelude.iter().map(|p| UseTree::path(p)).collect()),
                ],
            ))
            .with_attribute("allow(unused_imports)"),
        );
        uses
    }

    fn entry_point(&self, entries: &[NodeEntry<'_>]) -> Function {
        let mut body = vec![];
        if self.config.trace_diagnostics {
            body.push(Stmt::Expr(trace_macro(format!(
                "Populating address space with node set {}",
                self.file_id.file_name()
            ))));
        }
        body.extend(entries.iter().map(|entry| {
            Stmt::Expr(Expr::call(
                &entry.routine_name(),
                vec![Expr::path("address_space")],
            ))
        }));
        populate_function(body)
    }

    fn insertion(&mut self, entry: &NodeEntry<'_>) -> Result<Function, Diagnostic> {
        let base = entry.node.base();
        trace!("Emitting {} {} as {}", entry.kind(), base.node_id, entry.routine_name());

        let mut body = vec![Stmt::Comment(entry.kind().name().to_string())];

        let (browse_name, display_name) = if base.browse_name == base.display_name {
            body.push(Stmt::let_("name", Expr::str(&base.browse_name)));
            ("name", "name")
        } else {
            body.push(Stmt::let_("browse_name", Expr::str(&base.browse_name)));
            body.push(Stmt::let_("display_name", Expr::str(&base.display_name)));
            ("browse_name", "display_name")
        };

        let mut value_arguments = false;
        if let SchemaNode::Variable(variable) = entry.node {
            let (value, is_arguments) = self.variable_value(variable)?;
            body.push(Stmt::let_("value", value));
            value_arguments = is_arguments;
        }

        body.push(Stmt::let_(
            "node_id",
            self.node_id(&base.node_id, &entry.node.span())?,
        ));

        if self.config.trace_diagnostics {
            body.push(Stmt::Expr(trace_macro(format!(
                "Inserting node id {} of type {}",
                base.node_id,
                entry.kind()
            ))));
        }

        let mut args = vec![
            Expr::reference(Expr::path("node_id")),
            Expr::path(browse_name),
            Expr::path(display_name),
        ];
        args.extend(match entry.node {
            SchemaNode::Object(node) => self.object_args(node),
            SchemaNode::ObjectType(node) => self.object_type_args(node),
            SchemaNode::DataType(node) => self.data_type_args(node),
            SchemaNode::ReferenceType(node) => self.reference_type_args(node),
            SchemaNode::Variable(node) => self.variable_args(node, value_arguments)?,
            SchemaNode::VariableType(node) => self.variable_type_args(node)?,
            SchemaNode::Method(node) => self.method_args(node),
        });
        let constructor = match entry.kind() {
            NodeKind::Variable => "Variable::new_data_value".to_string(),
            kind => format!("{}::new", kind.name()),
        };
        let node = Expr::call(&constructor, args);

        match base.description.as_deref().filter(|d| !d.is_empty()) {
            Some(description) => {
                body.push(Stmt::let_mut("node", node));
                body.push(Stmt::Expr(Expr::method(
                    Expr::path("node"),
                    "set_description",
                    vec![Expr::call("LocalizedText::from", vec![Expr::str(description)])],
                )));
            }
            None => body.push(Stmt::let_("node", node)),
        }

        let edges = build_edges(&base.references);
        let insert = self.insert(entry.kind(), &edges, &entry.node.span())?;
        body.push(Stmt::let_("_", insert));

        Ok(Function {
            attributes: vec![],
            public: false,
            name: entry.routine_name(),
            params: vec![Param::new("address_space", "&mut AddressSpace")],
            body,
        })
    }

    fn object_args(&self, node: &UAObject) -> Vec<Expr> {
        let event_notifier = if node.event_notifier == 0 {
            Expr::call("EventNotifier::empty", vec![])
        } else {
            Expr::call(
                "EventNotifier::from_bits_truncate",
                vec![Expr::number(node.event_notifier)],
            )
        };
        vec![event_notifier]
    }

    fn object_type_args(&self, node: &UAObjectType) -> Vec<Expr> {
        vec![Expr::Bool(node.is_abstract)]
    }

    fn data_type_args(&self, node: &UADataType) -> Vec<Expr> {
        vec![Expr::Bool(node.is_abstract)]
    }

    fn reference_type_args(&self, node: &UAReferenceType) -> Vec<Expr> {
        let inverse_name = node
            .inverse_name
            .as_deref()
            .map(|name| localized_text(&LocalizedText::new("", name)));
        vec![
            Expr::option(inverse_name),
            Expr::Bool(node.symmetric),
            Expr::Bool(node.is_abstract),
        ]
    }

    fn variable_args(&mut self, node: &UAVariable, value_arguments: bool) -> Result<Vec<Expr>, Diagnostic> {
        let data_type = match &node.data_type {
            Some(data_type) => self.data_type(data_type, &node.span())?,
            None => {
                warn!("Variable {} does not declare a data type", node.base.node_id);
                self.diagnostics.push(Diagnostic::problem(
                    Problem::MissingDataType,
                    Label::span(&node.span(), format!("Variable {}", node.base.node_id)),
                ));
                Expr::path("DataTypeId::Boolean")
            }
        };

        let array_dimensions = node.array_dimensions.as_ref().map(|dimensions| {
            Expr::Vec(dimensions.iter().map(|d| Expr::number(d)).collect())
        });

        let value = if value_arguments {
            Expr::Tuple(vec![
                Expr::path("VariantTypeId::ExtensionObject"),
                Expr::path("value"),
            ])
        } else {
            Expr::path("value")
        };

        Ok(vec![
            data_type,
            Expr::option(node.value_rank.map(Expr::number)),
            Expr::option(array_dimensions),
            value,
        ])
    }

    fn variable_type_args(&mut self, node: &UAVariableType) -> Result<Vec<Expr>, Diagnostic> {
        let data_type = match &node.data_type {
            Some(data_type) => self.data_type(data_type, &node.span())?,
            None => Expr::call("NodeId::null", vec![]),
        };
        Ok(vec![
            data_type,
            Expr::Bool(node.is_abstract),
            Expr::number(node.value_rank.unwrap_or(-1)),
        ])
    }

    fn method_args(&self, node: &UAMethod) -> Vec<Expr> {
        vec![Expr::Bool(node.executable), Expr::Bool(node.user_executable)]
    }

    /// Returns the value binding of a variable and whether the value is a
    /// list of arguments.
    fn variable_value(&mut self, node: &UAVariable) -> Result<(Expr, bool), Diagnostic> {
        let value = match &node.value {
            Some(value) => value,
            None => return Ok((Expr::path("Variant::Empty"), false)),
        };

        match value {
            Value::ListOfExtensionObject(_) => {
                let arguments = decode_arguments(value, &mut self.diagnostics);
                if arguments.is_empty() {
                    // An empty vec! has no element type to infer.
                    return Ok((Expr::path("Variant::Empty"), false));
                }
                let items = arguments
                    .iter()
                    .map(|argument| self.argument(argument, &node.span()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((Expr::Vec(items), true))
            }
            Value::Scalar(scalar) => Ok((Expr::call("Variant::from", vec![scalar_value(scalar)]), false)),
            Value::Unsupported(name) => {
                warn!(
                    "Variable {} has a value of type {} that is not generated",
                    node.base.node_id, name
                );
                self.diagnostics.push(
                    Diagnostic::problem(
                        Problem::UnsupportedValue,
                        Label::span(&node.span(), format!("Variable {}", node.base.node_id)),
                    )
                    .with_context("value", name),
                );
                Ok((Expr::path("Variant::Empty"), false))
            }
        }
    }

    fn argument(&self, argument: &ArgumentDescriptor, span: &SourceSpan) -> Result<Expr, Diagnostic> {
        let array_dimensions = match argument.array_dimensions {
            ArgumentDimensions::VariableLength => Expr::some(Expr::Vec(vec![Expr::number(0)])),
            ArgumentDimensions::Unspecified => Expr::none(),
        };
        let description = argument
            .description
            .clone()
            .unwrap_or_default();

        let body = Expr::Struct {
            path: "Argument".to_string(),
            fields: vec![
                (
                    "name".to_string(),
                    Expr::call("UAString::from", vec![Expr::str(&argument.name)]),
                ),
                ("data_type".to_string(), self.node_id(&argument.data_type, span)?),
                ("value_rank".to_string(), Expr::number(argument.value_rank)),
                ("array_dimensions".to_string(), array_dimensions),
                ("description".to_string(), localized_text(&description)),
            ],
        };

        Ok(Expr::call(
            "Variant::from",
            vec![Expr::call(
                "ExtensionObject::from_encodable",
                vec![
                    self.node_id(ARGUMENT_ENCODING_DEFAULT_BINARY, span)?,
                    Expr::reference(body),
                ],
            )],
        ))
    }

    fn insert(&mut self, kind: NodeKind, edges: &[ReferenceEdge], span: &SourceSpan) -> Result<Expr, Diagnostic> {
        let mut references = vec![];
        for edge in edges {
            if Identifier::is_literal(&edge.reference_type) {
                warn!(
                    "Reference of type {} to {} is not generated",
                    edge.reference_type, edge.target
                );
                self.diagnostics.push(
                    Diagnostic::problem(
                        Problem::UnsupportedReferenceType,
                        Label::span(span, format!("Reference to {}", edge.target)),
                    )
                    .with_context("referenceType", &edge.reference_type),
                );
                continue;
            }
            if !is_symbol(&edge.reference_type) {
                return Err(Diagnostic::problem(
                    Problem::MalformedIdentifier,
                    Label::span(span, "Reference type is not a name or identifier"),
                )
                .with_context("referenceType", &edge.reference_type));
            }

            let direction = match edge.direction {
                ReferenceDirection::Forward => "ReferenceDirection::Forward",
                ReferenceDirection::Inverse => "ReferenceDirection::Inverse",
            };
            references.push(Expr::Tuple(vec![
                Expr::reference(self.node_id(&edge.target, span)?),
                Expr::reference(Expr::path(&format!("ReferenceTypeId::{}", edge.reference_type))),
                Expr::path(direction),
            ]));
        }

        if references.is_empty() {
            return Ok(Expr::MethodCall {
                receiver: Box::new(Expr::path("address_space")),
                method: "insert".to_string(),
                generics: vec![kind.name().to_string(), "ReferenceTypeId".to_string()],
                args: vec![Expr::path("node"), Expr::none()],
            });
        }

        Ok(Expr::method(
            Expr::path("address_space"),
            "insert",
            vec![
                Expr::path("node"),
                Expr::some(Expr::reference(Expr::Array(references))),
            ],
        ))
    }

    /// Returns the expression for a data type, which is an alias, an
    /// identifier literal or the name of a well-known data type.
    fn data_type(&self, data_type: &str, span: &SourceSpan) -> Result<Expr, Diagnostic> {
        let resolved = self.aliases.resolve(data_type);
        if Identifier::is_literal(resolved) {
            return self.node_id(resolved, span);
        }
        if is_symbol(resolved) {
            return Ok(Expr::method(
                Expr::path(&format!("DataTypeId::{}", resolved.trim())),
                "into",
                vec![],
            ));
        }
        Err(Diagnostic::problem(
            Problem::MalformedIdentifier,
            Label::span(span, "Data type is not an alias, name or identifier"),
        )
        .with_context("dataType", data_type))
    }

    /// Returns the expression that constructs the node identifier in the
    /// literal.
    fn node_id(&self, literal: &str, span: &SourceSpan) -> Result<Expr, Diagnostic> {
        let identifier: Identifier = literal.parse().map_err(|err: IdentifierError| {
            Diagnostic::problem(Problem::MalformedIdentifier, Label::span(span, err.to_string()))
                .with_context("identifier", literal)
        })?;
        let identifier = identifier.relocated(self.config.namespace_override());

        let namespace = Expr::number(identifier.namespace);
        Ok(match &identifier.value {
            IdentifierValue::Numeric(value) => {
                Expr::call("NodeId::new", vec![namespace, Expr::number(value)])
            }
            IdentifierValue::String(value) => {
                Expr::call("NodeId::new", vec![namespace, Expr::str(value)])
            }
            IdentifierValue::Guid(_) | IdentifierValue::Opaque(_) => Expr::method(
                Expr::call("NodeId::from_str", vec![Expr::str(&full_literal(&identifier))]),
                "unwrap",
                vec![],
            ),
        })
    }
}

fn populate_function(body: Vec<Stmt>) -> Function {
    Function {
        attributes: vec!["allow(unused_variables)".to_string()],
        public: true,
        name: ENTRY_POINT.to_string(),
        params: vec![Param::new("address_space", "&mut AddressSpace")],
        body,
    }
}

/// Replaces line breaks so that the text stays within one `//` comment.
fn single_line(text: &str) -> String {
    text.replace(|c: char| c.is_control(), " ")
}

/// A `trace!` invocation that logs the message verbatim.
fn trace_macro(message: String) -> Expr {
    Expr::Macro {
        name: "trace".to_string(),
        args: vec![Expr::str("{}"), Expr::Str(message)],
    }
}

fn localized_text(text: &LocalizedText) -> Expr {
    Expr::call(
        "LocalizedText::new",
        vec![Expr::str(&text.locale), Expr::str(&text.text)],
    )
}

/// The literal with the namespace always present, as the address space
/// parses it.
fn full_literal(identifier: &Identifier) -> String {
    let literal = identifier.to_string();
    if identifier.namespace == 0 {
        format!("ns=0;{}", literal)
    } else {
        literal
    }
}

fn scalar_value(value: &ScalarValue) -> Expr {
    match value {
        ScalarValue::Boolean(v) => Expr::Bool(*v),
        ScalarValue::SByte(v) => Expr::Number(format!("{}i8", v)),
        ScalarValue::Byte(v) => Expr::Number(format!("{}u8", v)),
        ScalarValue::Int16(v) => Expr::Number(format!("{}i16", v)),
        ScalarValue::UInt16(v) => Expr::Number(format!("{}u16", v)),
        ScalarValue::Int32(v) => Expr::Number(format!("{}i32", v)),
        ScalarValue::UInt32(v) => Expr::Number(format!("{}u32", v)),
        ScalarValue::Int64(v) => Expr::Number(format!("{}i64", v)),
        ScalarValue::UInt64(v) => Expr::Number(format!("{}u64", v)),
        ScalarValue::Float(v) => float_literal(f64::from(*v), v.is_finite(), &format!("{:?}", v), "f32"),
        ScalarValue::Double(v) => float_literal(*v, v.is_finite(), &format!("{:?}", v), "f64"),
        ScalarValue::String(v) => Expr::str(v),
        ScalarValue::LocalizedText(v) => localized_text(v),
    }
}

fn float_literal(value: f64, finite: bool, text: &str, ty: &str) -> Expr {
    if finite {
        return Expr::Number(format!("{}{}", text, ty));
    }
    let constant = if value.is_nan() {
        "NAN"
    } else if value > 0.0 {
        "INFINITY"
    } else {
        "NEG_INFINITY"
    };
    Expr::Path(format!("{}::{}", ty, constant))
}

/// Returns true if the text can follow `DataTypeId::` or `ReferenceTypeId::`
/// in generated code.
fn is_symbol(text: &str) -> bool {
    let text = text.trim();
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    text != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use nodesetc_dsl::core::SourceSpan;
    use nodesetc_sources::xml::{Alias, UANode};
    use rstest::rstest;

    fn emitter_parts() -> (CompilerConfig, AliasTable, FileId) {
        let aliases = AliasTable::from_aliases(&[
            Alias {
                alias: "Int32".to_string(),
                target: "i=6".to_string(),
                span: SourceSpan::default(),
            },
            Alias {
                alias: "Foo".to_string(),
                target: "i=100".to_string(),
                span: SourceSpan::default(),
            },
        ]);
        (CompilerConfig::default(), aliases, FileId::from_string("test.xml"))
    }

    fn expr_text(expr: Expr) -> String {
        let module = Module {
            functions: vec![Function {
                attributes: vec![],
                public: false,
                name: "f".to_string(),
                params: vec![],
                body: vec![Stmt::let_("x", expr)],
            }],
            ..Module::default()
        };
        let text = render(&module);
        text.trim_start_matches("fn f() {\n    let x = ")
            .trim_end_matches(";\n}\n")
            .to_string()
    }

    #[test]
    fn index_when_file_name_has_line_break_then_banner_one_line() {
        let (config, aliases, _) = emitter_parts();
        let file_id = FileId::from_string("a\npub fn injected() {}.xml");
        let emitter = Emitter::new(&config, &aliases, &file_id);

        let text = render(&emitter.index(&["base".to_string()]));

        assert!(text.starts_with(
            "// This file was autogenerated from a pub fn injected() {}.xml by nodesetc\n// DO NOT EDIT THIS FILE\n"
        ));
    }

    #[rstest]
    #[case("i=58", "NodeId::new(0, 58)")]
    #[case("ns=1;i=11580", "NodeId::new(1, 11580)")]
    #[case("ns=2;s=Pump.Speed", "NodeId::new(2, \"Pump.Speed\")")]
    #[case(
        "ns=1;g=09087E75-8E5E-499B-954F-F2A9603DB28A",
        "NodeId::from_str(\"ns=1;g=09087e75-8e5e-499b-954f-f2a9603db28a\").unwrap()"
    )]
    #[case("b=AQID", "NodeId::from_str(\"ns=0;b=AQID\").unwrap()")]
    fn node_id_when_literal_then_constructor(#[case] literal: &str, #[case] expected: &str) {
        let (config, aliases, file_id) = emitter_parts();
        let emitter = Emitter::new(&config, &aliases, &file_id);
        let expr = emitter.node_id(literal, &SourceSpan::default()).unwrap();
        assert_eq!(expr_text(expr), expected);
    }

    #[test]
    fn node_id_when_override_then_non_zero_namespace_relocated() {
        let (_, aliases, file_id) = emitter_parts();
        let config = CompilerConfig {
            namespace_override: 4,
            ..CompilerConfig::default()
        };
        let emitter = Emitter::new(&config, &aliases, &file_id);

        let relocated = emitter.node_id("ns=1;i=5", &SourceSpan::default()).unwrap();
        let standard = emitter.node_id("i=5", &SourceSpan::default()).unwrap();

        assert_eq!(expr_text(relocated), "NodeId::new(4, 5)");
        assert_eq!(expr_text(standard), "NodeId::new(0, 5)");
    }

    #[test]
    fn node_id_when_malformed_then_error() {
        let (config, aliases, file_id) = emitter_parts();
        let emitter = Emitter::new(&config, &aliases, &file_id);
        let err = emitter
            .node_id("ns=1;x=2", &SourceSpan::default())
            .unwrap_err();
        assert_eq!(err.code, Problem::MalformedIdentifier.code());
        assert!(err.is_error());
    }

    #[test]
    fn data_type_when_alias_then_same_as_literal() {
        let (config, aliases, file_id) = emitter_parts();
        let emitter = Emitter::new(&config, &aliases, &file_id);

        let alias = emitter.data_type("Foo", &SourceSpan::default()).unwrap();
        let literal = emitter.data_type("i=100", &SourceSpan::default()).unwrap();

        assert_eq!(alias, literal);
        assert_eq!(expr_text(alias), "NodeId::new(0, 100)");
    }

    #[test]
    fn data_type_when_well_known_name_then_data_type_id() {
        let (config, aliases, file_id) = emitter_parts();
        let emitter = Emitter::new(&config, &aliases, &file_id);
        let expr = emitter.data_type("Double", &SourceSpan::default()).unwrap();
        assert_eq!(expr_text(expr), "DataTypeId::Double.into()");
    }

    #[rstest]
    #[case("Not A Name")]
    #[case("ns=1,i=2")]
    #[case("")]
    fn data_type_when_not_name_or_literal_then_malformed(#[case] data_type: &str) {
        let (config, aliases, file_id) = emitter_parts();
        let emitter = Emitter::new(&config, &aliases, &file_id);
        let err = emitter
            .data_type(data_type, &SourceSpan::default())
            .unwrap_err();
        assert_eq!(err.code, Problem::MalformedIdentifier.code());
    }

    #[test]
    fn insertion_when_literal_reference_type_then_omitted_with_warning() {
        let (config, aliases, file_id) = emitter_parts();
        let mut emitter = Emitter::new(&config, &aliases, &file_id);
        let edges = vec![ReferenceEdge {
            target: "i=61".to_string(),
            reference_type: "i=45".to_string(),
            direction: ReferenceDirection::Forward,
        }];

        let expr = emitter
            .insert(NodeKind::ObjectType, &edges, &SourceSpan::default())
            .unwrap();

        assert_eq!(
            expr_text(expr),
            "address_space.insert::<ObjectType, ReferenceTypeId>(node, None)"
        );
        let diagnostics = emitter.into_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].code,
            Problem::UnsupportedReferenceType.code()
        );
    }

    #[test]
    fn insertion_when_inverse_edge_then_inverse_direction() {
        let (config, aliases, file_id) = emitter_parts();
        let mut emitter = Emitter::new(&config, &aliases, &file_id);
        let edges = vec![ReferenceEdge {
            target: "ns=1;i=7".to_string(),
            reference_type: "HasComponent".to_string(),
            direction: ReferenceDirection::Inverse,
        }];

        let expr = emitter
            .insert(NodeKind::Method, &edges, &SourceSpan::default())
            .unwrap();

        assert_eq!(
            expr_text(expr),
            "address_space.insert(node, Some(&[\n        (&NodeId::new(1, 7), &ReferenceTypeId::HasComponent, ReferenceDirection::Inverse),\n    ]))"
        );
    }

    #[test]
    fn partition_when_variable_without_data_type_then_boolean_and_warning() {
        let (config, aliases, file_id) = emitter_parts();
        let mut emitter = Emitter::new(&config, &aliases, &file_id);
        let variable = UAVariable {
            base: UANode {
                node_id: "ns=1;i=9".to_string(),
                browse_name: "1:Flag".to_string(),
                display_name: "Flag".to_string(),
                ..UANode::default()
            },
            ..UAVariable::default()
        };
        let entries = [NodeEntry {
            ordinal: 1,
            node: SchemaNode::Variable(&variable),
        }];

        let module = emitter
            .partition(&Partition {
                index: 0,
                entries: &entries,
            })
            .unwrap();
        let text = render(&module);

        assert!(text.contains("    let browse_name = \"1:Flag\";\n    let display_name = \"Flag\";\n"));
        assert!(text.contains("    let value = Variant::Empty;\n"));
        assert!(text.contains(
            "let node = Variable::new_data_value(&node_id, browse_name, display_name, DataTypeId::Boolean, None, None, value);"
        ));
        assert_eq!(emitter.into_diagnostics()[0].code, Problem::MissingDataType.code());
    }

    #[rstest]
    #[case(ScalarValue::Boolean(true), "true")]
    #[case(ScalarValue::SByte(-5), "-5i8")]
    #[case(ScalarValue::UInt64(7), "7u64")]
    #[case(ScalarValue::Float(1.5), "1.5f32")]
    #[case(ScalarValue::Double(1450.5), "1450.5f64")]
    #[case(ScalarValue::Double(f64::NAN), "f64::NAN")]
    #[case(ScalarValue::Float(f32::NEG_INFINITY), "f32::NEG_INFINITY")]
    #[case(ScalarValue::String("a\"b".to_string()), "\"a\\\"b\"")]
    #[case(ScalarValue::LocalizedText(LocalizedText::new("de", "Pumpe")), "LocalizedText::new(\"de\", \"Pumpe\")")]
    fn scalar_value_literal(#[case] value: ScalarValue, #[case] expected: &str) {
        assert_eq!(expr_text(scalar_value(&value)), expected);
    }

    #[rstest]
    #[case("HasSubtype", true)]
    #[case("_private", true)]
    #[case("Has Subtype", false)]
    #[case("1Type", false)]
    #[case("_", false)]
    #[case("", false)]
    fn is_symbol_cases(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(is_symbol(text), expected);
    }
}
