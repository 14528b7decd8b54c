//! Decodes method arguments from the value of a variable.
//!
//! The `InputArguments` and `OutputArguments` properties of a method hold a
//! list of extension objects whose body is an `Argument` structure.

use log::{debug, warn};
use nodesetc_dsl::{
    core::Located,
    diagnostic::{Diagnostic, Label},
    node::{ArgumentDescriptor, ArgumentDimensions},
};
use nodesetc_problems::Problem;
use nodesetc_sources::xml::{ArgumentElement, ExtensionObjectBody, Value};

/// Encoding identifier of every emitted argument: the default binary
/// encoding of `Argument`. The type identifier declared in the document
/// (normally `i=297`, the data type itself) is not used.
pub const ARGUMENT_ENCODING_DEFAULT_BINARY: &str = "i=298";

/// Data type of an argument that does not declare one.
const DEFAULT_ARGUMENT_DATA_TYPE: &str = "i=1";

/// Returns the arguments in the value in document order. Values that are
/// not a list of extension objects have no arguments.
///
/// Non-fatal problems are added to `diagnostics`.
pub fn decode_arguments(value: &Value, diagnostics: &mut Vec<Diagnostic>) -> Vec<ArgumentDescriptor> {
    let Value::ListOfExtensionObject(objects) = value else {
        return vec![];
    };

    objects
        .iter()
        .filter_map(|object| match &object.body {
            ExtensionObjectBody::Argument(argument) => Some(decode_argument(argument, diagnostics)),
            ExtensionObjectBody::Other(name) => {
                debug!("Skipping extension object with body {}", name);
                None
            }
            ExtensionObjectBody::Empty => {
                debug!("Skipping extension object without body");
                None
            }
        })
        .collect()
}

fn decode_argument(argument: &ArgumentElement, diagnostics: &mut Vec<Diagnostic>) -> ArgumentDescriptor {
    let value_rank = argument.value_rank.unwrap_or(-1);

    let array_dimensions = match value_rank {
        1 => ArgumentDimensions::VariableLength,
        rank if rank > 1 => {
            warn!(
                "Argument {} has value rank {} and its array dimensions are not generated",
                argument.name, rank
            );
            diagnostics.push(
                Diagnostic::problem(
                    Problem::UnsupportedArrayRank,
                    Label::span(&argument.span(), format!("Argument {}", argument.name)),
                )
                .with_context("valueRank", &rank.to_string()),
            );
            ArgumentDimensions::Unspecified
        }
        _ => ArgumentDimensions::Unspecified,
    };

    let data_type = match &argument.data_type {
        Some(data_type) => data_type.clone(),
        None => {
            warn!("Argument {} does not declare a data type", argument.name);
            diagnostics.push(Diagnostic::problem(
                Problem::MissingDataType,
                Label::span(&argument.span(), format!("Argument {}", argument.name)),
            ));
            DEFAULT_ARGUMENT_DATA_TYPE.to_string()
        }
    };

    ArgumentDescriptor {
        name: argument.name.clone(),
        data_type,
        value_rank,
        array_dimensions,
        description: argument.description.clone(),
    }
}
