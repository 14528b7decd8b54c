//! Configuration of code generation.
//!
//! The configuration is normally read from a JSON document with camelCase
//! keys. Every key is optional.

use std::path::PathBuf;

use nodesetc_dsl::{
    core::FileId,
    diagnostic::{Diagnostic, Label},
};
use nodesetc_problems::Problem;
use serde::Deserialize;

/// The value of `namespaceOverride` that disables relocation.
pub const NO_NAMESPACE_OVERRIDE: i32 = -1;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// The most node entries in one output file, 0 for no limit.
    pub max_entries_per_partition: usize,

    /// Replaces every non-zero namespace index in emitted identifiers,
    /// -1 to keep namespaces as declared.
    pub namespace_override: i32,

    pub include_copyright_header: bool,

    /// Names the generator in the banner of each file.
    pub generator_label: String,

    /// Emit `trace!` statements into the generated code.
    pub trace_diagnostics: bool,

    /// The directory that receives the generated files.
    pub destination_directory: PathBuf,

    /// Qualify imports with `opcua_server` rather than `crate`.
    pub use_external_crate_qualifier: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            max_entries_per_partition: 0,
            namespace_override: NO_NAMESPACE_OVERRIDE,
            include_copyright_header: false,
            generator_label: String::from("nodesetc"),
            trace_diagnostics: false,
            destination_directory: PathBuf::from("."),
            use_external_crate_qualifier: false,
        }
    }
}

impl CompilerConfig {
    /// Reads the configuration from JSON text. The file identifier names
    /// the document in diagnostics.
    pub fn from_json(content: &str, file_id: &FileId) -> Result<Self, Diagnostic> {
        let config: CompilerConfig = serde_json::from_str(content).map_err(|err| {
            Diagnostic::problem(
                Problem::InvalidConfiguration,
                Label::file(file_id.clone(), err.to_string()),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that values are in range.
    pub fn validate(&self) -> Result<(), Diagnostic> {
        if self.namespace_override != NO_NAMESPACE_OVERRIDE
            && u16::try_from(self.namespace_override).is_err()
        {
            return Err(Diagnostic::problem(
                Problem::InvalidConfiguration,
                Label::file(
                    FileId::from_string("configuration"),
                    "namespaceOverride must be -1 or in the range 0..=65535",
                ),
            )
            .with_context("namespaceOverride", &self.namespace_override.to_string()));
        }
        if self.generator_label.chars().any(char::is_control) {
            return Err(Diagnostic::problem(
                Problem::InvalidConfiguration,
                Label::file(
                    FileId::from_string("configuration"),
                    "generatorLabel must be a single line",
                ),
            )
            .with_context("generatorLabel", &format!("{:?}", self.generator_label)));
        }
        Ok(())
    }

    /// The namespace that replaces non-zero namespaces, if any.
    pub fn namespace_override(&self) -> Option<u16> {
        u16::try_from(self.namespace_override).ok()
    }

    /// The root of the paths in the generated `use` declarations.
    pub fn crate_qualifier(&self) -> &'static str {
        if self.use_external_crate_qualifier {
            "opcua_server"
        } else {
            "crate"
        }
    }
}
