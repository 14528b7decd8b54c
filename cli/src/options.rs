//! Command line options that select the code generation configuration.

use std::{fs, path::Path, path::PathBuf};

use nodesetc_codegen::CompilerConfig;
use nodesetc_dsl::{
    core::FileId,
    diagnostic::{Diagnostic, Label},
};
use nodesetc_problems::Problem;

/// Words that cannot name a module.
const KEYWORDS: [&str; 39] = [
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "yield",
];

/// The module name when one cannot be derived from the file name.
const DEFAULT_MODULE_NAME: &str = "nodeset";

#[derive(clap::Args, Clone, Debug, Default)]
pub struct CompileOptions {
    /// JSON configuration file. The other options override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Name of the generated module. Derived from the file name when absent.
    #[arg(long)]
    pub module: Option<String>,

    /// Most nodes in one generated file, 0 for no limit.
    #[arg(long = "max-nodes")]
    pub max_entries_per_partition: Option<usize>,

    /// Namespace index that replaces every non-zero namespace, -1 to keep
    /// namespaces as declared.
    #[arg(long = "namespace", allow_hyphen_values = true)]
    pub namespace_override: Option<i32>,

    /// Add the copyright header to generated files.
    #[arg(long)]
    pub copyright: bool,

    /// Generator name in the banner of generated files.
    #[arg(long)]
    pub label: Option<String>,

    /// Emit trace logging into the generated code.
    #[arg(long)]
    pub trace: bool,

    /// Directory for the generated files.
    #[arg(long = "out")]
    pub destination_directory: Option<PathBuf>,

    /// Import from the opcua_server crate rather than the current crate.
    #[arg(long)]
    pub external_crate: bool,

    /// Also write mod.rs that declares and populates every generated module.
    #[arg(long)]
    pub index: bool,
}

impl CompileOptions {
    /// Returns the configuration file, if any, with the options applied.
    pub fn to_config(&self) -> Result<CompilerConfig, Diagnostic> {
        let mut config = match &self.config {
            Some(path) => {
                let file_id = FileId::from_path(path);
                let content = fs::read_to_string(path).map_err(|e| {
                    Diagnostic::problem(Problem::CannotReadFile, Label::file(file_id.clone(), e.to_string()))
                })?;
                CompilerConfig::from_json(&content, &file_id)?
            }
            None => CompilerConfig::default(),
        };

        if let Some(max) = self.max_entries_per_partition {
            config.max_entries_per_partition = max;
        }
        if let Some(namespace) = self.namespace_override {
            config.namespace_override = namespace;
        }
        if let Some(label) = &self.label {
            config.generator_label = label.clone();
        }
        if let Some(directory) = &self.destination_directory {
            config.destination_directory = directory.clone();
        }
        config.include_copyright_header |= self.copyright;
        config.trace_diagnostics |= self.trace;
        config.use_external_crate_qualifier |= self.external_crate;

        config.validate()?;
        Ok(config)
    }

    /// Returns the name of the module generated for the file.
    pub fn module_name(&self, path: &Path) -> Result<String, Diagnostic> {
        match &self.module {
            Some(name) if is_module_name(name) => Ok(name.clone()),
            Some(name) => Err(Diagnostic::problem(
                Problem::InvalidConfiguration,
                Label::file(FileId::from_string("--module"), "module name is not a Rust identifier"),
            )
            .with_context("module", name)),
            None => Ok(derive_module_name(path)),
        }
    }
}

/// Turns the file name into a module name, for example `Opc.Ua.NodeSet2.xml`
/// becomes `opc_ua_nodeset2`.
fn derive_module_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut name: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }

    if is_module_name(&name) {
        name
    } else {
        DEFAULT_MODULE_NAME.to_string()
    }
}

fn is_module_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_well = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    starts_well
        && name != "_"
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !KEYWORDS.contains(&name)
}
