//! The entry point of code generation for one NodeSet document.

use log::{debug, info};
use nodesetc_dsl::{core::FileId, diagnostic::Diagnostic};
use nodesetc_sources::{xml::UANodeSet, Source};

use crate::{
    alias::AliasTable,
    classify::classify,
    config::CompilerConfig,
    emit::Emitter,
    partition::plan_partitions,
    render::render,
};

/// The name of the index module.
const INDEX_MODULE: &str = "mod";

/// The text of one generated file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedModule {
    /// The module name, which is also the file stem.
    pub name: String,
    pub contents: String,
}

impl GeneratedModule {
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.name)
    }
}

/// The result of compiling one document.
#[derive(Debug)]
pub struct Compilation {
    /// One module per partition, in partition order.
    pub modules: Vec<GeneratedModule>,
    /// A module that declares and populates every partition module.
    pub index: GeneratedModule,
    /// Non-fatal diagnostics.
    pub diagnostics: Vec<Diagnostic>,
}

/// Generates the modules for a parsed node set.
///
/// `module_name` is the name of the module for the whole node set; split
/// documents number their modules from it. Nothing is generated when any
/// fatal problem occurs.
pub fn compile(
    node_set: &UANodeSet,
    file_id: &FileId,
    module_name: &str,
    config: &CompilerConfig,
) -> Result<Compilation, Diagnostic> {
    config.validate()?;

    let aliases = AliasTable::from_aliases(&node_set.aliases);
    let entries = classify(node_set);
    let partitions = plan_partitions(&entries, config.max_entries_per_partition);
    debug!(
        "Compiling {} nodes and {} aliases of {} into {} partitions",
        entries.len(),
        aliases.len(),
        file_id,
        partitions.len()
    );

    let mut emitter = Emitter::new(config, &aliases, file_id);
    let mut modules = Vec::with_capacity(partitions.len());
    for partition in &partitions {
        let module = emitter.partition(partition)?;
        let name = partition.module_name(module_name);
        debug!("Rendering module {} with {} nodes", name, partition.entries.len());
        modules.push(GeneratedModule {
            name,
            contents: render(&module),
        });
    }

    let names: Vec<String> = modules.iter().map(|m| m.name.clone()).collect();
    let index = GeneratedModule {
        name: INDEX_MODULE.to_string(),
        contents: render(&emitter.index(&names)),
    };

    let diagnostics = emitter.into_diagnostics();
    info!(
        "Generated {} modules from {} with {} warnings",
        modules.len(),
        file_id,
        diagnostics.len()
    );

    Ok(Compilation {
        modules,
        index,
        diagnostics,
    })
}

/// Parses the source and generates the modules for it.
pub fn compile_source(
    source: &Source,
    module_name: &str,
    config: &CompilerConfig,
) -> Result<Compilation, Diagnostic> {
    let node_set = source.parse()?;
    compile(&node_set, source.file_id(), module_name, config)
}
