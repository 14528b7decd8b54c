//! Shared test helpers for codegen integration tests.

use nodesetc_codegen::{compile_source, Compilation, CompilerConfig};
use nodesetc_sources::Source;
use nodesetc_test::shared_resource_path;

/// Reads a shared NodeSet resource and compiles it with the configuration.
#[allow(dead_code)]
pub fn compile_resource(name: &'static str, config: &CompilerConfig) -> Compilation {
    let source = Source::try_from_path(&shared_resource_path(name)).unwrap();
    compile_source(&source, "nodeset", config).unwrap()
}

/// Compiles NodeSet text with the default configuration and returns the
/// text of the single generated module.
#[allow(dead_code)]
pub fn compile_text(xml: &str) -> String {
    let source = Source::new(xml.to_string(), &Default::default());
    let compilation = compile_source(&source, "nodeset", &CompilerConfig::default()).unwrap();
    assert_eq!(compilation.modules.len(), 1);
    compilation.modules[0].contents.clone()
}
