//! Resolves the aliases that a NodeSet declares.

use std::collections::BTreeMap;

use log::trace;
use nodesetc_sources::xml::Alias;

/// Maps alias names to the identifier literals they stand for.
#[derive(Debug, Default)]
pub struct AliasTable {
    aliases: BTreeMap<String, String>,
}

impl AliasTable {
    /// Builds the table. A later alias with the same name replaces an
    /// earlier one.
    pub fn from_aliases(aliases: &[Alias]) -> Self {
        let mut table = BTreeMap::new();
        for alias in aliases {
            if let Some(previous) = table.insert(alias.alias.clone(), alias.target.clone()) {
                trace!(
                    "Alias {} redefined from {} to {}",
                    alias.alias,
                    previous,
                    alias.target
                );
            }
        }
        Self { aliases: table }
    }

    /// Returns the literal for the name, or the name itself when it is not
    /// an alias.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
