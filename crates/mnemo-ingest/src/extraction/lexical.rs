//! Regex-based extraction of functions, classes, and imports.
//!
//! Purely lexical: no parsing, no scoping. Patterns are applied to the
//! whole text, so declarations inside comments and strings match too.
//! Imports are recognised only where the module string directly follows
//! `import` or `require`, so `import x from 'y'` is not picked up.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use mnemo_core::constants::{
    ENTITY_CLASS, ENTITY_FUNCTION, ENTITY_IMPORT, REL_CONTAINS, REL_IMPORTS,
};
use mnemo_core::graph::{NewEntity, NewRelationship};
use mnemo_core::memory::file_entity_id;
use mnemo_core::properties::props_from;
use mnemo_core::traits::{Extraction, StructureExtractor};
use mnemo_core::Properties;

static FUNCTION_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?:function|const|let|var)\s+([A-Za-z0-9_]+)\s*(?:=\s*)?(?:\([^)]*\)|\s*=>)").ok()
});
static CLASS_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"class\s+([A-Za-z0-9_]+)").ok());
static IMPORT_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"(?:import|require)\s*\(?['"]([^'"]+)['"]\)?"#).ok());

/// First capture group of every match, duplicates dropped, in text order.
fn captures(re: &LazyLock<Option<Regex>>, content: &str) -> Vec<String> {
    let Some(re) = re.as_ref() else {
        return Vec::new();
    };
    let mut seen = HashSet::new();
    re.captures_iter(content)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// The default [`StructureExtractor`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LexicalExtractor;

impl LexicalExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn functions(content: &str) -> Vec<String> {
        captures(&FUNCTION_RE, content)
    }

    pub fn classes(content: &str) -> Vec<String> {
        captures(&CLASS_RE, content)
    }

    pub fn imports(content: &str) -> Vec<String> {
        captures(&IMPORT_RE, content)
    }
}

impl StructureExtractor for LexicalExtractor {
    fn extract(&self, file_path: &str, content: &str) -> Extraction {
        let file_id = file_entity_id(file_path);
        let mut out = Extraction::default();

        let declared = Self::functions(content)
            .into_iter()
            .map(|name| (ENTITY_FUNCTION, "function", name))
            .chain(
                Self::classes(content)
                    .into_iter()
                    .map(|name| (ENTITY_CLASS, "class", name)),
            );
        for (entity_type, tag, name) in declared {
            let id = format!("{file_id}:{tag}:{name}");
            out.entities.push(NewEntity::new(
                id.clone(),
                entity_type,
                name,
                props_from([("file", file_path)]),
            ));
            out.relationships.push(NewRelationship::new(
                file_id.clone(),
                id,
                REL_CONTAINS,
                Properties::new(),
            ));
        }

        for module in Self::imports(content) {
            let id = format!("import:{module}");
            out.entities.push(NewEntity::new(
                id.clone(),
                ENTITY_IMPORT,
                module,
                props_from([("type", "dependency")]),
            ));
            out.relationships.push(NewRelationship::new(
                file_id.clone(),
                id,
                REL_IMPORTS,
                Properties::new(),
            ));
        }
        out
    }

    fn name(&self) -> &str {
        "lexical"
    }
}
