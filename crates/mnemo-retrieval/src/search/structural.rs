//! Structural leg: traversal from a known entity, or name search.

use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tracing::debug;

use mnemo_core::config::RetrievalConfig;
use mnemo_core::errors::MnemoResult;
use mnemo_core::graph::Entity;
use mnemo_storage::{GraphStore, TraversalOptions};

use crate::options::QueryOptions;
use crate::results::{EntityMatch, StructuralResults};

static QUOTED_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"['"]([^'"]+)['"]"#).ok());
static DOTTED_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"([A-Za-z0-9_]+\.[A-Za-z0-9_]+)").ok());
static CALL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"([A-Za-z0-9_]+)\(").ok());
static CLASS_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"class\s+([A-Za-z0-9_]+)").ok());

/// Candidate identifiers in a free-text query: quoted strings, dotted
/// names, call-like names, and `class X`. Unique, in discovery order.
pub fn extract_identifiers(query: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for re in [&QUOTED_RE, &DOTTED_RE, &CALL_RE, &CLASS_RE] {
        let Some(re) = LazyLock::force(re).as_ref() else {
            continue;
        };
        for name in re.captures_iter(query).filter_map(|c| c.get(1)) {
            if seen.insert(name.as_str()) {
                out.push(name.as_str().to_string());
            }
        }
    }
    out
}

/// Bare tokens shaped like code identifiers: camelCase or snake_case, at
/// least four characters. Plain words never qualify.
fn identifier_tokens(query: &str) -> Vec<String> {
    query
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|t| t.len() >= 4 && looks_like_identifier(t))
        .map(str::to_string)
        .collect()
}

fn looks_like_identifier(token: &str) -> bool {
    let snake = token.contains('_') && token.chars().any(|c| c.is_ascii_alphabetic());
    let camel = token
        .as_bytes()
        .windows(2)
        .any(|w| w[0].is_ascii_lowercase() && w[1].is_ascii_uppercase());
    snake || camel
}

pub fn traversal_options(options: &QueryOptions, config: &RetrievalConfig) -> TraversalOptions {
    TraversalOptions {
        relationship_type: options.relationship_type.clone(),
        max_depth: options.depth.unwrap_or(config.default_depth),
        max_nodes: config.max_traversal_nodes,
        timeout: Duration::from_millis(config.traversal_timeout_ms),
    }
}

/// Traverse from `options.entity_id` when given, otherwise search entity
/// names and attach each hit's relationships.
pub async fn search(
    graph: &GraphStore,
    query: &str,
    options: &QueryOptions,
    config: &RetrievalConfig,
) -> MnemoResult<StructuralResults> {
    if let Some(start) = &options.entity_id {
        let edges = graph
            .traverse(start, &traversal_options(options, config))
            .await?;
        return Ok(StructuralResults::Traversal(edges));
    }
    search_by_name(graph, query, options.entity_type.as_deref(), config.structural_top_k).await
}

/// Name search without traversal, as the hybrid leg runs it.
pub async fn search_by_name(
    graph: &GraphStore,
    query: &str,
    entity_type: Option<&str>,
    top_k: usize,
) -> MnemoResult<StructuralResults> {
    let entities = find_candidates(graph, query, entity_type, top_k).await?;
    let mut matches = Vec::with_capacity(entities.len());
    for entity in entities {
        let relationships = graph.find_relationships(&entity.entity_id).await?;
        matches.push(EntityMatch {
            entity,
            relationships,
        });
    }
    Ok(StructuralResults::Entities(matches))
}

/// Whole-query name search first; if that finds nothing, each extracted
/// identifier in turn, then each identifier-shaped bare token.
async fn find_candidates(
    graph: &GraphStore,
    query: &str,
    entity_type: Option<&str>,
    top_k: usize,
) -> MnemoResult<Vec<Entity>> {
    let direct = graph.search_entities(query.trim(), entity_type).await?;
    if !direct.is_empty() {
        return Ok(direct.into_iter().take(top_k).collect());
    }

    let mut identifiers = extract_identifiers(query);
    if identifiers.is_empty() {
        identifiers = identifier_tokens(query);
    }
    debug!(candidates = identifiers.len(), "falling back to identifier search");

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for needle in identifiers {
        for entity in graph.search_entities(&needle, entity_type).await? {
            if out.len() >= top_k {
                return Ok(out);
            }
            if seen.insert(entity.entity_id.clone()) {
                out.push(entity);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_in_discovery_order() {
        let ids = extract_identifiers(r#"where is "auth flow" used by login.js via validate( and class Session"#);
        assert_eq!(ids, vec!["auth flow", "login.js", "validate", "Session"]);
    }

    #[test]
    fn identifiers_deduplicate() {
        assert_eq!(extract_identifiers("run() then run()"), vec!["run"]);
        assert!(extract_identifiers("谁调用了").is_empty());
    }

    #[test]
    fn identifier_tokens_skip_non_ascii_and_plain_words() {
        assert_eq!(identifier_tokens("谁调用了 processData x"), vec!["processData"]);
        assert_eq!(identifier_tokens("who uses load_config today"), vec!["load_config"]);
        assert!(identifier_tokens("find everything related to payments").is_empty());
        assert!(identifier_tokens("aB __ 2024").is_empty());
    }

    #[test]
    fn traversal_options_fall_back_to_config() {
        let config = RetrievalConfig::default();
        let opts = traversal_options(&QueryOptions::default(), &config);
        assert_eq!(opts.max_depth, config.default_depth);
        assert!(opts.relationship_type.is_none());
        let opts = traversal_options(
            &QueryOptions::default().with_depth(4).with_relationship_type("CALLS"),
            &config,
        );
        assert_eq!(opts.max_depth, 4);
        assert_eq!(opts.relationship_type.as_deref(), Some("CALLS"));
    }
}
