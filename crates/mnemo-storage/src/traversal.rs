//! Bounded depth-first traversal over relationships.
//!
//! Edges are treated as undirected. A node is expanded at most once; an
//! edge is reported at most once, in first-discovered order. The walk
//! uses an explicit frame stack, so graph depth never touches the call stack.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use tracing::warn;

use mnemo_core::constants::MAX_TRAVERSAL_DEPTH;
use mnemo_core::errors::MnemoResult;
use mnemo_core::graph::Relationship;

/// Traversal configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalOptions {
    /// Only follow edges of this type. `None` follows every type.
    pub relationship_type: Option<String>,
    /// Maximum number of hops from the start node. 0 returns nothing.
    pub max_depth: usize,
    /// Stop after this many nodes have been expanded.
    pub max_nodes: usize,
    /// Wall-clock budget for the whole walk.
    pub timeout: Duration,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            relationship_type: None,
            max_depth: 2,
            max_nodes: 10_000,
            timeout: Duration::from_secs(2),
        }
    }
}

impl TraversalOptions {
    pub fn of_type(relationship_type: impl Into<String>, max_depth: usize) -> Self {
        Self {
            relationship_type: Some(relationship_type.into()),
            max_depth,
            ..Self::default()
        }
    }
}

/// Result of a traversal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraversalOutcome {
    pub edges: Vec<Relationship>,
    /// Nodes expanded, the start node included.
    pub nodes_visited: usize,
    /// True when a node or time budget cut the walk short.
    pub truncated: bool,
}

struct Frame {
    node: String,
    depth: usize,
    edges: Vec<Relationship>,
    next: usize,
}

/// Walk from `start`, fetching each expanded node's edges with `edges_of`.
pub fn traverse_with<F>(
    start: &str,
    options: &TraversalOptions,
    mut edges_of: F,
) -> MnemoResult<TraversalOutcome>
where
    F: FnMut(&str, Option<&str>) -> MnemoResult<Vec<Relationship>>,
{
    let max_depth = options.max_depth.min(MAX_TRAVERSAL_DEPTH);
    let mut outcome = TraversalOutcome::default();
    if max_depth == 0 {
        return Ok(outcome);
    }

    let rel_type = options.relationship_type.as_deref();
    let deadline = Instant::now() + options.timeout;
    let mut visited: HashSet<String> = HashSet::new();
    let mut seen_edges: HashSet<(String, String, String)> = HashSet::new();

    visited.insert(start.to_string());
    let mut stack = vec![Frame {
        node: start.to_string(),
        depth: 0,
        edges: edges_of(start, rel_type)?,
        next: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(edge) = frame.edges.get(frame.next).cloned() else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let depth = frame.depth;
        let neighbor = edge.other_end(&frame.node).to_string();

        let (from, to, rel) = edge.key();
        if seen_edges.insert((from.to_string(), to.to_string(), rel.to_string())) {
            outcome.edges.push(edge);
        }

        if depth + 1 >= max_depth || visited.contains(&neighbor) {
            continue;
        }
        if visited.len() >= options.max_nodes || Instant::now() >= deadline {
            outcome.truncated = true;
            warn!(
                event = "traversal_truncated",
                start,
                nodes = visited.len(),
                edges = outcome.edges.len(),
                "traversal budget exhausted"
            );
            break;
        }

        visited.insert(neighbor.clone());
        let edges = edges_of(&neighbor, rel_type)?;
        stack.push(Frame {
            node: neighbor,
            depth: depth + 1,
            edges,
            next: 0,
        });
    }

    outcome.nodes_visited = visited.len();
    Ok(outcome)
}
