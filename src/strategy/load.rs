use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::document::StrategyDocument;
use super::parse::parse_document;

pub fn load_document(path: &Path) -> Result<StrategyDocument> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read strategy document {}", path.display()))?;
    let document = parse_document(&raw)
        .with_context(|| format!("failed to parse strategy document {}", path.display()))?;

    Ok(normalize_document(document))
}

/// Drops records without an id and keeps the first of any duplicated id.
/// Dangling axis/ring references are kept; the layout resolves them.
pub(super) fn normalize_document(mut document: StrategyDocument) -> StrategyDocument {
    let mut seen_axes = HashSet::new();
    document
        .axes
        .retain(|axis| !axis.id.trim().is_empty() && seen_axes.insert(axis.id.clone()));

    let mut seen_rings = HashSet::new();
    document
        .rings
        .retain(|ring| !ring.id.trim().is_empty() && seen_rings.insert(ring.id.clone()));

    let node_count = document.nodes.len();
    let mut seen_nodes = HashSet::new();
    document
        .nodes
        .retain(|node| !node.id.trim().is_empty() && seen_nodes.insert(node.id.clone()));
    if document.nodes.len() != node_count {
        warn!(
            dropped = node_count - document.nodes.len(),
            "dropped nodes with empty or duplicate ids"
        );
    }

    for issue in document.reference_issues() {
        warn!("{}", issue.describe());
    }

    debug!(
        axes = document.axes.len(),
        rings = document.rings.len(),
        nodes = document.nodes.len(),
        "strategy document loaded"
    );
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::document::Node;

    #[test]
    fn duplicate_and_blank_ids_are_dropped() {
        let mut document = StrategyDocument::sample();
        let mut duplicate = document.nodes[0].clone();
        duplicate.label = "Shadow".to_owned();
        document.nodes.push(duplicate);
        document.nodes.push(Node {
            id: "  ".to_owned(),
            ..document.nodes[1].clone()
        });

        let normalized = normalize_document(document);
        assert_eq!(normalized, StrategyDocument::sample());
    }

    #[test]
    fn missing_file_reports_path() {
        let error = load_document(Path::new("/definitely/not/here.json"))
            .expect_err("missing file is an error");
        assert!(format!("{error:#}").contains("/definitely/not/here.json"));
    }
}
