use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub north_star_text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub id: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub label: String,
    pub axis_id: String,
    pub ring_id: String,
    #[serde(default)]
    pub sequence: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap_width: Option<f32>,
    /// Manual radial nudge. Values up to 1.5 are a fraction of the outer
    /// radius, anything larger is a legacy absolute pixel radius. See
    /// [`crate::engine::radius::override_radius`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_override: Option<f32>,
}

pub fn sequence_order(a: &Node, b: &Node) -> Ordering {
    a.sequence
        .cmp(&b.sequence)
        .then_with(|| a.label.cmp(&b.label))
        .then_with(|| a.id.cmp(&b.id))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReferenceIssue {
    UnknownAxis { node_id: String, axis_id: String },
    UnknownRing { node_id: String, ring_id: String },
}

impl ReferenceIssue {
    pub fn describe(&self) -> String {
        match self {
            Self::UnknownAxis { node_id, axis_id } => {
                format!("node {node_id} points at missing axis {axis_id}")
            }
            Self::UnknownRing { node_id, ring_id } => {
                format!("node {node_id} points at missing ring {ring_id}")
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub axes: Vec<Axis>,
    #[serde(default)]
    pub rings: Vec<Ring>,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl StrategyDocument {
    pub fn axis_index(&self, axis_id: &str) -> Option<usize> {
        self.axes.iter().position(|axis| axis.id == axis_id)
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == node_id)
    }

    pub fn nodes_on_axis(&self, axis_id: &str) -> Vec<&Node> {
        let mut nodes = self
            .nodes
            .iter()
            .filter(|node| node.axis_id == axis_id)
            .collect::<Vec<_>>();
        nodes.sort_by(|a, b| sequence_order(a, b));
        nodes
    }

    pub fn next_sequence(&self, axis_id: &str, excluding: &str) -> i64 {
        next_sequence(&self.nodes, axis_id, excluding)
    }

    pub fn renumber_axis(&mut self, axis_id: &str) {
        renumber_axis(&mut self.nodes, axis_id);
    }

    pub fn move_node(&mut self, node_id: &str, direction: MoveDirection) -> bool {
        let Some(axis_id) = self.node(node_id).map(|node| node.axis_id.clone()) else {
            return false;
        };

        let order = self
            .nodes_on_axis(&axis_id)
            .into_iter()
            .map(|node| node.id.clone())
            .collect::<Vec<_>>();
        let Some(position) = order.iter().position(|id| id == node_id) else {
            return false;
        };
        let swap_with = match direction {
            MoveDirection::Up if position > 0 => position - 1,
            MoveDirection::Down if position + 1 < order.len() => position + 1,
            _ => return false,
        };

        let mut reordered = order;
        reordered.swap(position, swap_with);
        for (rank, id) in reordered.iter().enumerate() {
            if let Some(node) = self.nodes.iter_mut().find(|node| &node.id == id) {
                node.sequence = rank as i64 + 1;
            }
        }
        true
    }

    pub fn rename_node(&mut self, node_id: &str, label: &str) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|node| node.id == node_id) else {
            return false;
        };
        if node.label == label {
            return false;
        }
        node.label = label.to_owned();
        true
    }

    pub fn replace_nodes(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
    }

    pub fn reference_issues(&self) -> Vec<ReferenceIssue> {
        let axis_ids = self
            .axes
            .iter()
            .map(|axis| axis.id.as_str())
            .collect::<HashSet<_>>();
        let ring_ids = self
            .rings
            .iter()
            .map(|ring| ring.id.as_str())
            .collect::<HashSet<_>>();

        let mut issues = Vec::new();
        for node in &self.nodes {
            if !axis_ids.contains(node.axis_id.as_str()) {
                issues.push(ReferenceIssue::UnknownAxis {
                    node_id: node.id.clone(),
                    axis_id: node.axis_id.clone(),
                });
            }
            if !ring_ids.contains(node.ring_id.as_str()) {
                issues.push(ReferenceIssue::UnknownRing {
                    node_id: node.id.clone(),
                    ring_id: node.ring_id.clone(),
                });
            }
        }
        issues
    }

    pub fn sample() -> Self {
        let axes = [
            ("platform", "Platform", "One runtime every team deploys on"),
            ("data", "Data", "Decisions backed by trusted, timely data"),
            ("people", "People", "Teams that own their outcomes"),
            ("customer", "Customer", "Every journey feels effortless"),
            ("security", "Security", "Secure by default, not by review"),
        ]
        .into_iter()
        .map(|(id, label, north_star_text)| Axis {
            id: id.to_owned(),
            label: label.to_owned(),
            north_star_text: north_star_text.to_owned(),
        })
        .collect();

        let rings = [
            ("now", "Now"),
            ("next", "Next"),
            ("later", "Later"),
            ("uncommitted", "Uncommitted"),
        ]
        .into_iter()
        .map(|(id, label)| Ring {
            id: id.to_owned(),
            label: label.to_owned(),
        })
        .collect();

        let nodes = [
            ("ci", "Unified CI pipeline", "platform", "now", 1),
            ("k8s", "Managed clusters", "platform", "next", 2),
            ("edge", "Edge runtime", "platform", "later", 3),
            ("catalog", "Data catalog", "data", "now", 1),
            ("lineage", "Lineage tracking", "data", "now", 2),
            ("realtime", "Realtime metrics", "data", "next", 3),
            ("ml", "Feature store", "data", "uncommitted", 4),
            ("guilds", "Engineering guilds", "people", "next", 1),
            ("onboarding", "Onboarding revamp", "people", "later", 2),
            ("checkout", "One-click checkout", "customer", "now", 1),
            ("support", "Self-service support", "customer", "next", 2),
            ("voice", "Voice assistant", "customer", "uncommitted", 3),
            ("sso", "SSO everywhere", "security", "now", 1),
            ("zero-trust", "Zero-trust network", "security", "later", 2),
        ]
        .into_iter()
        .map(|(id, label, axis_id, ring_id, sequence)| Node {
            id: id.to_owned(),
            label: label.to_owned(),
            axis_id: axis_id.to_owned(),
            ring_id: ring_id.to_owned(),
            sequence,
            wrap_width: None,
            r_override: None,
        })
        .collect();

        Self {
            title: "Sample strategy".to_owned(),
            axes,
            rings,
            nodes,
        }
    }
}

pub fn next_sequence(nodes: &[Node], axis_id: &str, excluding: &str) -> i64 {
    nodes
        .iter()
        .filter(|node| node.axis_id == axis_id && node.id != excluding)
        .map(|node| node.sequence)
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

pub fn renumber_axis(nodes: &mut [Node], axis_id: &str) {
    let mut indices = nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.axis_id == axis_id)
        .map(|(index, _)| index)
        .collect::<Vec<_>>();
    indices.sort_by(|&a, &b| sequence_order(&nodes[a], &nodes[b]));

    for (rank, index) in indices.into_iter().enumerate() {
        nodes[index].sequence = rank as i64 + 1;
    }
}
