use eframe::egui::Pos2;
use tracing::debug;

use crate::strategy::{Axis, Node, next_sequence};

use super::polar::{RingFrame, axis_angle, circular_distance, point_angle};
use super::radius::{RadiusParams, axis_frontier};

pub fn nearest_axis(angle: f32, axis_count: usize) -> Option<usize> {
    (0..axis_count).min_by(|&a, &b| {
        circular_distance(angle, axis_angle(a, axis_count))
            .total_cmp(&circular_distance(angle, axis_angle(b, axis_count)))
    })
}

pub fn uncommitted_threshold(frontier: f32, outer_radius: f32) -> f32 {
    if frontier > 0.0 {
        (frontier + outer_radius) * 0.5
    } else {
        outer_radius * 0.5
    }
}

/// Ring a drop at `drop_radius` snaps to. Without any snap target the node
/// keeps `current_ring`.
pub fn select_ring(
    drop_radius: f32,
    threshold: f32,
    frame: &RingFrame,
    outer_radius: f32,
    current_ring: &str,
) -> String {
    if drop_radius >= threshold
        && let Some(floating) = frame.floating_ring()
    {
        return floating.to_owned();
    }

    frame
        .snap_targets()
        .iter()
        .min_by(|(_, a), (_, b)| {
            (a * outer_radius - drop_radius)
                .abs()
                .total_cmp(&(b * outer_radius - drop_radius).abs())
        })
        .map_or_else(|| current_ring.to_owned(), |(id, _)| id.clone())
}

#[derive(Clone, Debug, PartialEq)]
pub struct DropTarget {
    pub axis_index: usize,
    pub axis_id: String,
    pub ring_id: String,
    pub drop_radius: f32,
    pub threshold: f32,
}

/// Where a node released at `position` belongs. `None` when there are no
/// axes or the node is unknown, which hosts treat as a plain click.
pub fn resolve_drop(
    axes: &[Axis],
    nodes: &[Node],
    node_id: &str,
    position: Pos2,
    center: Pos2,
    frame: &RingFrame,
    params: &RadiusParams,
) -> Option<DropTarget> {
    let node = nodes.iter().find(|node| node.id == node_id)?;
    let axis_index = nearest_axis(point_angle(center, position), axes.len())?;
    let axis_id = axes[axis_index].id.clone();

    let drop_radius = center.distance(position).min(params.max_radius());
    let siblings = nodes
        .iter()
        .filter(|other| other.axis_id == axis_id)
        .collect::<Vec<_>>();
    let threshold = uncommitted_threshold(
        axis_frontier(&siblings, frame, params),
        params.outer_radius,
    );
    let ring_id = select_ring(
        drop_radius,
        threshold,
        frame,
        params.outer_radius,
        &node.ring_id,
    );

    Some(DropTarget {
        axis_index,
        axis_id,
        ring_id,
        drop_radius,
        threshold,
    })
}

#[derive(Clone, Debug, PartialEq)]
pub enum DropCommit {
    Reassigned {
        node_id: String,
        axis_id: String,
        ring_id: String,
        sequence: i64,
    },
    Nudged { node_id: String, r_override: f32 },
}

impl DropCommit {
    pub fn node_id(&self) -> &str {
        match self {
            Self::Reassigned { node_id, .. } | Self::Nudged { node_id, .. } => node_id,
        }
    }
}

pub fn commit_drop(
    nodes: &[Node],
    node_id: &str,
    target: &DropTarget,
    outer_radius: f32,
) -> (Vec<Node>, Option<DropCommit>) {
    let mut updated = nodes.to_vec();
    let Some(index) = nodes.iter().position(|node| node.id == node_id) else {
        return (updated, None);
    };
    let moved = nodes[index].axis_id != target.axis_id || nodes[index].ring_id != target.ring_id;
    if !moved && outer_radius <= 0.0 {
        return (updated, None);
    }

    let sequence = next_sequence(nodes, &target.axis_id, node_id);
    let node = &mut updated[index];
    let commit = if moved {
        node.axis_id = target.axis_id.clone();
        node.ring_id = target.ring_id.clone();
        node.r_override = None;
        node.sequence = sequence;
        DropCommit::Reassigned {
            node_id: node_id.to_owned(),
            axis_id: target.axis_id.clone(),
            ring_id: target.ring_id.clone(),
            sequence,
        }
    } else {
        let r_override = target.drop_radius / outer_radius;
        node.r_override = Some(r_override);
        DropCommit::Nudged {
            node_id: node_id.to_owned(),
            r_override,
        }
    };

    debug!(?commit, "committed drop");
    (updated, Some(commit))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealRequest {
    pub axis_id: String,
    pub node_id: String,
}

pub fn reveal_on_click(nodes: &[Node], node_id: &str, still_selected: bool) -> Option<RevealRequest> {
    if !still_selected {
        return None;
    }
    nodes
        .iter()
        .find(|node| node.id == node_id)
        .map(|node| RevealRequest {
            axis_id: node.axis_id.clone(),
            node_id: node.id.clone(),
        })
}
