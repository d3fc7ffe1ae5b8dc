use std::collections::HashMap;

use crate::config::GeometryConfig;
use crate::strategy::{Axis, Node, sequence_order};

use super::polar::RingFrame;

/// Override values at or below this are read as a fraction of the outer
/// radius; larger values are legacy absolute pixels. The cut-off is a guess
/// carried over from older documents, not a guarantee: a legacy pixel value
/// of 1.5 or less (only possible on a tiny canvas) is misread as a fraction.
pub const LEGACY_OVERRIDE_FRACTION_LIMIT: f32 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusParams {
    pub outer_radius: f32,
    pub spread_px: f32,
    pub edge_margin_px: f32,
    pub single_band_inset_px: f32,
}

impl RadiusParams {
    pub fn new(outer_radius: f32, geometry: &GeometryConfig) -> Self {
        Self {
            outer_radius: outer_radius.max(0.0),
            spread_px: geometry.spread_px,
            edge_margin_px: geometry.edge_margin_px,
            single_band_inset_px: geometry.single_band_inset_px,
        }
    }

    pub fn max_radius(&self) -> f32 {
        (self.outer_radius - self.edge_margin_px).max(0.0)
    }
}

pub fn override_radius(value: f32, outer_radius: f32) -> f32 {
    if value <= LEGACY_OVERRIDE_FRACTION_LIMIT {
        value * outer_radius
    } else {
        value
    }
}

pub fn spread_offset(index: usize, count: usize, spread_px: f32) -> f32 {
    if count <= 1 {
        return 0.0;
    }
    ((index as f32 / (count - 1) as f32) * 2.0 - 1.0) * spread_px
}

struct AxisPlan<'a> {
    order: Vec<usize>,
    raw: Vec<f32>,
    group_len: Vec<usize>,
    nodes: &'a [&'a Node],
}

impl<'a> AxisPlan<'a> {
    fn new(nodes: &'a [&'a Node], frame: &RingFrame, params: &RadiusParams) -> Self {
        let mut order = (0..nodes.len()).collect::<Vec<_>>();
        order.sort_by(|&a, &b| sequence_order(nodes[a], nodes[b]));

        let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
        for &index in &order {
            groups
                .entry(nodes[index].ring_id.as_str())
                .or_default()
                .push(index);
        }

        let mut raw = vec![0.0; nodes.len()];
        let mut group_len = vec![1; nodes.len()];
        for (ring_id, members) in &groups {
            let base = frame
                .base_radius(ring_id, params.outer_radius)
                .unwrap_or(params.outer_radius);
            for (position, &index) in members.iter().enumerate() {
                raw[index] = base + spread_offset(position, members.len(), params.spread_px);
                group_len[index] = members.len();
            }
        }

        Self {
            order,
            raw,
            group_len,
            nodes,
        }
    }

    fn frontier(&self, frame: &RingFrame) -> f32 {
        self.order
            .iter()
            .filter(|&&index| frame.is_frontier(&self.nodes[index].ring_id))
            .map(|&index| self.raw[index])
            .fold(0.0, f32::max)
    }
}

pub fn resolve_axis_radii(nodes: &[&Node], frame: &RingFrame, params: &RadiusParams) -> Vec<f32> {
    let plan = AxisPlan::new(nodes, frame, params);
    let max_radius = params.max_radius();
    let outer = params.outer_radius;
    let has_floating = nodes.iter().any(|node| frame.is_floating(&node.ring_id));

    let mut radii = vec![0.0; nodes.len()];
    if has_floating {
        let frontier = plan.frontier(frame).clamp(0.0, outer);
        let band_members = plan
            .order
            .iter()
            .copied()
            .filter(|&index| {
                let ring_id = &nodes[index].ring_id;
                frame.is_band(ring_id) || frame.is_floating(ring_id)
            })
            .collect::<Vec<_>>();
        let slot = (outer - frontier) / (band_members.len() + 1) as f32;

        for (index, radius) in radii.iter_mut().enumerate() {
            *radius = plan.raw[index];
        }
        for (position, &index) in band_members.iter().enumerate() {
            radii[index] = frontier + (position + 1) as f32 * slot;
        }
    } else {
        for (index, radius) in radii.iter_mut().enumerate() {
            let mut value = plan.raw[index];
            if frame.is_band(&nodes[index].ring_id) && plan.group_len[index] == 1 {
                value -= params.single_band_inset_px;
            }
            *radius = value;
        }
    }

    for (radius, node) in radii.iter_mut().zip(nodes) {
        if let Some(value) = node.r_override.filter(|value| value.is_finite()) {
            *radius = override_radius(value, outer);
        }
        *radius = radius.clamp(0.0, max_radius);
    }

    radii
}

pub fn axis_frontier(nodes: &[&Node], frame: &RingFrame, params: &RadiusParams) -> f32 {
    AxisPlan::new(nodes, frame, params)
        .frontier(frame)
        .clamp(0.0, params.outer_radius)
}

pub fn resolve_document_radii(
    axes: &[Axis],
    nodes: &[Node],
    frame: &RingFrame,
    params: &RadiusParams,
) -> Vec<Option<f32>> {
    let mut by_axis: HashMap<&str, Vec<usize>> = HashMap::with_capacity(axes.len());
    for axis in axes {
        by_axis.entry(axis.id.as_str()).or_default();
    }
    for (index, node) in nodes.iter().enumerate() {
        if let Some(members) = by_axis.get_mut(node.axis_id.as_str()) {
            members.push(index);
        }
    }

    let mut resolved = vec![None; nodes.len()];
    for members in by_axis.values() {
        let axis_nodes = members.iter().map(|&index| &nodes[index]).collect::<Vec<_>>();
        let radii = resolve_axis_radii(&axis_nodes, frame, params);
        for (&index, radius) in members.iter().zip(radii) {
            resolved[index] = Some(radius);
        }
    }
    resolved
}
