use eframe::egui::{Pos2, Vec2, vec2};

use crate::config::GeometryConfig;
use crate::engine::{
    ContourPath, ContourRadii, RadiusParams, RingFrame, Viewport, axis_angle, contour_points,
    contour_radii, polar_to_point, resolve_document_radii, smooth_closed_path,
};
use crate::strategy::StrategyDocument;

pub const NODE_DOT_RADIUS: f32 = 7.0;
const LABEL_GAP: f32 = 6.0;
const AXIS_LABEL_GAP: f32 = 22.0;

#[derive(Clone, Debug, PartialEq)]
pub struct AxisPlacement {
    pub id: String,
    pub index: usize,
    pub angle: f32,
    pub tip: Pos2,
    pub label_anchor: Pos2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RingGuide {
    pub id: String,
    pub label: String,
    pub radius: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodePlacement {
    pub id: String,
    pub axis_index: usize,
    pub radius: f32,
    pub position: Pos2,
    pub label_anchor: Pos2,
    pub outward: Vec2,
    pub wrap_width: Option<f32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapLayout {
    pub center: Pos2,
    pub outer_radius: f32,
    pub axes: Vec<AxisPlacement>,
    pub rings: Vec<RingGuide>,
    pub nodes: Vec<NodePlacement>,
    pub contours: ContourRadii,
}

pub fn radial_layout(
    doc: &StrategyDocument,
    frame: &RingFrame,
    viewport: Viewport,
    geometry: &GeometryConfig,
) -> MapLayout {
    let center = viewport.center();
    let outer_radius = viewport.outer_radius();
    let params = RadiusParams::new(outer_radius, geometry);
    let axis_count = doc.axes.len();

    let axes = doc
        .axes
        .iter()
        .enumerate()
        .map(|(index, axis)| {
            let angle = axis_angle(index, axis_count);
            AxisPlacement {
                id: axis.id.clone(),
                index,
                angle,
                tip: polar_to_point(center, angle, outer_radius),
                label_anchor: polar_to_point(center, angle, outer_radius + AXIS_LABEL_GAP),
            }
        })
        .collect::<Vec<_>>();

    let rings = doc
        .rings
        .iter()
        .filter_map(|ring| {
            let (_, fraction) = frame
                .snap_targets()
                .iter()
                .find(|(id, _)| *id == ring.id)?;
            Some(RingGuide {
                id: ring.id.clone(),
                label: ring.label.clone(),
                radius: fraction * outer_radius,
            })
        })
        .collect();

    let resolved = resolve_document_radii(&doc.axes, &doc.nodes, frame, &params);
    let nodes = doc
        .nodes
        .iter()
        .zip(&resolved)
        .filter_map(|(node, radius)| {
            let radius = (*radius)?;
            let axis_index = doc.axis_index(&node.axis_id)?;
            let angle = axes[axis_index].angle;
            let outward = vec2(angle.cos(), angle.sin());
            Some(NodePlacement {
                id: node.id.clone(),
                axis_index,
                radius,
                position: polar_to_point(center, angle, radius),
                label_anchor: polar_to_point(center, angle, radius + NODE_DOT_RADIUS + LABEL_GAP),
                outward,
                wrap_width: node.wrap_width,
            })
        })
        .collect();

    let contours = contour_radii(&doc.axes, &doc.nodes, &resolved, frame);

    MapLayout {
        center,
        outer_radius,
        axes,
        rings,
        nodes,
        contours,
    }
}

impl MapLayout {
    pub fn node(&self, node_id: &str) -> Option<&NodePlacement> {
        self.nodes.iter().find(|node| node.id == node_id)
    }

    pub fn hit_test(&self, point: Pos2, slop: f32) -> Option<&NodePlacement> {
        let reach = NODE_DOT_RADIUS + slop.max(0.0);
        self.nodes
            .iter()
            .map(|node| (node, node.position.distance(point)))
            .filter(|(_, distance)| *distance <= reach)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(node, _)| node)
    }

    /// Closed contour for each rank, outermost first so inner ones paint on
    /// top. `radii` is usually the animator's current sample.
    pub fn contour_paths(&self, radii: &[Vec<f32>], tension: f32) -> Vec<(usize, ContourPath)> {
        radii
            .iter()
            .enumerate()
            .rev()
            .map(|(rank, per_axis)| {
                let points = contour_points(per_axis, self.center);
                (rank, smooth_closed_path(&points, tension))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::config::RingPolicy;

    fn viewport() -> Viewport {
        Viewport {
            width: 1000.0,
            height: 1000.0,
            padding: 100.0,
        }
    }

    fn layout(doc: &StrategyDocument) -> MapLayout {
        let frame = RingFrame::new(&doc.rings, &RingPolicy::default());
        radial_layout(doc, &frame, viewport(), &GeometryConfig::default())
    }

    #[test]
    fn sample_places_every_node_inside_the_disc() {
        let doc = StrategyDocument::sample();
        let layout = layout(&doc);

        assert_eq!(layout.outer_radius, 400.0);
        assert_eq!(layout.nodes.len(), doc.nodes.len());
        for node in &layout.nodes {
            assert!(node.radius <= 390.0, "{} at {}", node.id, node.radius);
            assert!(approx_eq!(
                f32,
                node.position.distance(layout.center),
                node.radius,
                epsilon = 1e-3
            ));
        }
        assert_eq!(
            layout.rings.iter().map(|ring| ring.id.as_str()).collect::<Vec<_>>(),
            ["now", "next", "later"]
        );
    }

    #[test]
    fn rings_without_a_fraction_get_no_guide() {
        let mut doc = StrategyDocument::sample();
        doc.rings.push(crate::strategy::Ring {
            id: "someday".to_owned(),
            label: "Someday".to_owned(),
        });
        let layout = layout(&doc);
        assert_eq!(
            layout
                .rings
                .iter()
                .map(|ring| (ring.id.as_str(), ring.radius))
                .collect::<Vec<_>>(),
            [("now", 160.0), ("next", 280.0), ("later", 400.0)]
        );
    }

    #[test]
    fn nodes_on_missing_axes_are_not_placed() {
        let mut doc = StrategyDocument::sample();
        doc.nodes[0].axis_id = "gone".to_owned();
        let layout = layout(&doc);
        assert_eq!(layout.nodes.len(), doc.nodes.len() - 1);
        assert!(layout.node(&doc.nodes[0].id).is_none());
    }

    #[test]
    fn hit_test_picks_closest_dot_within_slop() {
        let doc = StrategyDocument::sample();
        let layout = layout(&doc);
        let target = &layout.nodes[3];

        let near = target.position + vec2(NODE_DOT_RADIUS + 4.0, 0.0);
        assert_eq!(layout.hit_test(near, 6.0).map(|node| node.id.as_str()), Some(target.id.as_str()));
        assert!(layout.hit_test(layout.center + vec2(0.0, 1.0), 0.0).is_none());
    }

    #[test]
    fn contours_come_outermost_first() {
        let layout = layout(&StrategyDocument::sample());
        let paths = layout.contour_paths(&layout.contours.ranks, 1.0);
        let ranks = paths.iter().map(|(rank, _)| *rank).collect::<Vec<_>>();
        assert_eq!(ranks, [2, 1, 0]);
        assert!(paths.iter().all(|(_, path)| path.to_svg().starts_with("M ")));
    }

    #[test]
    fn layout_is_deterministic() {
        let doc = StrategyDocument::sample();
        let first = layout(&doc);
        let second = layout(&doc);
        assert_eq!(first, second);

        let svg = |layout: &MapLayout| {
            layout
                .contour_paths(&layout.contours.ranks, 1.0)
                .into_iter()
                .map(|(_, path)| path.to_svg())
                .collect::<Vec<_>>()
        };
        assert_eq!(svg(&first), svg(&second));
    }
}
