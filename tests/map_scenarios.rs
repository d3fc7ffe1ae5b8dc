use eframe::egui::{Pos2, pos2};
use proptest::prelude::*;
use radial_strategy::config::{EngineConfig, GeometryConfig, RingPolicy};
use radial_strategy::engine::{
    DragDisc, PointerId, PointerSession, PressOutcome, RadiusParams, ReleaseOutcome, RingFrame,
    Viewport, commit_drop, resolve_axis_radii, resolve_drop,
};
use radial_strategy::layout::radial_layout;
use radial_strategy::strategy::{Axis, Node, Ring, StrategyDocument};

const CENTER: Pos2 = Pos2 { x: 500.0, y: 500.0 };

fn document(axis_count: usize, nodes: Vec<Node>) -> StrategyDocument {
    StrategyDocument {
        title: "scenario".to_owned(),
        axes: (0..axis_count)
            .map(|index| Axis {
                id: format!("axis-{index}"),
                label: format!("Axis {index}"),
                north_star_text: String::new(),
            })
            .collect(),
        rings: ["now", "next", "later", "uncommitted"]
            .into_iter()
            .map(|id| Ring {
                id: id.to_owned(),
                label: id.to_owned(),
            })
            .collect(),
        nodes,
    }
}

fn node(id: &str, axis: usize, ring_id: &str, sequence: i64) -> Node {
    Node {
        id: id.to_owned(),
        label: id.to_owned(),
        axis_id: format!("axis-{axis}"),
        ring_id: ring_id.to_owned(),
        sequence,
        wrap_width: None,
        r_override: None,
    }
}

#[test]
fn dragging_a_node_to_the_top_axis_parks_it_as_uncommitted() {
    let config = EngineConfig::default();
    let mut doc = document(6, vec![node("mover", 3, "now", 1), node("anchor", 0, "now", 1)]);
    let frame = RingFrame::new(&doc.rings, &config.rings);
    let params = RadiusParams::new(400.0, &config.geometry);
    let disc = DragDisc {
        center: CENTER,
        radius: params.max_radius(),
    };

    let mut session = PointerSession::new(
        config.interaction.drag_threshold_px,
        config.interaction.double_activation_secs(),
    );
    let press = session.pointer_down("mover", PointerId::MOUSE, pos2(500.0, 660.0), 0.0, None);
    assert_eq!(
        press,
        PressOutcome::Engaged {
            selection: Some("mover".to_owned())
        }
    );
    session.pointer_move(PointerId::MOUSE, pos2(500.0, 400.0), disc);
    let release = session.pointer_up(PointerId::MOUSE, pos2(500.0, 100.0), disc, Some("mover"));
    let ReleaseOutcome::Dropped { node_id, position } = release else {
        panic!("expected a drop");
    };

    let target = resolve_drop(&doc.axes, &doc.nodes, &node_id, position, CENTER, &frame, &params)
        .expect("axes exist");
    assert_eq!(target.axis_id, "axis-0");
    // anchor is the only committed node left on axis 0: (160 + 400) / 2
    assert_eq!(target.threshold, 280.0);
    assert_eq!(target.ring_id, "uncommitted");

    let (nodes, commit) = commit_drop(&doc.nodes, &node_id, &target, params.outer_radius);
    assert!(commit.is_some());
    doc.replace_nodes(nodes);

    let moved = doc.node("mover").expect("still present");
    assert_eq!(moved.axis_id, "axis-0");
    assert_eq!(moved.ring_id, "uncommitted");
    assert_eq!(moved.sequence, 2);
    assert_eq!(moved.r_override, None);
}

#[test]
fn drop_near_now_ring_snaps_to_now() {
    let config = EngineConfig::default();
    let doc = document(6, vec![node("mover", 0, "later", 1), node("a", 0, "next", 2)]);
    let frame = RingFrame::new(&doc.rings, &config.rings);
    let params = RadiusParams::new(400.0, &config.geometry);

    let target = resolve_drop(
        &doc.axes,
        &doc.nodes,
        "mover",
        pos2(500.0, 350.0),
        CENTER,
        &frame,
        &params,
    )
    .expect("axes exist");
    assert_eq!(target.drop_radius, 150.0);
    assert_eq!(target.ring_id, "now");
}

#[test]
fn rendering_twice_is_identical() {
    let doc = StrategyDocument::sample();
    let frame = RingFrame::new(&doc.rings, &RingPolicy::default());
    let viewport = Viewport {
        width: 1280.0,
        height: 860.0,
        padding: 72.0,
    };

    let first = radial_layout(&doc, &frame, viewport, &GeometryConfig::default());
    let second = radial_layout(&doc, &frame, viewport, &GeometryConfig::default());
    assert_eq!(first, second);

    let svg = |ranks: &[Vec<f32>]| {
        first
            .contour_paths(ranks, 1.0)
            .into_iter()
            .map(|(_, path)| path.to_svg())
            .collect::<Vec<_>>()
    };
    assert_eq!(svg(&first.contours.ranks), svg(&second.contours.ranks));
}

#[test]
fn sample_document_serializes_as_camel_case() {
    let doc = StrategyDocument::sample();
    let json = serde_json::to_string(&doc).expect("serialize");
    assert!(json.contains("\"axisId\""));
    assert!(json.contains("\"northStarText\""));
    assert!(!json.contains("rOverride"));
}

fn ring_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("now"),
        Just("next"),
        Just("later"),
        Just("uncommitted"),
        Just("someday"),
    ]
}

proptest! {
    #[test]
    fn every_resolved_radius_stays_inside_the_margin(
        rings in prop::collection::vec(ring_name(), 1..12),
        overrides in prop::collection::vec(prop::option::of(-2.0f32..900.0), 12),
        outer in 0.0f32..900.0,
    ) {
        let doc = document(1, Vec::new());
        let frame = RingFrame::new(&doc.rings, &RingPolicy::default());
        let params = RadiusParams::new(outer, &GeometryConfig::default());
        let nodes = rings
            .iter()
            .enumerate()
            .map(|(index, ring)| {
                let mut node = node(&format!("n{index}"), 0, ring, index as i64);
                node.r_override = overrides[index];
                node
            })
            .collect::<Vec<_>>();
        let refs = nodes.iter().collect::<Vec<_>>();

        for radius in resolve_axis_radii(&refs, &frame, &params) {
            prop_assert!(radius >= 0.0);
            prop_assert!(radius <= params.max_radius());
        }
    }

    #[test]
    fn uncommitted_sits_beyond_every_committed_node(
        committed in prop::collection::vec(prop_oneof![Just("now"), Just("next")], 1..5),
    ) {
        let doc = document(1, Vec::new());
        let frame = RingFrame::new(&doc.rings, &RingPolicy::default());
        let params = RadiusParams::new(400.0, &GeometryConfig::default());
        let mut nodes = committed
            .iter()
            .enumerate()
            .map(|(index, ring)| node(&format!("c{index}"), 0, ring, index as i64))
            .collect::<Vec<_>>();
        nodes.push(node("maybe", 0, "uncommitted", 99));
        let refs = nodes.iter().collect::<Vec<_>>();

        let radii = resolve_axis_radii(&refs, &frame, &params);
        let (maybe, rest) = radii.split_last().expect("non-empty");
        for radius in rest {
            prop_assert!(maybe > radius);
        }
    }
}
