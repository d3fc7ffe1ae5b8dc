use std::fs;
use std::path::PathBuf;

use radial_strategy::config::RingPolicy;
use radial_strategy::engine::RingFrame;
use radial_strategy::strategy::{ReferenceIssue, load_document, sequence_warnings};

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("radial_strategy_{}_{}", std::process::id(), name));
    fs::write(&path, contents).expect("write temp document");
    path
}

#[test]
fn wrapped_document_with_dangling_refs_still_loads() {
    let path = write_temp(
        "wrapped.json",
        r#"{
            "strategy": {
                "title": "Q3",
                "axes": [{ "id": "ops", "label": "Ops" }],
                "rings": [
                    { "id": "now", "label": "Now" },
                    { "id": "later", "label": "Later" }
                ],
                "nodes": [
                    { "id": "a", "label": "Alpha", "axisId": "ops", "ringId": "later", "sequence": 1 },
                    { "id": "b", "label": "Beta", "axisId": "ops", "ringId": "now", "sequence": 2, "rOverride": 0.5 },
                    { "id": "c", "label": "Gamma", "axisId": "gone", "ringId": "now" },
                    { "id": "a", "label": "Duplicate", "axisId": "ops", "ringId": "now" }
                ]
            }
        }"#,
    );

    let doc = load_document(&path).expect("document loads");
    let _ = fs::remove_file(&path);

    assert_eq!(doc.title, "Q3");
    assert_eq!(doc.nodes.len(), 3);
    assert_eq!(doc.node("a").map(|node| node.label.as_str()), Some("Alpha"));
    assert_eq!(doc.node("b").and_then(|node| node.r_override), Some(0.5));
    assert_eq!(
        doc.reference_issues(),
        [ReferenceIssue::UnknownAxis {
            node_id: "c".to_owned(),
            axis_id: "gone".to_owned(),
        }]
    );

    let frame = RingFrame::new(&doc.rings, &RingPolicy::default());
    let warnings = sequence_warnings(&doc, &frame);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].earlier_node_id, "a");
}

#[test]
fn malformed_json_is_an_error_with_context() {
    let path = write_temp("broken.json", "{ \"axes\": [");
    let error = load_document(&path).expect_err("broken JSON fails");
    let _ = fs::remove_file(&path);
    assert!(format!("{error:#}").contains("failed to parse strategy document"));
}
