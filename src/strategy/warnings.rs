use crate::engine::RingFrame;

use super::StrategyDocument;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceWarning {
    pub axis_id: String,
    pub earlier_node_id: String,
    pub later_node_id: String,
}

impl SequenceWarning {
    pub fn describe(&self, doc: &StrategyDocument) -> String {
        let label = |id: &str| {
            doc.node(id)
                .map_or_else(|| id.to_owned(), |node| node.label.clone())
        };
        format!(
            "{} is sequenced before {} but sits on a later ring",
            label(&self.earlier_node_id),
            label(&self.later_node_id)
        )
    }
}

impl StrategyDocument {
    pub fn sequence_warnings(&self, frame: &RingFrame) -> Vec<SequenceWarning> {
        sequence_warnings(self, frame)
    }
}

/// Adjacent pairs in each axis's order where the ring rank decreases.
/// Floating and unknown rings are left out of the comparison.
pub fn sequence_warnings(doc: &StrategyDocument, frame: &RingFrame) -> Vec<SequenceWarning> {
    let mut warnings = Vec::new();

    for axis in &doc.axes {
        let ranked = doc
            .nodes_on_axis(&axis.id)
            .into_iter()
            .filter_map(|node| {
                if !doc.rings.iter().any(|ring| ring.id == node.ring_id) {
                    return None;
                }
                frame.rank(&node.ring_id).map(|rank| (node, rank))
            })
            .collect::<Vec<_>>();

        for pair in ranked.windows(2) {
            let [(earlier, earlier_rank), (later, later_rank)] = pair else {
                continue;
            };
            if later_rank < earlier_rank {
                warnings.push(SequenceWarning {
                    axis_id: axis.id.clone(),
                    earlier_node_id: earlier.id.clone(),
                    later_node_id: later.id.clone(),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RingPolicy;
    use crate::strategy::Node;

    fn node(id: &str, ring_id: &str, sequence: i64) -> Node {
        Node {
            id: id.to_owned(),
            label: id.to_uppercase(),
            axis_id: "data".to_owned(),
            ring_id: ring_id.to_owned(),
            sequence,
            wrap_width: None,
            r_override: None,
        }
    }

    fn check(nodes: Vec<Node>) -> Vec<SequenceWarning> {
        let doc = StrategyDocument {
            nodes,
            ..StrategyDocument::sample()
        };
        let frame = RingFrame::new(&doc.rings, &RingPolicy::default());
        sequence_warnings(&doc, &frame)
    }

    #[test]
    fn later_before_now_is_flagged() {
        let warnings = check(vec![node("a", "later", 1), node("b", "now", 2)]);
        assert_eq!(
            warnings,
            [SequenceWarning {
                axis_id: "data".to_owned(),
                earlier_node_id: "a".to_owned(),
                later_node_id: "b".to_owned(),
            }]
        );
    }

    #[test]
    fn ascending_horizons_are_quiet() {
        assert!(check(vec![node("a", "now", 1), node("b", "next", 2), node("c", "later", 3)]).is_empty());
    }

    #[test]
    fn floating_and_unknown_rings_are_skipped() {
        let warnings = check(vec![
            node("a", "next", 1),
            node("b", "uncommitted", 2),
            node("c", "someday", 3),
            node("d", "now", 4),
        ]);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].earlier_node_id, "a");
        assert_eq!(warnings[0].later_node_id, "d");
    }

    #[test]
    fn description_uses_labels() {
        let nodes = vec![node("a", "later", 1), node("b", "now", 2)];
        let doc = StrategyDocument {
            nodes,
            ..StrategyDocument::sample()
        };
        let frame = RingFrame::new(&doc.rings, &RingPolicy::default());
        let warnings = sequence_warnings(&doc, &frame);
        assert_eq!(
            warnings[0].describe(&doc),
            "A is sequenced before B but sits on a later ring"
        );
    }
}
