use eframe::egui::{self, Align, Color32, RichText, Ui};
use radial_strategy::strategy::MoveDirection;
use radial_strategy::util::short_label;

use super::super::ViewModel;

const ROW_LABEL_CHARS: usize = 34;

struct NodeRow {
    id: String,
    label: String,
    ring_label: String,
    sequence: i64,
    is_selected: bool,
    is_match: bool,
}

enum PanelAction {
    Select(String),
    Move(String, MoveDirection),
    ToggleAxis(String),
}

impl ViewModel {
    fn ring_label(&self, ring_id: &str) -> String {
        self.document
            .rings
            .iter()
            .find(|ring| ring.id == ring_id)
            .map_or_else(|| format!("{ring_id} (unknown)"), |ring| ring.label.clone())
    }

    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Initiatives");
        ui.add_space(6.0);

        let search = ui.add(
            egui::TextEdit::singleline(&mut self.search)
                .hint_text("Search initiatives")
                .desired_width(f32::INFINITY),
        );
        if search.changed() {
            self.refresh_search();
        }
        if !self.search.trim().is_empty() {
            ui.small(format!("{} matches", self.search_matches.len()));
        }

        ui.separator();
        self.draw_selection(ui);

        let warnings = self.document.sequence_warnings(&self.frame);
        if !warnings.is_empty() {
            ui.separator();
            ui.label(RichText::new("Sequence warnings").strong());
            for warning in &warnings {
                ui.label(
                    RichText::new(warning.describe(&self.document))
                        .color(Color32::from_rgb(241, 146, 94)),
                );
            }
        }

        let issues = self.document.reference_issues();
        if !issues.is_empty() {
            ui.separator();
            ui.label(RichText::new("Dangling references").strong());
            for issue in &issues {
                ui.small(issue.describe());
            }
        }

        ui.separator();
        let mut actions = Vec::new();
        let reveal_node = self.reveal.as_ref().map(|reveal| reveal.node_id.clone());
        let mut revealed = false;

        egui::ScrollArea::vertical()
            .id_salt("axis_groups_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for axis in &self.document.axes {
                    let rows = self
                        .document
                        .nodes_on_axis(&axis.id)
                        .into_iter()
                        .map(|node| NodeRow {
                            id: node.id.clone(),
                            label: node.label.clone(),
                            ring_label: self.ring_label(&node.ring_id),
                            sequence: node.sequence,
                            is_selected: self.selected.as_deref() == Some(node.id.as_str()),
                            is_match: self.search_matches.contains(&node.id),
                        })
                        .collect::<Vec<_>>();

                    let open = self.expanded_axes.contains(&axis.id);
                    let header = egui::CollapsingHeader::new(format!(
                        "{}  ({})",
                        axis.label,
                        rows.len()
                    ))
                    .id_salt(("axis_group", axis.id.as_str()))
                    .open(Some(open))
                    .show(ui, |ui| {
                        if !axis.north_star_text.is_empty() {
                            ui.small(axis.north_star_text.as_str());
                        }
                        let last = rows.len().saturating_sub(1);
                        for (position, row) in rows.iter().enumerate() {
                            ui.horizontal(|ui| {
                                let mut text = RichText::new(format!(
                                    "{}. {}",
                                    row.sequence,
                                    short_label(&row.label, ROW_LABEL_CHARS)
                                ));
                                if row.is_match {
                                    text = text.color(Color32::from_rgb(103, 196, 255));
                                }
                                let response = ui
                                    .selectable_label(row.is_selected, text)
                                    .on_hover_text(format!("{} | {}", row.label, row.ring_label));
                                if response.clicked() {
                                    actions.push(PanelAction::Select(row.id.clone()));
                                }
                                if reveal_node.as_deref() == Some(row.id.as_str()) {
                                    response.scroll_to_me(Some(Align::Center));
                                    revealed = true;
                                }

                                ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                                    let down = egui::Button::new("▼").small();
                                    if ui.add_enabled(position < last, down).clicked() {
                                        actions.push(PanelAction::Move(
                                            row.id.clone(),
                                            MoveDirection::Down,
                                        ));
                                    }
                                    let up = egui::Button::new("▲").small();
                                    if ui.add_enabled(position > 0, up).clicked() {
                                        actions.push(PanelAction::Move(
                                            row.id.clone(),
                                            MoveDirection::Up,
                                        ));
                                    }
                                    ui.small(row.ring_label.as_str());
                                });
                            });
                        }
                    });

                    if header.header_response.clicked() {
                        actions.push(PanelAction::ToggleAxis(axis.id.clone()));
                    }
                }
            });

        if revealed {
            self.reveal = None;
        }

        for action in actions {
            match action {
                PanelAction::Select(node_id) => self.set_selected(Some(node_id)),
                PanelAction::Move(node_id, direction) => {
                    self.document.move_node(&node_id, direction);
                }
                PanelAction::ToggleAxis(axis_id) => {
                    if !self.expanded_axes.remove(&axis_id) {
                        self.expanded_axes.insert(axis_id);
                    }
                }
            }
        }
    }

    fn draw_selection(&self, ui: &mut Ui) {
        let Some(selected_id) = self.selected.as_deref() else {
            ui.label("Select an initiative on the map or in the list.");
            return;
        };
        let Some(node) = self.document.node(selected_id) else {
            ui.label("Selected initiative no longer exists.");
            return;
        };

        let axis_label = self
            .document
            .axes
            .iter()
            .find(|axis| axis.id == node.axis_id)
            .map_or_else(|| format!("{} (unknown)", node.axis_id), |axis| axis.label.clone());

        ui.label(RichText::new(node.label.as_str()).strong());
        ui.small(node.id.as_str());
        ui.add_space(4.0);
        ui.label(format!("Axis: {axis_label}"));
        ui.label(format!("Ring: {}", self.ring_label(&node.ring_id)));
        ui.label(format!("Sequence: {}", node.sequence));
        if let Some(r_override) = node.r_override {
            ui.label(format!("Pinned radius: {r_override:.2}"));
        }
        ui.small("Double-click a node on the map to rename it.");
    }
}
