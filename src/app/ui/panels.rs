use std::collections::HashSet;
use std::path::Path;

use eframe::egui::{self, Align, Context, Layout};
use radial_strategy::config::EngineConfig;
use radial_strategy::engine::{
    ContourAnimator, EditFinish, PointerSession, RevealRequest, RingFrame,
};
use radial_strategy::strategy::{Node, StrategyDocument};
use radial_strategy::util::search_matches;
use tracing::info;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(document: StrategyDocument, config: EngineConfig) -> Self {
        let frame = RingFrame::new(&document.rings, &config.rings);
        let pointer = PointerSession::new(
            config.interaction.drag_threshold_px,
            config.interaction.double_activation_secs(),
        );
        let animator = ContourAnimator::new(config.animation.duration_secs());

        Self {
            document,
            frame,
            config,
            search: String::new(),
            search_matches: HashSet::new(),
            selected: None,
            expanded_axes: HashSet::new(),
            reveal: None,
            pointer,
            animator,
            inline_edit: None,
            inline_edit_focused: false,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        document_path: Option<&Path>,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Radial Strategy");
                    ui.separator();
                    if !self.document.title.is_empty() {
                        ui.label(self.document.title.as_str());
                    }
                    match document_path {
                        Some(path) => ui.label(format!("document: {}", path.display())),
                        None => ui.label("document: built-in sample"),
                    };
                    ui.label(format!("axes: {}", self.document.axes.len()));
                    ui.label(format!("nodes: {}", self.document.nodes.len()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload document"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.animator.is_animating() {
                            ui.spinner();
                        }
                    });
                });
            });

        egui::SidePanel::right("companion")
            .resizable(true)
            .default_width(360.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading strategy document...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_map(ui);
            }
        });
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<String>) {
        if self.selected == selected {
            return;
        }
        self.selected = selected;
    }

    pub(in crate::app) fn request_reveal(&mut self, reveal: RevealRequest) {
        self.expanded_axes.insert(reveal.axis_id.clone());
        self.reveal = Some(reveal);
    }

    pub(in crate::app) fn replace_nodes(&mut self, nodes: Vec<Node>) {
        self.document.replace_nodes(nodes);
        self.refresh_search();
    }

    pub(in crate::app) fn refresh_search(&mut self) {
        self.search_matches = search_matches(&self.document.nodes, &self.search);
    }

    pub(in crate::app) fn finish_inline_edit(&mut self, how: EditFinish) {
        let Some(edit) = self.inline_edit.take() else {
            return;
        };
        self.inline_edit_focused = false;

        let node_id = edit.node_id.clone();
        let Some(label) = edit.finish(how) else {
            return;
        };
        if self.document.rename_node(&node_id, &label) {
            info!(node = %node_id, label = %label, "renamed node");
            self.refresh_search();
        }
    }
}
