use eframe::egui::{self, Key, Order, Rect, Response, TextEdit, Ui, vec2};
use radial_strategy::engine::{
    DragDisc, EditFinish, InlineEdit, PointerId, PressOutcome, RadiusParams, ReleaseOutcome,
    commit_drop, resolve_drop, reveal_on_click,
};
use radial_strategy::layout::MapLayout;

use super::super::ViewModel;
use super::super::render_utils::{to_local, to_screen};

const INLINE_EDIT_WIDTH: f32 = 180.0;

impl ViewModel {
    fn drag_disc(&self, layout: &MapLayout) -> DragDisc {
        DragDisc {
            center: layout.center,
            radius: RadiusParams::new(layout.outer_radius, &self.config.geometry).max_radius(),
        }
    }

    pub(in crate::app) fn handle_map_pointer(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &Response,
        layout: &MapLayout,
    ) {
        let (pressed, released, primary_down, escape, position, now) = ui.input(|input| {
            (
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
                input.pointer.primary_down(),
                input.key_pressed(Key::Escape),
                input.pointer.interact_pos(),
                input.time,
            )
        });
        let pointer = PointerId::MOUSE;
        let disc = self.drag_disc(layout);

        if pressed
            && self.inline_edit.is_none()
            && let Some(screen) = position
            && response.hovered()
        {
            let local = to_local(rect, screen);
            match layout.hit_test(local, self.config.interaction.hit_slop_px) {
                Some(hit) => {
                    let outcome = self.pointer.pointer_down(
                        &hit.id,
                        pointer,
                        local,
                        now,
                        self.selected.as_deref(),
                    );
                    match outcome {
                        PressOutcome::Engaged { selection } => self.set_selected(selection),
                        PressOutcome::EditRequested { node_id } => {
                            if let Some(node) = self.document.node(&node_id) {
                                self.inline_edit =
                                    Some(InlineEdit::open(&node_id, &node.label, hit.position));
                            }
                        }
                        PressOutcome::Ignored => {}
                    }
                }
                None => self.set_selected(None),
            }
        }

        if self.pointer.captured_pointer().is_none() {
            return;
        }

        if escape {
            self.pointer.pointer_cancel(pointer);
            return;
        }

        if let Some(screen) = position {
            let local = to_local(rect, screen);
            if self.pointer.pointer_move(pointer, local, disc).is_some() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
                ui.ctx().request_repaint();
            }

            if released {
                let outcome =
                    self.pointer
                        .pointer_up(pointer, local, disc, self.selected.as_deref());
                self.settle_release(outcome, layout);
                ui.ctx().request_repaint();
                return;
            }
        }

        if !primary_down {
            self.pointer.pointer_cancel(pointer);
        }
    }

    fn settle_release(&mut self, outcome: ReleaseOutcome, layout: &MapLayout) {
        let (node_id, drop) = match outcome {
            ReleaseOutcome::Ignored => return,
            ReleaseOutcome::Clicked {
                node_id,
                still_selected,
            } => {
                self.reveal_after_click(&node_id, still_selected);
                return;
            }
            ReleaseOutcome::Dropped { node_id, position } => (node_id, position),
        };

        let params = RadiusParams::new(layout.outer_radius, &self.config.geometry);
        let target = resolve_drop(
            &self.document.axes,
            &self.document.nodes,
            &node_id,
            drop,
            layout.center,
            &self.frame,
            &params,
        );
        let Some(target) = target else {
            let still_selected = self.selected.as_deref() == Some(node_id.as_str());
            self.reveal_after_click(&node_id, still_selected);
            return;
        };

        let (nodes, commit) =
            commit_drop(&self.document.nodes, &node_id, &target, layout.outer_radius);
        if let Some(commit) = commit {
            self.replace_nodes(nodes);
            self.set_selected(Some(commit.node_id().to_owned()));
        }
    }

    fn reveal_after_click(&mut self, node_id: &str, still_selected: bool) {
        if let Some(reveal) = reveal_on_click(&self.document.nodes, node_id, still_selected) {
            self.request_reveal(reveal);
        }
    }

    pub(in crate::app) fn draw_inline_edit(&mut self, ui: &Ui, rect: Rect) {
        let Some(edit) = self.inline_edit.as_mut() else {
            return;
        };

        let anchor = to_screen(rect, edit.anchor);
        let focused = &mut self.inline_edit_focused;
        let mut finish = None;

        egui::Area::new(egui::Id::new("inline_label_edit"))
            .order(Order::Foreground)
            .fixed_pos(anchor - vec2(INLINE_EDIT_WIDTH * 0.5, 14.0))
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    let response = ui.add(
                        TextEdit::singleline(&mut edit.buffer).desired_width(INLINE_EDIT_WIDTH),
                    );
                    if !*focused {
                        response.request_focus();
                        *focused = true;
                    }

                    let (cancel, confirm) = ui.input(|input| {
                        (input.key_pressed(Key::Escape), input.key_pressed(Key::Enter))
                    });
                    if cancel {
                        finish = Some(EditFinish::Cancel);
                    } else if response.lost_focus() {
                        finish = Some(if confirm {
                            EditFinish::Confirm
                        } else {
                            EditFinish::Blur
                        });
                    }
                });
            });

        if let Some(how) = finish {
            self.finish_inline_edit(how);
            ui.ctx().request_repaint();
        }
    }
}
