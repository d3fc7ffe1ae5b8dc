use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Stroke, Ui, Vec2, vec2};
use radial_strategy::engine::Viewport;
use radial_strategy::layout::{MapLayout, NODE_DOT_RADIUS, radial_layout};

use super::super::ViewModel;
use super::super::render_utils::{
    blend_color, dim_color, draw_background, fill_star_shape, node_color, offset_all, rank_color,
    stroke_closed, to_local, to_screen,
};

const CURVE_SAMPLES: usize = 12;
const LABEL_FONT_SIZE: f32 = 12.5;

fn label_origin(anchor: Pos2, outward: Vec2, size: Vec2) -> Pos2 {
    let x = if outward.x < -0.25 {
        anchor.x - size.x
    } else if outward.x > 0.25 {
        anchor.x
    } else {
        anchor.x - size.x * 0.5
    };
    let y = if outward.y < -0.5 {
        anchor.y - size.y
    } else if outward.y > 0.5 {
        anchor.y
    } else {
        anchor.y - size.y * 0.5
    };
    Pos2::new(x, y)
}

fn axis_label_align(outward: Vec2) -> Align2 {
    match (outward.x, outward.y) {
        (x, _) if x > 0.3 => Align2::LEFT_CENTER,
        (x, _) if x < -0.3 => Align2::RIGHT_CENTER,
        (_, y) if y < 0.0 => Align2::CENTER_BOTTOM,
        _ => Align2::CENTER_TOP,
    }
}

impl ViewModel {
    pub(in crate::app) fn draw_map(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);

        let viewport = Viewport {
            width: rect.width(),
            height: rect.height(),
            padding: self.config.geometry.padding_px,
        };
        let layout = radial_layout(&self.document, &self.frame, viewport, &self.config.geometry);

        let now = ui.input(|input| input.time);
        self.animator.retarget(layout.contours.ranks.clone(), now);
        if self.animator.advance(now) {
            ui.ctx().request_repaint();
        }

        self.handle_map_pointer(ui, rect, &response, &layout);

        self.draw_rings_and_axes(&painter, rect, &layout);
        self.draw_contours(&painter, rect, &layout);
        self.draw_nodes(ui, &painter, rect, &layout);
        self.draw_inline_edit(ui, rect);
    }

    fn draw_rings_and_axes(&self, painter: &egui::Painter, rect: egui::Rect, layout: &MapLayout) {
        let center = to_screen(rect, layout.center);
        let guide = Stroke::new(1.0, Color32::from_rgba_unmultiplied(90, 102, 118, 150));

        for ring in &layout.rings {
            painter.circle_stroke(center, ring.radius, guide);
            painter.text(
                center - vec2(0.0, ring.radius) + vec2(4.0, 2.0),
                Align2::LEFT_TOP,
                ring.label.as_str(),
                FontId::proportional(11.0),
                Color32::from_gray(140),
            );
        }

        for (axis, placement) in self.document.axes.iter().zip(&layout.axes) {
            painter.line_segment([center, to_screen(rect, placement.tip)], guide);
            let outward = vec2(placement.angle.cos(), placement.angle.sin());
            painter.text(
                to_screen(rect, placement.label_anchor),
                axis_label_align(outward),
                axis.label.as_str(),
                FontId::proportional(14.0),
                Color32::from_gray(225),
            );
        }
    }

    fn draw_contours(&self, painter: &egui::Painter, rect: egui::Rect, layout: &MapLayout) {
        let rank_count = self.frame.rank_count();
        let offset = rect.min.to_vec2();
        let tension = self.config.geometry.contour_tension;
        let center = to_screen(rect, layout.center);

        for (rank, path) in layout.contour_paths(self.animator.current(), tension) {
            let mut outline = path.flatten(CURVE_SAMPLES);
            offset_all(&mut outline, offset);

            let color = rank_color(rank, rank_count);
            let fill = Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 46);
            fill_star_shape(painter, center, &outline, fill);
            stroke_closed(painter, &outline, Stroke::new(1.6, color));
        }
    }

    fn draw_nodes(&self, ui: &Ui, painter: &egui::Painter, rect: egui::Rect, layout: &MapLayout) {
        let rank_count = self.frame.rank_count();
        let preview = self.pointer.drag_preview();
        let search_active = !self.search.trim().is_empty();
        let selected_color = Color32::from_rgb(245, 206, 93);
        let hovered = ui
            .input(|input| input.pointer.hover_pos())
            .filter(|pointer| rect.contains(*pointer))
            .and_then(|pointer| {
                layout.hit_test(to_local(rect, pointer), self.config.interaction.hit_slop_px)
            })
            .map(|node| node.id.as_str());

        if hovered.is_some() && preview.is_none() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        for placement in &layout.nodes {
            let Some(node) = self.document.node(&placement.id) else {
                continue;
            };

            let dragged = preview.filter(|(id, _)| *id == placement.id.as_str());
            let local = dragged.map_or(placement.position, |(_, position)| position);
            let position = to_screen(rect, local);

            let is_selected = self.selected.as_deref() == Some(node.id.as_str());
            let is_match = self.search_matches.contains(&node.id);
            let is_hovered = hovered == Some(node.id.as_str());

            let base = node_color(self.frame.rank(&node.ring_id), rank_count);
            let base = if self.frame.is_floating(&node.ring_id) {
                dim_color(base, 0.8)
            } else {
                base
            };
            let color = if is_selected {
                selected_color
            } else if is_hovered {
                Color32::from_rgb(255, 164, 101)
            } else if is_match {
                blend_color(base, Color32::from_rgb(103, 196, 255), 0.68)
            } else if search_active {
                dim_color(base, 0.45)
            } else {
                base
            };

            if dragged.is_some() {
                painter.circle_stroke(
                    to_screen(rect, placement.position),
                    NODE_DOT_RADIUS,
                    Stroke::new(1.0, Color32::from_gray(110)),
                );
            }

            painter.circle_filled(position, NODE_DOT_RADIUS, color);
            painter.circle_stroke(
                position,
                NODE_DOT_RADIUS,
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190)),
            );
            if is_selected {
                painter.circle_stroke(
                    position,
                    NODE_DOT_RADIUS + 4.0,
                    Stroke::new(1.6, Color32::from_rgba_unmultiplied(245, 206, 93, 170)),
                );
            }

            let editing = self
                .inline_edit
                .as_ref()
                .is_some_and(|edit| edit.node_id == node.id);
            if editing {
                continue;
            }

            let anchor = to_screen(rect, placement.label_anchor + (local - placement.position));
            let text_color = if search_active && !is_match {
                Color32::from_gray(130)
            } else {
                Color32::from_gray(238)
            };
            let galley = painter.layout(
                node.label.clone(),
                FontId::proportional(LABEL_FONT_SIZE),
                text_color,
                placement.wrap_width.unwrap_or(f32::INFINITY),
            );
            let origin = label_origin(anchor, placement.outward, galley.size());
            painter.galley(origin, galley, text_color);
        }
    }
}
