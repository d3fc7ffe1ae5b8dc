use eframe::egui::{Color32, Mesh, Painter, Pos2, Rect, Shape, Stroke, Vec2};

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));
}

pub(super) fn rank_color(rank: usize, rank_count: usize) -> Color32 {
    let palette = [
        Color32::from_rgb(55, 150, 215),
        Color32::from_rgb(92, 178, 150),
        Color32::from_rgb(160, 150, 96),
    ];
    let base = palette[rank.min(palette.len() - 1)];
    let depth = if rank_count <= 1 {
        0.0
    } else {
        rank as f32 / (rank_count - 1) as f32
    };
    dim_color(base, 1.0 - depth * 0.35)
}

pub(super) fn node_color(rank: Option<usize>, rank_count: usize) -> Color32 {
    match rank {
        Some(rank) => blend_color(rank_color(rank, rank_count), Color32::WHITE, 0.25),
        None => Color32::from_rgb(170, 170, 180),
    }
}

/// Fills a closed star-shaped outline with a fan from `center`. egui only
/// fills convex paths, and a contour around the center is star-shaped.
pub(super) fn fill_star_shape(painter: &Painter, center: Pos2, outline: &[Pos2], fill: Color32) {
    if outline.len() < 3 {
        return;
    }

    let mut mesh = Mesh::default();
    mesh.colored_vertex(center, fill);
    for point in outline {
        mesh.colored_vertex(*point, fill);
    }

    let count = outline.len() as u32;
    for index in 0..count {
        let next = (index + 1) % count;
        mesh.add_triangle(0, index + 1, next + 1);
    }
    painter.add(Shape::mesh(mesh));
}

pub(super) fn stroke_closed(painter: &Painter, outline: &[Pos2], stroke: Stroke) {
    if outline.len() < 2 {
        return;
    }
    painter.add(Shape::closed_line(outline.to_vec(), stroke));
}

pub(super) fn to_screen(rect: Rect, local: Pos2) -> Pos2 {
    rect.min + local.to_vec2()
}

pub(super) fn to_local(rect: Rect, screen: Pos2) -> Pos2 {
    Pos2::ZERO + (screen - rect.min)
}

pub(super) fn offset_all(points: &mut [Pos2], offset: Vec2) {
    for point in points {
        *point += offset;
    }
}
