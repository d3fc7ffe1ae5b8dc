use std::fmt::Write as _;

use eframe::egui::{Pos2, pos2};

use crate::strategy::{Axis, Node};

use super::polar::{RingFrame, axis_angle, polar_to_point};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContourRadii {
    pub ranks: Vec<Vec<f32>>,
}

/// For every cumulative rank, the furthest resolved radius on each axis among
/// nodes at that rank or earlier. Floating rings never count and an axis with
/// no eligible node collapses to the center.
pub fn contour_radii(
    axes: &[Axis],
    nodes: &[Node],
    resolved: &[Option<f32>],
    frame: &RingFrame,
) -> ContourRadii {
    let mut ranks = vec![vec![0.0f32; axes.len()]; frame.rank_count()];

    for (node, radius) in nodes.iter().zip(resolved) {
        let Some(radius) = *radius else {
            continue;
        };
        let Some(node_rank) = frame.rank(&node.ring_id) else {
            continue;
        };
        let Some(axis_index) = axes.iter().position(|axis| axis.id == node.axis_id) else {
            continue;
        };

        for per_axis in ranks.iter_mut().skip(node_rank) {
            per_axis[axis_index] = per_axis[axis_index].max(radius);
        }
    }

    ContourRadii { ranks }
}

pub fn contour_points(radii: &[f32], center: Pos2) -> Vec<Pos2> {
    let count = radii.len();
    radii
        .iter()
        .enumerate()
        .map(|(index, radius)| polar_to_point(center, axis_angle(index, count), *radius))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    Line(Pos2),
    Cubic { c1: Pos2, c2: Pos2, end: Pos2 },
}

impl PathSegment {
    pub fn end(&self) -> Pos2 {
        match *self {
            Self::Line(end) | Self::Cubic { end, .. } => end,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContourPath {
    pub start: Option<Pos2>,
    pub segments: Vec<PathSegment>,
}

pub fn smooth_closed_path(points: &[Pos2], tension: f32) -> ContourPath {
    let count = points.len();
    let Some(&start) = points.first() else {
        return ContourPath::default();
    };

    if count < 3 {
        return ContourPath {
            start: Some(start),
            segments: points[1..].iter().copied().map(PathSegment::Line).collect(),
        };
    }

    let segments = (0..count)
        .map(|index| {
            let p0 = points[(index + count - 1) % count];
            let p1 = points[index];
            let p2 = points[(index + 1) % count];
            let p3 = points[(index + 2) % count];

            PathSegment::Cubic {
                c1: p1 + (p2 - p0) / 6.0 * tension,
                c2: p2 - (p3 - p1) / 6.0 * tension,
                end: p2,
            }
        })
        .collect();

    ContourPath {
        start: Some(start),
        segments,
    }
}

impl ContourPath {
    /// SVG path data. Coordinates use the shortest exact float formatting so
    /// [`decode_anchors`] recovers them bit for bit.
    pub fn to_svg(&self) -> String {
        let Some(start) = self.start else {
            return String::new();
        };

        let mut out = format!("M {} {}", start.x, start.y);
        for segment in &self.segments {
            match segment {
                PathSegment::Line(end) => {
                    let _ = write!(out, " L {} {}", end.x, end.y);
                }
                PathSegment::Cubic { c1, c2, end } => {
                    let _ = write!(
                        out,
                        " C {} {} {} {} {} {}",
                        c1.x, c1.y, c2.x, c2.y, end.x, end.y
                    );
                }
            }
        }
        out.push_str(" Z");
        out
    }

    pub fn anchors(&self) -> Vec<Pos2> {
        self.start
            .into_iter()
            .chain(self.segments.iter().map(PathSegment::end))
            .collect()
    }

    pub fn flatten(&self, samples_per_segment: usize) -> Vec<Pos2> {
        let Some(start) = self.start else {
            return Vec::new();
        };

        let samples = samples_per_segment.max(1);
        let mut points = vec![start];
        let mut cursor = start;
        for segment in &self.segments {
            match *segment {
                PathSegment::Line(end) => points.push(end),
                PathSegment::Cubic { c1, c2, end } => {
                    for step in 1..=samples {
                        let t = step as f32 / samples as f32;
                        points.push(cubic_point(cursor, c1, c2, end, t));
                    }
                }
            }
            cursor = segment.end();
        }

        if points.len() > 1 && points.last() == Some(&start) {
            points.pop();
        }
        points
    }
}

fn cubic_point(p0: Pos2, c1: Pos2, c2: Pos2, p3: Pos2, t: f32) -> Pos2 {
    if t >= 1.0 {
        return p3;
    }
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    pos2(
        a * p0.x + b * c1.x + c * c2.x + d * p3.x,
        a * p0.y + b * c1.y + c * c2.y + d * p3.y,
    )
}

pub fn decode_anchors(path: &str) -> Vec<Pos2> {
    let mut anchors = Vec::new();
    let mut tokens = path.split_whitespace().peekable();

    while let Some(token) = tokens.next() {
        let arity = match token {
            "M" | "L" => 2,
            "C" => 6,
            _ => continue,
        };

        let mut values = Vec::with_capacity(arity);
        while values.len() < arity {
            match tokens.peek().and_then(|next| next.parse::<f32>().ok()) {
                Some(value) => {
                    values.push(value);
                    tokens.next();
                }
                None => break,
            }
        }

        if let [.., x, y] = values[..]
            && values.len() == arity
        {
            anchors.push(pos2(x, y));
        }
    }

    anchors
}
