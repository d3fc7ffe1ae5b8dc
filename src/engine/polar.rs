use std::collections::HashMap;
use std::f32::consts::TAU;

use eframe::egui::{Pos2, pos2, vec2};

use crate::config::{DEFAULT_POSITIONAL_RINGS, RingPolicy};
use crate::strategy::Ring;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
}

impl Viewport {
    pub fn center(&self) -> Pos2 {
        pos2(self.width * 0.5, self.height * 0.5)
    }

    pub fn outer_radius(&self) -> f32 {
        ((self.width.min(self.height) * 0.5) - self.padding).max(0.0)
    }
}

/// Angle of axis `index` in radians. Axis 0 points up and the rest follow
/// clockwise in screen space; layouts of exactly 4 or 8 axes are rotated by
/// half a step so no axis sits on a cardinal direction.
pub fn axis_angle(index: usize, axis_count: usize) -> f32 {
    let offset_degrees = match axis_count {
        4 => 45.0,
        8 => 22.5,
        _ => 0.0,
    };
    let step_degrees = if axis_count == 0 {
        0.0
    } else {
        360.0 / axis_count as f32
    };

    (offset_degrees + (-90.0 + index as f32 * step_degrees)).to_radians()
}

/// Base radius under the built-in ring fractions, for callers without a
/// [`RingFrame`]. `None` for rings outside the default positional set.
pub fn ring_base_radius(ring_id: &str, outer_radius: f32) -> Option<f32> {
    DEFAULT_POSITIONAL_RINGS
        .iter()
        .find(|(id, _)| *id == ring_id)
        .map(|(_, fraction)| fraction * outer_radius)
}

pub fn polar_to_point(center: Pos2, angle: f32, radius: f32) -> Pos2 {
    center + vec2(angle.cos(), angle.sin()) * radius
}

pub fn point_angle(center: Pos2, point: Pos2) -> f32 {
    let delta = point - center;
    delta.y.atan2(delta.x)
}

pub fn circular_distance(a: f32, b: f32) -> f32 {
    let delta = (a - b).abs().rem_euclid(TAU);
    delta.min(TAU - delta)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RingRole {
    Positional {
        fraction: f32,
        rank: usize,
        band: bool,
        frontier: bool,
    },
    Floating,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RingFrame {
    roles: HashMap<String, RingRole>,
    snap_targets: Vec<(String, f32)>,
    floating_ring: Option<String>,
    rank_count: usize,
}

impl RingFrame {
    pub fn new(rings: &[Ring], policy: &RingPolicy) -> Self {
        let mut roles = HashMap::with_capacity(rings.len());
        let mut snap_targets = Vec::new();
        let mut floating_ring = None;
        let mut rank = 0usize;

        for ring in rings {
            if policy.is_floating(&ring.id) {
                floating_ring.get_or_insert_with(|| ring.id.clone());
                roles.insert(ring.id.clone(), RingRole::Floating);
                continue;
            }

            let explicit = policy.fraction(&ring.id);
            let band = policy.is_band(&ring.id);
            if let Some(fraction) = explicit {
                snap_targets.push((ring.id.clone(), fraction));
            }
            roles.insert(
                ring.id.clone(),
                RingRole::Positional {
                    fraction: explicit.unwrap_or(1.0),
                    rank,
                    band,
                    frontier: explicit.is_some() && !band,
                },
            );
            rank += 1;
        }

        Self {
            roles,
            snap_targets,
            floating_ring,
            rank_count: rank,
        }
    }

    pub fn role(&self, ring_id: &str) -> RingRole {
        self.roles
            .get(ring_id)
            .copied()
            .unwrap_or(RingRole::Positional {
                fraction: 1.0,
                rank: self.rank_count.saturating_sub(1),
                band: false,
                frontier: false,
            })
    }

    pub fn rank(&self, ring_id: &str) -> Option<usize> {
        match self.role(ring_id) {
            RingRole::Positional { rank, .. } => Some(rank),
            RingRole::Floating => None,
        }
    }

    pub fn rank_count(&self) -> usize {
        self.rank_count
    }

    pub fn is_floating(&self, ring_id: &str) -> bool {
        matches!(self.role(ring_id), RingRole::Floating)
    }

    pub fn is_band(&self, ring_id: &str) -> bool {
        matches!(self.role(ring_id), RingRole::Positional { band: true, .. })
    }

    pub fn is_frontier(&self, ring_id: &str) -> bool {
        matches!(self.role(ring_id), RingRole::Positional { frontier: true, .. })
    }

    pub fn base_radius(&self, ring_id: &str, outer_radius: f32) -> Option<f32> {
        match self.role(ring_id) {
            RingRole::Positional { fraction, .. } => Some(fraction * outer_radius),
            RingRole::Floating => None,
        }
    }

    pub fn snap_targets(&self) -> &[(String, f32)] {
        &self.snap_targets
    }

    pub fn floating_ring(&self) -> Option<&str> {
        self.floating_ring.as_deref()
    }
}
