use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const DEFAULT_POSITIONAL_RINGS: [(&str, f32); 3] = [("now", 0.4), ("next", 0.7), ("later", 1.0)];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub geometry: GeometryConfig,
    #[serde(default)]
    pub rings: RingPolicy,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Half-width of the fan applied to several nodes sharing one ring.
    #[serde(default = "GeometryConfig::default_spread_px")]
    pub spread_px: f32,
    /// Gap kept between any node and the outer edge.
    #[serde(default = "GeometryConfig::default_edge_margin_px")]
    pub edge_margin_px: f32,
    /// Extra pull-in for a lone band-ring node when no floating node exists.
    #[serde(default = "GeometryConfig::default_single_band_inset_px")]
    pub single_band_inset_px: f32,
    #[serde(default = "GeometryConfig::default_padding_px")]
    pub padding_px: f32,
    #[serde(default = "GeometryConfig::default_tension")]
    pub contour_tension: f32,
}

impl GeometryConfig {
    fn default_spread_px() -> f32 {
        18.0
    }
    fn default_edge_margin_px() -> f32 {
        10.0
    }
    fn default_single_band_inset_px() -> f32 {
        14.0
    }
    fn default_padding_px() -> f32 {
        72.0
    }
    fn default_tension() -> f32 {
        1.0
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            spread_px: Self::default_spread_px(),
            edge_margin_px: Self::default_edge_margin_px(),
            single_band_inset_px: Self::default_single_band_inset_px(),
            padding_px: Self::default_padding_px(),
            contour_tension: Self::default_tension(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionalRing {
    pub id: String,
    pub fraction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingPolicy {
    #[serde(default = "RingPolicy::default_positional")]
    pub positional: Vec<PositionalRing>,
    #[serde(default = "RingPolicy::default_band")]
    pub band: Vec<String>,
    #[serde(default = "RingPolicy::default_floating")]
    pub floating: Vec<String>,
}

impl RingPolicy {
    fn default_positional() -> Vec<PositionalRing> {
        DEFAULT_POSITIONAL_RINGS
            .iter()
            .map(|(id, fraction)| PositionalRing {
                id: (*id).to_owned(),
                fraction: *fraction,
            })
            .collect()
    }
    fn default_band() -> Vec<String> {
        vec!["later".to_owned()]
    }
    fn default_floating() -> Vec<String> {
        vec!["uncommitted".to_owned()]
    }

    pub fn fraction(&self, ring_id: &str) -> Option<f32> {
        self.positional
            .iter()
            .find(|ring| ring.id == ring_id)
            .map(|ring| ring.fraction)
    }

    pub fn is_band(&self, ring_id: &str) -> bool {
        self.band.iter().any(|id| id == ring_id)
    }

    pub fn is_floating(&self, ring_id: &str) -> bool {
        self.floating.iter().any(|id| id == ring_id)
    }
}

impl Default for RingPolicy {
    fn default() -> Self {
        Self {
            positional: Self::default_positional(),
            band: Self::default_band(),
            floating: Self::default_floating(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    #[serde(default = "InteractionConfig::default_drag_threshold_px")]
    pub drag_threshold_px: f32,
    #[serde(default = "InteractionConfig::default_double_activation_ms")]
    pub double_activation_ms: u64,
    #[serde(default = "InteractionConfig::default_hit_slop_px")]
    pub hit_slop_px: f32,
}

impl InteractionConfig {
    fn default_drag_threshold_px() -> f32 {
        5.0
    }
    fn default_double_activation_ms() -> u64 {
        320
    }
    fn default_hit_slop_px() -> f32 {
        6.0
    }

    pub fn double_activation_secs(&self) -> f64 {
        self.double_activation_ms as f64 / 1000.0
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: Self::default_drag_threshold_px(),
            double_activation_ms: Self::default_double_activation_ms(),
            hit_slop_px: Self::default_hit_slop_px(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "AnimationConfig::default_duration_ms")]
    pub duration_ms: u64,
}

impl AnimationConfig {
    fn default_duration_ms() -> u64 {
        360
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: Self::default_duration_ms(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        if !path.exists() {
            info!(path = %path.display(), "config file not found, using defaults");
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(error) => {
                warn!("{error:#}. Using defaults.");
                Self::default()
            }
        }
    }
}
