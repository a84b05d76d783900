use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Axis mapping for the rendered tree.
///
/// Layout coordinates are always primary (spread across siblings) and
/// secondary (one layer per generation); orientation only decides which
/// screen axis each maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    /// Generations grow to the right, siblings spread vertically.
    #[default]
    LeftRight,
    /// Generations grow downward, siblings spread horizontally.
    TopDown,
}

impl Orientation {
    /// Maps layout coordinates to screen-space x/y.
    pub fn project(self, primary: f64, secondary: f64) -> (f64, f64) {
        match self {
            Self::LeftRight => (secondary, primary),
            Self::TopDown => (primary, secondary),
        }
    }

    /// Inverse of [`Orientation::project`].
    pub fn unproject(self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Self::LeftRight => (y, x),
            Self::TopDown => (x, y),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub orientation: Orientation,
    /// Distance between consecutive depth layers, in px.
    pub layer_spacing: f64,
    /// Primary-axis room reserved per visible node when sizing the extent.
    pub slot_size: f64,
    /// Lower bound on the primary extent regardless of node count.
    pub min_extent: f64,
    /// Minimum primary-axis gap kept between sibling boxes at the same depth.
    pub min_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            layer_spacing: 280.0,
            slot_size: 80.0,
            min_extent: 500.0,
            min_gap: 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SizingConfig {
    pub min_width: f64,
    pub max_width: f64,
    /// Width padding added on top of the measured text advance.
    pub width_pad: f64,
    /// Horizontal inset subtracted from the box width before wrapping.
    pub inner_pad: f64,
    pub name_line_height: f64,
    pub name_block_pad: f64,
    pub content_line_height: f64,
    pub content_block_pad: f64,
    /// Root boxes keep a fixed compact size instead of text-driven sizing.
    pub root_width: f64,
    pub root_height: f64,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            min_width: 120.0,
            max_width: 250.0,
            width_pad: 40.0,
            inner_pad: 20.0,
            name_line_height: 18.0,
            name_block_pad: 18.0,
            content_line_height: 12.0,
            content_block_pad: 12.0,
            root_width: 160.0,
            root_height: 48.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoomConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Multiplier applied by one discrete zoom-in step (zoom-out divides).
    pub step: f64,
    /// Exponent factor for wheel deltas: `scale *= 2^(-delta_y * wheel_factor)`.
    pub wheel_factor: f64,
    pub step_duration: Duration,
    pub reset_duration: Duration,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 5.0,
            step: 1.2,
            wheel_factor: 0.002,
            step_duration: Duration::from_millis(200),
            reset_duration: Duration::from_millis(400),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MinimapConfig {
    pub width: f64,
    pub height: f64,
    /// Share of the mini-map area the tree bounding box may fill.
    pub fill_ratio: f64,
    pub pan_duration: Duration,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 150.0,
            fill_ratio: 0.9,
            pan_duration: Duration::from_millis(200),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HoverConfig {
    /// Grace period after the pointer leaves a node before overlays hide.
    pub node_leave_delay: Duration,
    /// Grace period after the pointer leaves the content card.
    pub card_leave_delay: Duration,
    pub card_width: f64,
    pub card_offset_x: f64,
    pub card_offset_y: f64,
    pub tooltip_offset_x: f64,
    pub tooltip_offset_y: f64,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            node_leave_delay: Duration::from_millis(3000),
            card_leave_delay: Duration::from_millis(500),
            card_width: 300.0,
            card_offset_x: 20.0,
            card_offset_y: -20.0,
            tooltip_offset_x: 10.0,
            tooltip_offset_y: -10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimationConfig {
    /// Node enter/update/exit transition length.
    pub duration: Duration,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(750),
        }
    }
}

/// Full engine configuration. Every group has serde + `Default`, so hosts can
/// override a few fields from JSON and inherit the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MindmapConfig {
    pub layout: LayoutConfig,
    pub sizing: SizingConfig,
    pub zoom: ZoomConfig,
    pub minimap: MinimapConfig,
    pub hover: HoverConfig,
    pub animation: AnimationConfig,
}
