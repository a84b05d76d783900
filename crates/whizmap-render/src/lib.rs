#![forbid(unsafe_code)]

//! Headless mindmap layout (no drawing, no I/O).
//!
//! Design goals:
//! - one layout pass = sizing + layered placement + collision resolution,
//!   deterministic for a given visible set, config, and text measurer
//! - plain serializable output models a host can draw with any surface
//! - mini-map projection shares the layout's bounds so overview and canvas
//!   can never disagree

pub mod layout;
pub mod minimap;
pub mod model;
pub mod sizing;
pub mod text;
pub mod theme;

use std::sync::Arc;

use crate::text::{CharCellMeasurer, TextMeasurer};

pub use layout::{LayoutSeed, layout_mindmap};
pub use minimap::{
    MiniEdge, MiniNode, MinimapModel, ViewportRect, fit_scale, pan_for_viewport_drag,
    project_minimap, viewport_rect,
};
pub use model::{Bounds, EdgeCurve, LayoutPoint, MindmapLayout, NodeRole, PlacedNode};
pub use sizing::node_size;
pub use theme::{DepthPaint, NodePaint, Theme};

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(CharCellMeasurer::default()),
        }
    }
}
