use serde::{Deserialize, Serialize};
use whizmap_core::geom::Size;
use whizmap_core::{MinimapConfig, NodeId, ZoomTransform};

use crate::model::{Bounds, MindmapLayout, NodeRole};

/// Simplified node marker in mini-map pixel coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MiniNode {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub role: NodeRole,
}

/// Straight-line edge in mini-map pixel coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MiniEdge {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// The draggable viewport indicator, in mini-map pixel coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewportRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Scaled-down overview of the whole visible tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimapModel {
    /// World px → mini-map px factor (the padded fit scale).
    pub scale: f64,
    pub bounds: Bounds,
    pub nodes: Vec<MiniNode>,
    pub edges: Vec<MiniEdge>,
    pub viewport: ViewportRect,
}

/// Uniform factor that fits `bounds` into the mini-map area, with the
/// configured padding share. One scale serves markers, edges, and the
/// viewport rectangle alike.
pub fn fit_scale(bounds: &Bounds, config: &MinimapConfig) -> f64 {
    let w = bounds.width().max(1.0);
    let h = bounds.height().max(1.0);
    (config.width / w).min(config.height / h) * config.fill_ratio
}

/// Projects the current layout plus view transform into a mini-map model.
///
/// Returns `None` when there is nothing to draw (no layout bounds yet).
pub fn project_minimap(
    layout: &MindmapLayout,
    transform: &ZoomTransform,
    surface: Size,
    config: &MinimapConfig,
) -> Option<MinimapModel> {
    let bounds = layout.bounds?;
    let scale = fit_scale(&bounds, config);

    let nodes = layout
        .nodes
        .iter()
        .map(|n| MiniNode {
            id: n.id,
            x: (n.x - bounds.min_x) * scale,
            y: (n.y - bounds.min_y) * scale,
            role: n.role,
        })
        .collect();

    let edges = layout
        .edges
        .iter()
        .map(|e| MiniEdge {
            x1: (e.start.x - bounds.min_x) * scale,
            y1: (e.start.y - bounds.min_y) * scale,
            x2: (e.end.x - bounds.min_x) * scale,
            y2: (e.end.y - bounds.min_y) * scale,
        })
        .collect();

    Some(MinimapModel {
        scale,
        bounds,
        nodes,
        edges,
        viewport: viewport_rect(transform, surface, &bounds, scale),
    })
}

/// Inverse-maps the main canvas's visible region into mini-map coordinates.
pub fn viewport_rect(
    transform: &ZoomTransform,
    surface: Size,
    bounds: &Bounds,
    scale: f64,
) -> ViewportRect {
    let world_x = -transform.x / transform.k;
    let world_y = -transform.y / transform.k;
    ViewportRect {
        x: (world_x - bounds.min_x) * scale,
        y: (world_y - bounds.min_y) * scale,
        width: surface.width / transform.k * scale,
        height: surface.height / transform.k * scale,
    }
}

/// Pan that places the viewport rectangle's top-left corner at `pos`
/// (mini-map coordinates). The scale is left untouched and the position is
/// clamped so the rectangle keeps overlapping the tracked bounds — the main
/// canvas can never be dragged out to a degenerate view.
pub fn pan_for_viewport_drag(
    pos: (f64, f64),
    transform: &ZoomTransform,
    surface: Size,
    bounds: &Bounds,
    config: &MinimapConfig,
) -> ZoomTransform {
    let scale = fit_scale(bounds, config);
    let view_w = surface.width / transform.k * scale;
    let view_h = surface.height / transform.k * scale;

    let x = pos.0.clamp(-view_w / 2.0, config.width - view_w / 2.0);
    let y = pos.1.clamp(-view_h / 2.0, config.height - view_h / 2.0);

    let world_x = x / scale + bounds.min_x;
    let world_y = y / scale + bounds.min_y;
    ZoomTransform {
        k: transform.k,
        x: -world_x * transform.k,
        y: -world_y * transform.k,
    }
}
