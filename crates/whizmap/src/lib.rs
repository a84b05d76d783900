#![forbid(unsafe_code)]

//! `whizmap` is a headless, interactive mindmap view engine.
//!
//! It consumes a rooted tree of labeled nodes and produces everything a host
//! needs to draw a pannable/zoomable diagram: per-frame node boxes and
//! connecting curves, a synchronized mini-map with a draggable viewport
//! rectangle, and hover tooltip/card overlays. The host owns the drawing
//! surface and feeds pointer, wheel, and timer input in; the engine never
//! touches the network, the filesystem, or any global state.
//!
//! The crates underneath split the work the usual way:
//! - `whizmap-core`: tree model, expand/collapse state machine, identities
//! - `whizmap-render`: sizing, layered layout, collision, mini-map projection
//! - this crate: the [`view::MindmapView`] engine tying it all together

pub use whizmap_core::*;

pub mod render {
    pub use whizmap_render::{
        Bounds, DepthPaint, EdgeCurve, LayoutOptions, LayoutPoint, LayoutSeed, MindmapLayout,
        MiniEdge, MiniNode, MinimapModel, NodePaint, NodeRole, PlacedNode, Theme, ViewportRect,
        fit_scale, layout_mindmap, node_size, pan_for_viewport_drag, project_minimap,
        viewport_rect,
    };
    pub use whizmap_render::text::{CharCellMeasurer, TextMeasurer};
}

pub mod view;

pub use view::{
    CardModel, MindmapView, NodePhase, Overlay, Scene, SceneNode, TooltipModel, ViewEvent,
};
