use serde::{Deserialize, Serialize};
use whizmap_core::{NodeId, ZoomTransform};
use whizmap_render::{EdgeCurve, MinimapModel, NodePaint, NodeRole};

use super::MindmapView;
use super::transition::{ease_cubic_in_out, lerp, progress};

/// Where a node box is in its enter/settle/exit lifecycle this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodePhase {
    Entering,
    Settled,
    Exiting,
}

/// One node box ready to draw: animated center position and size, resolved
/// paint, and the label text the host renders inside the box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: NodeId,
    pub depth: u32,
    pub role: NodeRole,
    pub phase: NodePhase,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub paint: NodePaint,
    pub label: String,
    pub body: Option<String>,
}

/// Small hover bubble for nodes without body text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipModel {
    pub x: f64,
    pub y: f64,
    pub name: String,
    pub depth: u32,
    pub child_count: usize,
}

/// Larger hover card for nodes with body text. Carries its own rectangle so
/// the engine can hit-test it (the card captures wheel/drag input).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardModel {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub name: String,
    pub content: String,
}

impl CardModel {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// The one overlay shown at a time; tooltip and card are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Overlay {
    #[default]
    None,
    Tooltip(TooltipModel),
    Card(CardModel),
}

impl Overlay {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Everything the host draws for one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub transform: ZoomTransform,
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<EdgeCurve>,
    pub minimap: Option<MinimapModel>,
    pub overlay: Overlay,
    /// True while any transition is still in flight; hosts can stop
    /// scheduling frames once this goes false.
    pub animating: bool,
}

impl Scene {
    pub(crate) fn empty() -> Self {
        Self {
            transform: ZoomTransform::IDENTITY,
            nodes: Vec::new(),
            edges: Vec::new(),
            minimap: None,
            overlay: Overlay::None,
            animating: false,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

impl MindmapView {
    /// Builds the frame for `at`.
    ///
    /// Pure interpolation: targets were fixed by the last layout pass and
    /// transform change, so sampling at any time (including out of order)
    /// never mutates view state.
    pub fn scene(&self, at: std::time::Duration) -> Scene {
        if self.is_torn_down() {
            return Scene::empty();
        }

        let anim = self.config().animation.duration;
        let t = ease_cubic_in_out(progress(self.layout_started, anim, at));
        let orientation = self.config().layout.orientation;

        let mut nodes = Vec::with_capacity(self.layout.nodes.len() + self.exiting.len());
        for placed in &self.layout.nodes {
            let Some(map_node) = self.state().node(placed.id) else {
                continue;
            };
            let entering = self.entering.contains(&placed.id);
            let grow = if entering { t } else { 1.0 };
            nodes.push(SceneNode {
                id: placed.id,
                depth: placed.depth,
                role: placed.role,
                phase: if entering && t < 1.0 {
                    NodePhase::Entering
                } else {
                    NodePhase::Settled
                },
                x: lerp(placed.prev_x, placed.x, t),
                y: lerp(placed.prev_y, placed.y, t),
                width: placed.width * grow,
                height: placed.height * grow,
                paint: self.theme().paint(placed.role, placed.depth),
                label: map_node.name.clone(),
                body: map_node.content.clone(),
            });
        }

        let mut animating_exits = false;
        for exit in self.exiting.values() {
            let et = ease_cubic_in_out(progress(exit.started, anim, at));
            if et < 1.0 {
                animating_exits = true;
            }
            nodes.push(SceneNode {
                id: exit.id,
                depth: exit.depth,
                role: exit.role,
                phase: NodePhase::Exiting,
                x: lerp(exit.from_x, exit.to_x, et),
                y: lerp(exit.from_y, exit.to_y, et),
                width: exit.width * (1.0 - et),
                height: exit.height * (1.0 - et),
                paint: self.theme().paint(exit.role, exit.depth),
                label: exit.label.clone(),
                body: None,
            });
        }

        // Curves follow the animated endpoints, so entering edges grow out of
        // the toggle origin together with their nodes.
        let mut edges = Vec::with_capacity(self.layout.edges.len());
        for edge in &self.layout.edges {
            let (Some(from), Some(to)) = (
                animated_endpoint(&nodes, edge.from),
                animated_endpoint(&nodes, edge.to),
            ) else {
                continue;
            };
            edges.push(EdgeCurve::between(edge.from, edge.to, from, to, orientation));
        }

        let transform = self.transform_at(at);
        let minimap = whizmap_render::project_minimap(
            &self.layout,
            &transform,
            self.surface(),
            &self.config().minimap,
        );

        Scene {
            transform,
            nodes,
            edges,
            minimap,
            overlay: self.hover.overlay.clone(),
            animating: t < 1.0 || animating_exits || self.transform_anim.is_some(),
        }
    }
}

fn animated_endpoint(nodes: &[SceneNode], id: NodeId) -> Option<whizmap_render::LayoutPoint> {
    nodes
        .iter()
        .find(|n| n.id == id && n.phase != NodePhase::Exiting)
        .map(|n| whizmap_render::LayoutPoint { x: n.x, y: n.y })
}
