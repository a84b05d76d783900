use serde::{Deserialize, Serialize};
use whizmap_core::{DisplayState, MapNode, NodeId, Orientation};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

/// Visual role of a node box; decides the paint and the mini-map marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeRole {
    Root,
    Collapsed,
    Expanded,
    Leaf,
}

impl NodeRole {
    pub fn of(node: &MapNode) -> Self {
        if node.is_root() {
            return Self::Root;
        }
        match node.display {
            DisplayState::Collapsed(_) => Self::Collapsed,
            DisplayState::Expanded(_) => Self::Expanded,
            DisplayState::Leaf => Self::Leaf,
        }
    }
}

/// One laid-out node box, in world coordinates (box center at `x`/`y`).
///
/// `prev_x`/`prev_y` carry the animation start point recorded by the layout
/// pass; consumers that do not animate can ignore them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedNode {
    pub id: NodeId,
    pub depth: u32,
    pub role: NodeRole,
    pub x: f64,
    pub y: f64,
    pub prev_x: f64,
    pub prev_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Connecting curve between a parent and a visible child: a cubic Bézier
/// with both control points on the secondary-axis midpoint, which renders as
/// the familiar S-shaped tree link.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EdgeCurve {
    pub from: NodeId,
    pub to: NodeId,
    pub start: LayoutPoint,
    pub control1: LayoutPoint,
    pub control2: LayoutPoint,
    pub end: LayoutPoint,
}

impl EdgeCurve {
    pub fn between(
        from: NodeId,
        to: NodeId,
        start: LayoutPoint,
        end: LayoutPoint,
        orientation: Orientation,
    ) -> Self {
        let (control1, control2) = match orientation {
            Orientation::LeftRight => {
                let mid_x = (start.x + end.x) / 2.0;
                (
                    LayoutPoint {
                        x: mid_x,
                        y: start.y,
                    },
                    LayoutPoint { x: mid_x, y: end.y },
                )
            }
            Orientation::TopDown => {
                let mid_y = (start.y + end.y) / 2.0;
                (
                    LayoutPoint {
                        x: start.x,
                        y: mid_y,
                    },
                    LayoutPoint { x: end.x, y: mid_y },
                )
            }
        };
        Self {
            from,
            to,
            start,
            control1,
            control2,
            end,
        }
    }

    /// SVG path data for hosts that draw into an SVG surface.
    pub fn to_svg_path(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        )
    }
}

/// Result of one layout pass over the visible tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MindmapLayout {
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<EdgeCurve>,
    pub bounds: Option<Bounds>,
    /// Primary-axis extent the first pass spread leaves across.
    pub extent: f64,
}

impl MindmapLayout {
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            bounds: None,
            extent: 0.0,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&PlacedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
