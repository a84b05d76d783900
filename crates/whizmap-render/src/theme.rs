use serde::{Deserialize, Serialize};

use crate::model::NodeRole;

/// Resolved colors for one node box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePaint {
    pub fill: String,
    pub stroke: String,
    pub text: String,
}

impl NodePaint {
    fn new(fill: &str, stroke: &str, text: &str) -> Self {
        Self {
            fill: fill.to_string(),
            stroke: stroke.to_string(),
            text: text.to_string(),
        }
    }
}

/// Per-depth palette entry: collapsed boxes get the brighter fill so hidden
/// subtrees stand out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthPaint {
    pub fill: String,
    pub collapsed_fill: String,
    pub stroke: String,
    pub text: String,
}

impl DepthPaint {
    fn new(fill: &str, collapsed_fill: &str, stroke: &str, text: &str) -> Self {
        Self {
            fill: fill.to_string(),
            collapsed_fill: collapsed_fill.to_string(),
            stroke: stroke.to_string(),
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub root: NodePaint,
    pub collapsed: NodePaint,
    pub expanded: NodePaint,
    /// When non-empty, non-root paints come from this table indexed by depth
    /// (the last entry repeats for deeper levels) instead of the flat
    /// collapsed/expanded pair.
    pub depth_palette: Vec<DepthPaint>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::flat()
    }
}

impl Theme {
    /// Role-colored theme: indigo root, amber collapsed, white expanded.
    pub fn flat() -> Self {
        Self {
            root: NodePaint::new("#4f46e5", "#3730a3", "#ffffff"),
            collapsed: NodePaint::new("#f59e0b", "#d97706", "#333333"),
            expanded: NodePaint::new("#ffffff", "#6b7280", "#333333"),
            depth_palette: Vec::new(),
        }
    }

    /// Depth-colored theme: indigo → violet → pink → orange → yellow, green
    /// from level five on.
    pub fn depth_colored() -> Self {
        Self {
            depth_palette: vec![
                DepthPaint::new("#4f46e5", "#6366f1", "#8b5cf6", "#ffffff"),
                DepthPaint::new("#7c3aed", "#8b5cf6", "#a855f7", "#ffffff"),
                DepthPaint::new("#db2777", "#ec4899", "#f472b6", "#ffffff"),
                DepthPaint::new("#ea580c", "#f97316", "#fb923c", "#ffffff"),
                DepthPaint::new("#ca8a04", "#eab308", "#facc15", "#1f2937"),
                DepthPaint::new("#16a34a", "#22c55e", "#4ade80", "#ffffff"),
            ],
            ..Self::flat()
        }
    }

    pub fn paint(&self, role: NodeRole, depth: u32) -> NodePaint {
        if role == NodeRole::Root {
            return self.root.clone();
        }
        if self.depth_palette.is_empty() {
            return match role {
                NodeRole::Collapsed => self.collapsed.clone(),
                _ => self.expanded.clone(),
            };
        }

        let index = (depth as usize).min(self.depth_palette.len() - 1);
        let entry = &self.depth_palette[index];
        let fill = if role == NodeRole::Collapsed {
            entry.collapsed_fill.clone()
        } else {
            entry.fill.clone()
        };
        NodePaint {
            fill,
            stroke: entry.stroke.clone(),
            text: entry.text.clone(),
        }
    }
}
