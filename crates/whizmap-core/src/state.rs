use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::tree::TreeNode;
use crate::{Error, Result};

/// Stable per-node identity.
///
/// Assigned once at ingestion (depth-first order, root = 0) and never
/// reassigned while the same logical node persists across layout passes.
/// Re-ingesting a new source tree discards all identities.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct NodeId(pub u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Visibility of a node's children.
///
/// Exactly one variant holds the child list, so "shown" and "hidden" children
/// can never coexist; leaves carry no list at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Expanded(Vec<NodeId>),
    Collapsed(Vec<NodeId>),
    Leaf,
}

impl DisplayState {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf)
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self, Self::Expanded(_))
    }

    pub fn is_collapsed(&self) -> bool {
        matches!(self, Self::Collapsed(_))
    }

    /// Child ids regardless of visibility; empty for leaves.
    pub fn children(&self) -> &[NodeId] {
        match self {
            Self::Expanded(ids) | Self::Collapsed(ids) => ids,
            Self::Leaf => &[],
        }
    }

    /// Child ids currently shown; empty for collapsed nodes and leaves.
    pub fn shown(&self) -> &[NodeId] {
        match self {
            Self::Expanded(ids) => ids,
            Self::Collapsed(_) | Self::Leaf => &[],
        }
    }
}

/// Engine-owned, positioned counterpart of a [`TreeNode`].
///
/// `primary` spreads across siblings, `secondary` layers generations; both
/// are written by the layout pass, with `prev_*` keeping the prior pass (or
/// animation seed) so persisting nodes can tween between positions.
#[derive(Debug, Clone)]
pub struct MapNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub depth: u32,
    pub name: String,
    pub content: Option<String>,
    pub display: DisplayState,
    pub primary: f64,
    pub secondary: f64,
    pub prev_primary: f64,
    pub prev_secondary: f64,
    pub width: f64,
    pub height: f64,
}

impl MapNode {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Count of children, shown or hidden.
    pub fn child_count(&self) -> usize {
        self.display.children().len()
    }
}

/// What [`MindmapState::toggle`] actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Expanded,
    Collapsed,
    /// Leaves are not toggleable; the call was a no-op.
    Leaf,
}

/// The layout tree: a flat arena indexed by [`NodeId`].
///
/// Built once per source tree, mutated in place by toggles and layout passes,
/// and dropped wholesale on re-ingestion or teardown.
#[derive(Debug, Clone)]
pub struct MindmapState {
    nodes: Vec<MapNode>,
}

impl MindmapState {
    /// Builds the arena from a source tree.
    ///
    /// Identities are assigned in depth-first order. The root starts
    /// expanded; every other non-leaf starts collapsed, so a large tree
    /// renders compactly on first layout.
    pub fn new(source: &TreeNode) -> Self {
        let mut nodes = Vec::with_capacity(source.count());
        Self::ingest(source, None, 0, &mut nodes);
        debug!(nodes = nodes.len(), "mindmap state built");
        Self { nodes }
    }

    /// Parses the host's JSON contract. `null` yields `Ok(None)` (stay idle).
    pub fn from_json(value: &Value) -> Result<Option<Self>> {
        Ok(TreeNode::from_json(value)?.map(|tree| Self::new(&tree)))
    }

    fn ingest(
        source: &TreeNode,
        parent: Option<NodeId>,
        depth: u32,
        nodes: &mut Vec<MapNode>,
    ) -> NodeId {
        let id = NodeId(nodes.len() as u32);
        nodes.push(MapNode {
            id,
            parent,
            depth,
            name: source.name.clone(),
            content: source.content.clone(),
            display: DisplayState::Leaf,
            primary: 0.0,
            secondary: 0.0,
            prev_primary: 0.0,
            prev_secondary: 0.0,
            width: 0.0,
            height: 0.0,
        });

        if source.children.is_empty() {
            return id;
        }

        let children: Vec<NodeId> = source
            .children
            .iter()
            .map(|child| Self::ingest(child, Some(id), depth + 1, nodes))
            .collect();

        nodes[id.index()].display = if parent.is_none() {
            DisplayState::Expanded(children)
        } else {
            DisplayState::Collapsed(children)
        };
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&MapNode> {
        self.nodes.get(id.index())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut MapNode> {
        self.nodes.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &MapNode> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut MapNode> {
        self.nodes.iter_mut()
    }

    /// Flips a node between expanded and collapsed and reports what happened.
    ///
    /// Leaves are not interactive for toggling: the state is left untouched
    /// and [`ToggleOutcome::Leaf`] is returned rather than an error, since an
    /// accidental tap on a childless box is expected input.
    pub fn toggle(&mut self, id: NodeId) -> Result<ToggleOutcome> {
        let node = self
            .nodes
            .get_mut(id.index())
            .ok_or(Error::UnknownNode { id })?;

        let outcome = match std::mem::replace(&mut node.display, DisplayState::Leaf) {
            DisplayState::Expanded(children) => {
                node.display = DisplayState::Collapsed(children);
                ToggleOutcome::Collapsed
            }
            DisplayState::Collapsed(children) => {
                node.display = DisplayState::Expanded(children);
                ToggleOutcome::Expanded
            }
            DisplayState::Leaf => ToggleOutcome::Leaf,
        };
        debug!(%id, ?outcome, "toggle");
        Ok(outcome)
    }

    /// Ids of all currently visible nodes, in depth-first preorder.
    ///
    /// A node is visible when every ancestor is expanded; collapsed subtrees
    /// contribute nothing, so the walk only descends through `Expanded`.
    pub fn visible_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.nodes.is_empty() {
            return out;
        }
        self.visit_visible(self.root(), &mut out);
        out
    }

    fn visit_visible(&self, id: NodeId, out: &mut Vec<NodeId>) {
        let Some(node) = self.node(id) else {
            return;
        };
        out.push(id);
        for child in node.display.shown() {
            self.visit_visible(*child, out);
        }
    }

    /// Parent→child pairs among visible nodes (one per visible non-root).
    pub fn visible_edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut out = Vec::new();
        for id in self.visible_ids() {
            let Some(node) = self.node(id) else {
                continue;
            };
            for child in node.display.shown() {
                out.push((id, *child));
            }
        }
        out
    }

    pub fn is_visible(&self, id: NodeId) -> bool {
        let Some(mut node) = self.node(id) else {
            return false;
        };
        while let Some(parent_id) = node.parent {
            let Some(parent) = self.node(parent_id) else {
                return false;
            };
            if !parent.display.shown().contains(&node.id) {
                return false;
            }
            node = parent;
        }
        true
    }
}
