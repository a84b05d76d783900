use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;
use whizmap_core::{MindmapConfig, MindmapState, NodeId, Orientation};

use crate::model::{Bounds, EdgeCurve, LayoutPoint, MindmapLayout, NodeRole, PlacedNode};
use crate::sizing::node_size;
use crate::text::TextMeasurer;

/// Animation seeding for one layout pass.
#[derive(Debug, Clone, Default)]
pub struct LayoutSeed {
    /// Nodes that were visible in the previous pass. They keep their stored
    /// coordinates as the animation start; everything else is "entering".
    pub previously_visible: Vec<NodeId>,
    /// Layout-space `(primary, secondary)` that entering nodes grow out of —
    /// the toggled node's pre-toggle position. `None` on the first pass,
    /// which seeds from the root's initial spot (extent center, layer 0).
    pub origin: Option<(f64, f64)>,
}

/// Runs a full layout pass over the currently visible tree.
///
/// Writes sizes and coordinates into the arena (recording previous
/// coordinates for animation) and returns a projected snapshot. Collapsed
/// subtrees contribute nothing; the pass is deterministic for a given
/// visible set, config, and measurer.
pub fn layout_mindmap(
    state: &mut MindmapState,
    config: &MindmapConfig,
    measurer: &dyn TextMeasurer,
    seed: &LayoutSeed,
) -> MindmapLayout {
    let visible = state.visible_ids();
    if visible.is_empty() {
        return MindmapLayout::empty();
    }

    let mut sizes: FxHashMap<NodeId, (f64, f64)> = FxHashMap::default();
    for &id in &visible {
        let Some(node) = state.node(id) else {
            continue;
        };
        sizes.insert(id, node_size(node, &config.sizing, measurer));
    }

    let extent = (visible.len() as f64 * config.layout.slot_size).max(config.layout.min_extent);

    let mut primary = first_pass_primaries(state, extent);
    resolve_collisions(state, &visible, &mut primary, &sizes, config);

    // Commit coordinates. Nodes that persisted keep whatever the arena holds
    // as the tween start (the view may have written interpolated positions
    // there just before this pass); entering nodes start at the seed origin.
    let persisted: FxHashSet<NodeId> = seed.previously_visible.iter().copied().collect();
    let origin = seed.origin.unwrap_or((extent / 2.0, 0.0));
    for &id in &visible {
        let new_primary = primary[&id];
        let (width, height) = sizes[&id];
        let Some(node) = state.node_mut(id) else {
            continue;
        };
        let new_secondary = f64::from(node.depth) * config.layout.layer_spacing;

        if persisted.contains(&id) {
            node.prev_primary = node.primary;
            node.prev_secondary = node.secondary;
        } else {
            node.prev_primary = origin.0;
            node.prev_secondary = origin.1;
        }
        node.primary = new_primary;
        node.secondary = new_secondary;
        node.width = width;
        node.height = height;
    }

    let layout = project(state, &visible, config.layout.orientation, extent);
    debug!(
        nodes = layout.nodes.len(),
        edges = layout.edges.len(),
        extent,
        "layout pass"
    );
    layout
}

/// First pass: visible leaves take evenly spread slots across the primary
/// extent (in depth-first order); interior nodes sit midway between their
/// first and last shown child.
fn first_pass_primaries(state: &MindmapState, extent: f64) -> FxHashMap<NodeId, f64> {
    fn place(
        state: &MindmapState,
        id: NodeId,
        spacing: f64,
        center: f64,
        next_slot: &mut usize,
        out: &mut FxHashMap<NodeId, f64>,
    ) -> f64 {
        let Some(node) = state.node(id) else {
            return 0.0;
        };
        let shown = node.display.shown();
        let position = if shown.is_empty() {
            let p = if spacing == 0.0 {
                center
            } else {
                *next_slot as f64 * spacing
            };
            *next_slot += 1;
            p
        } else {
            let first = place(state, shown[0], spacing, center, next_slot, out);
            let mut last = first;
            for &child in &shown[1..] {
                last = place(state, child, spacing, center, next_slot, out);
            }
            (first + last) / 2.0
        };
        out.insert(id, position);
        position
    }

    let leaves = count_visible_leaves(state, state.root());
    let spacing = if leaves > 1 {
        extent / (leaves - 1) as f64
    } else {
        0.0
    };
    let mut out = FxHashMap::default();
    let mut next_slot = 0usize;
    place(
        state,
        state.root(),
        spacing,
        extent / 2.0,
        &mut next_slot,
        &mut out,
    );
    out
}

fn count_visible_leaves(state: &MindmapState, id: NodeId) -> usize {
    let Some(node) = state.node(id) else {
        return 0;
    };
    let shown = node.display.shown();
    if shown.is_empty() {
        return 1;
    }
    shown
        .iter()
        .map(|&child| count_visible_leaves(state, child))
        .sum()
}

/// Second pass: within each depth layer, sweep the nodes in primary order
/// and push every later sibling forward by any overlap plus the minimum gap.
///
/// The push is one-directional by design: it guarantees no overlap at the
/// cost of uneven spacing on large fan-outs.
fn resolve_collisions(
    state: &MindmapState,
    visible: &[NodeId],
    primary: &mut FxHashMap<NodeId, f64>,
    sizes: &FxHashMap<NodeId, (f64, f64)>,
    config: &MindmapConfig,
) {
    let mut by_depth: FxHashMap<u32, Vec<NodeId>> = FxHashMap::default();
    for &id in visible {
        let Some(node) = state.node(id) else {
            continue;
        };
        by_depth.entry(node.depth).or_default().push(id);
    }

    let mut depths: Vec<u32> = by_depth.keys().copied().collect();
    depths.sort_unstable();

    for depth in depths {
        let Some(group) = by_depth.get_mut(&depth) else {
            continue;
        };
        if group.len() <= 1 {
            continue;
        }
        group.sort_by(|a, b| primary[a].total_cmp(&primary[b]));

        for i in 0..group.len() - 1 {
            let current = group[i];
            let next = group[i + 1];
            let far = primary[&current] + half_primary(sizes[&current], config.layout.orientation);
            let near = primary[&next] - half_primary(sizes[&next], config.layout.orientation);

            if far + config.layout.min_gap > near {
                let overlap = far + config.layout.min_gap - near;
                for &id in &group[i + 1..] {
                    if let Some(p) = primary.get_mut(&id) {
                        *p += overlap;
                    }
                }
            }
        }
    }
}

/// Half of a box's extent along the primary (spread) axis.
fn half_primary((width, height): (f64, f64), orientation: Orientation) -> f64 {
    match orientation {
        Orientation::LeftRight => height / 2.0,
        Orientation::TopDown => width / 2.0,
    }
}

fn project(
    state: &MindmapState,
    visible: &[NodeId],
    orientation: Orientation,
    extent: f64,
) -> MindmapLayout {
    let mut nodes = Vec::with_capacity(visible.len());
    for &id in visible {
        let Some(node) = state.node(id) else {
            continue;
        };
        let (x, y) = orientation.project(node.primary, node.secondary);
        let (prev_x, prev_y) = orientation.project(node.prev_primary, node.prev_secondary);
        nodes.push(PlacedNode {
            id,
            depth: node.depth,
            role: NodeRole::of(node),
            x,
            y,
            prev_x,
            prev_y,
            width: node.width,
            height: node.height,
        });
    }

    let mut edges = Vec::new();
    for (from, to) in state.visible_edges() {
        let (Some(parent), Some(child)) = (state.node(from), state.node(to)) else {
            continue;
        };
        let (fx, fy) = orientation.project(parent.primary, parent.secondary);
        let (tx, ty) = orientation.project(child.primary, child.secondary);
        edges.push(EdgeCurve::between(
            from,
            to,
            LayoutPoint { x: fx, y: fy },
            LayoutPoint { x: tx, y: ty },
            orientation,
        ));
    }

    let bounds = Bounds::from_points(nodes.iter().flat_map(|n| {
        [
            (n.x - n.width / 2.0, n.y - n.height / 2.0),
            (n.x + n.width / 2.0, n.y + n.height / 2.0),
        ]
    }));

    MindmapLayout {
        nodes,
        edges,
        bounds,
        extent,
    }
}
