//! The interactive view engine.
//!
//! `MindmapView` owns the layout tree, the pan/zoom transform, the hover
//! state, and every pending timer; nothing lives in globals, so any number
//! of instances coexist. All input methods take an explicit monotonic
//! timestamp (time since mount), which keeps the engine deterministic and
//! lets hosts drive it from any frame clock.

mod hover;
mod input;
pub mod scene;
mod transition;

#[cfg(test)]
mod tests;

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use tracing::debug;
use whizmap_core::geom::{Point, Size};
use whizmap_core::{
    MindmapConfig, MindmapState, NodeId, Result, ToggleOutcome, TreeNode, ZoomTransform,
};
use whizmap_render::text::TextMeasurer;
use whizmap_render::{LayoutOptions, LayoutSeed, MindmapLayout, NodeRole, Theme, layout_mindmap};

pub use scene::{CardModel, NodePhase, Overlay, Scene, SceneNode, TooltipModel};

use self::transition::{TransformTransition, ease_cubic_in_out, lerp, progress};

/// Notifications the engine queues for the host to drain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The user asked to leave the view; the engine has already torn down.
    Dismissed,
    NodeToggled { id: NodeId, outcome: ToggleOutcome },
}

#[derive(Debug, Clone, Copy)]
struct PointerState {
    press: Option<Point>,
    last: Point,
    panning: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            press: None,
            last: whizmap_core::geom::point(0.0, 0.0),
            panning: false,
        }
    }
}

/// Snapshot of a node that left the visible set: it shrinks from where it
/// was on screen toward the toggle origin, then is purged.
#[derive(Debug, Clone)]
struct ExitingNode {
    id: NodeId,
    depth: u32,
    role: NodeRole,
    label: String,
    from_x: f64,
    from_y: f64,
    to_x: f64,
    to_y: f64,
    width: f64,
    height: f64,
    started: Duration,
}

pub struct MindmapView {
    state: MindmapState,
    config: MindmapConfig,
    theme: Theme,
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
    surface: Size,
    transform: ZoomTransform,
    transform_anim: Option<TransformTransition>,
    layout: MindmapLayout,
    layout_started: Duration,
    entering: IndexSet<NodeId>,
    exiting: IndexMap<NodeId, ExitingNode>,
    hover: hover::HoverState,
    pointer: PointerState,
    events: VecDeque<ViewEvent>,
    torn_down: bool,
}

impl MindmapView {
    pub fn new(tree: &TreeNode, surface: Size, config: MindmapConfig) -> Self {
        Self::with_options(tree, surface, config, LayoutOptions::default(), Theme::default())
    }

    pub fn with_options(
        tree: &TreeNode,
        surface: Size,
        config: MindmapConfig,
        options: LayoutOptions,
        theme: Theme,
    ) -> Self {
        let mut state = MindmapState::new(tree);
        let layout = layout_mindmap(
            &mut state,
            &config,
            options.text_measurer.as_ref(),
            &LayoutSeed::default(),
        );
        let entering = layout.nodes.iter().map(|n| n.id).collect();
        Self {
            state,
            config,
            theme,
            measurer: options.text_measurer,
            surface,
            transform: ZoomTransform::IDENTITY,
            transform_anim: None,
            layout,
            layout_started: Duration::ZERO,
            entering,
            exiting: IndexMap::new(),
            hover: hover::HoverState::default(),
            pointer: PointerState::default(),
            events: VecDeque::new(),
            torn_down: false,
        }
    }

    /// Mounts a view from the host's JSON contract. A `null` value means
    /// there is nothing to show: the caller gets `Ok(None)` and stays idle.
    pub fn from_json(value: &Value, surface: Size, config: MindmapConfig) -> Result<Option<Self>> {
        Ok(TreeNode::from_json(value)?.map(|tree| Self::new(&tree, surface, config)))
    }

    /// Replaces the source tree wholesale: previous identities, coordinates,
    /// overlays, and transforms are all discarded.
    pub fn ingest(&mut self, tree: &TreeNode, now: Duration) {
        if self.torn_down {
            return;
        }
        self.state = MindmapState::new(tree);
        self.transform = ZoomTransform::IDENTITY;
        self.transform_anim = None;
        self.exiting.clear();
        self.hover.clear();
        self.pointer = PointerState::default();
        self.layout = layout_mindmap(
            &mut self.state,
            &self.config,
            self.measurer.as_ref(),
            &LayoutSeed::default(),
        );
        self.entering = self.layout.nodes.iter().map(|n| n.id).collect();
        self.layout_started = now;
        debug!(nodes = self.state.len(), "mindmap re-ingested");
    }

    pub fn state(&self) -> &MindmapState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut MindmapState {
        &mut self.state
    }

    pub fn config(&self) -> &MindmapConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn surface(&self) -> Size {
        self.surface
    }

    pub fn layout(&self) -> &MindmapLayout {
        &self.layout
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// The view transform at `now`, resolving any in-flight transition.
    pub fn transform_at(&self, now: Duration) -> ZoomTransform {
        self.transform_anim
            .map_or(self.transform, |anim| anim.at(now))
    }

    /// Resizes the drawing surface and re-lays out so the extent and the
    /// mini-map viewport stay honest.
    pub fn set_surface_size(&mut self, surface: Size, now: Duration) {
        if self.torn_down {
            return;
        }
        self.surface = surface;
        self.relayout(now, None);
    }

    /// Fires due timers and settles finished transitions. Call once per host
    /// frame (or timer tick); between calls the view only accumulates state.
    pub fn advance(&mut self, now: Duration) {
        if self.torn_down {
            return;
        }
        if let Some(anim) = self.transform_anim {
            if anim.finished(now) {
                self.transform = anim.to;
                self.transform_anim = None;
            }
        }
        self.hover.advance(now);
        let duration = self.config.animation.duration;
        self.exiting
            .retain(|_, exit| progress(exit.started, duration, now) < 1.0);
    }

    /// The close affordance: queues [`ViewEvent::Dismissed`] and tears the
    /// engine down. What happens next is the host's business.
    pub fn request_close(&mut self) {
        if self.torn_down {
            return;
        }
        self.events.push_back(ViewEvent::Dismissed);
        self.teardown();
    }

    /// Cancels all pending timers and transitions and makes every input
    /// method inert. Idempotent; also run on drop.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.transform_anim = None;
        self.exiting.clear();
        self.hover.clear();
        self.pointer = PointerState::default();
        debug!("mindmap view torn down");
    }

    pub fn drain_events(&mut self) -> Vec<ViewEvent> {
        self.events.drain(..).collect()
    }

    pub(crate) fn push_event(&mut self, event: ViewEvent) {
        self.events.push_back(event);
    }

    pub(crate) fn commit_transform(&mut self, now: Duration) {
        if let Some(anim) = self.transform_anim.take() {
            self.transform = anim.at(now);
        }
    }

    pub(crate) fn animate_transform(
        &mut self,
        from: ZoomTransform,
        to: ZoomTransform,
        duration: Duration,
        now: Duration,
    ) {
        self.transform = to;
        self.transform_anim = Some(TransformTransition {
            from,
            to,
            started: now,
            duration,
        });
    }

    /// Full re-layout seeded for animation.
    ///
    /// Persisting nodes first get their current interpolated position written
    /// back as the tween start, so a pass that preempts an in-flight
    /// animation retargets smoothly instead of jumping. Nodes that left the
    /// visible set start shrinking toward the toggle origin's new position.
    pub(crate) fn relayout(&mut self, now: Duration, origin: Option<NodeId>) {
        let duration = self.config.animation.duration;
        let t = ease_cubic_in_out(progress(self.layout_started, duration, now));
        let orientation = self.config.layout.orientation;

        let mut origin_seed = None;
        for placed in &self.layout.nodes {
            let x = lerp(placed.prev_x, placed.x, t);
            let y = lerp(placed.prev_y, placed.y, t);
            let (primary, secondary) = orientation.unproject(x, y);
            if let Some(node) = self.state.node_mut(placed.id) {
                node.primary = primary;
                node.secondary = secondary;
            }
            if origin == Some(placed.id) {
                origin_seed = Some((primary, secondary));
            }
        }

        let previously_visible: Vec<NodeId> = self.layout.nodes.iter().map(|n| n.id).collect();
        let old_layout = std::mem::replace(&mut self.layout, MindmapLayout::empty());

        let seed = LayoutSeed {
            previously_visible,
            origin: origin_seed,
        };
        let new_layout = layout_mindmap(&mut self.state, &self.config, self.measurer.as_ref(), &seed);

        self.entering = new_layout
            .nodes
            .iter()
            .filter(|n| old_layout.node(n.id).is_none())
            .map(|n| n.id)
            .collect();

        let exit_to = origin
            .and_then(|id| new_layout.node(id))
            .or_else(|| new_layout.node(self.state.root()))
            .map_or((0.0, 0.0), |n| (n.x, n.y));

        for placed in &old_layout.nodes {
            if new_layout.node(placed.id).is_some() {
                continue;
            }
            let Some(node) = self.state.node(placed.id) else {
                continue;
            };
            self.exiting.insert(
                placed.id,
                ExitingNode {
                    id: placed.id,
                    depth: placed.depth,
                    role: placed.role,
                    label: node.name.clone(),
                    from_x: lerp(placed.prev_x, placed.x, t),
                    from_y: lerp(placed.prev_y, placed.y, t),
                    to_x: exit_to.0,
                    to_y: exit_to.1,
                    width: placed.width,
                    height: placed.height,
                    started: now,
                },
            );
        }
        for placed in &new_layout.nodes {
            self.exiting.swap_remove(&placed.id);
        }

        self.layout = new_layout;
        self.layout_started = now;
    }
}

impl Drop for MindmapView {
    fn drop(&mut self) {
        self.teardown();
    }
}
