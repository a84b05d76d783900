use std::time::Duration;

use whizmap_core::NodeId;
use whizmap_core::geom::Point;

use super::MindmapView;
use super::scene::{CardModel, Overlay, TooltipModel};

/// Combined hover state over {node, card}, owned by the view instance.
///
/// Dismissal is debounced: leaving either surface schedules a deadline,
/// re-entering either cancels it. The deadline only fires from `advance`,
/// so it is trivially cancellable and dies with the view.
#[derive(Debug, Clone, Default)]
pub(crate) struct HoverState {
    pub(crate) over_node: Option<NodeId>,
    pub(crate) over_card: bool,
    pub(crate) overlay: Overlay,
    pub(crate) hide_at: Option<Duration>,
}

impl HoverState {
    pub(crate) fn cancel_hide(&mut self) {
        self.hide_at = None;
    }

    pub(crate) fn schedule_hide(&mut self, at: Duration) {
        self.hide_at = Some(at);
    }

    pub(crate) fn advance(&mut self, now: Duration) {
        if self.hide_at.is_some_and(|at| now >= at) {
            self.overlay = Overlay::None;
            self.hide_at = None;
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

impl MindmapView {
    pub(crate) fn update_hover(&mut self, pos: Point, now: Duration) {
        // The card captures hover exclusively while the pointer is inside it.
        if let Overlay::Card(card) = &self.hover.overlay {
            if card.contains(pos.x, pos.y) {
                self.hover.over_card = true;
                self.hover.over_node = None;
                self.hover.cancel_hide();
                return;
            }
        }
        let left_card = std::mem::replace(&mut self.hover.over_card, false);

        match self.hit_test(pos, now) {
            Some(id) => {
                self.hover.over_node = Some(id);
                self.hover.cancel_hide();
                self.hover.overlay = self.build_overlay(id, pos);
            }
            None => {
                if self.hover.over_node.take().is_some() {
                    let at = now + self.config().hover.node_leave_delay;
                    self.hover.schedule_hide(at);
                } else if left_card {
                    let at = now + self.config().hover.card_leave_delay;
                    self.hover.schedule_hide(at);
                }
            }
        }
    }

    fn build_overlay(&self, id: NodeId, pos: Point) -> Overlay {
        let Some(node) = self.state().node(id) else {
            return Overlay::None;
        };
        let hover = &self.config().hover;

        match node.content.as_deref().filter(|c| !c.is_empty()) {
            Some(content) => {
                // Keep the card inside the surface's right edge by flipping
                // it to the left of the cursor when space runs out.
                let width = hover.card_width;
                let flip_edge = self.surface().width - width - 20.0;
                let mut x = pos.x + hover.card_offset_x;
                if x > flip_edge {
                    x = pos.x - width - hover.card_offset_x;
                }
                Overlay::Card(CardModel {
                    x,
                    y: pos.y + hover.card_offset_y,
                    width,
                    height: self.estimate_card_height(content),
                    name: node.name.clone(),
                    content: content.to_string(),
                })
            }
            None => Overlay::Tooltip(TooltipModel {
                x: pos.x + hover.tooltip_offset_x,
                y: pos.y + hover.tooltip_offset_y,
                name: node.name.clone(),
                depth: node.depth,
                child_count: node.child_count(),
            }),
        }
    }

    /// Header plus the wrapped body at a nominal 16 px line height. Only the
    /// card's hit region depends on this; hosts lay the real text out.
    fn estimate_card_height(&self, content: &str) -> f64 {
        let advance = self.measurer.advance(content);
        let wrap = (self.config().hover.card_width - 24.0).max(1.0);
        let lines = (advance / wrap).ceil().max(1.0);
        40.0 + lines * 16.0
    }
}
