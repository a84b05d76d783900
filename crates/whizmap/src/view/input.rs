use std::time::Duration;

use whizmap_core::geom::{self, Point};
use whizmap_core::{NodeId, Result, ToggleOutcome, ZoomTransform};
use whizmap_render::pan_for_viewport_drag;

use super::transition::{ease_cubic_in_out, lerp, progress};
use super::{MindmapView, ViewEvent};

/// Press-to-release travel below this many px counts as a click.
const CLICK_SLOP: f64 = 3.0;

impl MindmapView {
    pub fn pointer_pressed(&mut self, pos: Point, now: Duration) {
        if self.is_torn_down() {
            return;
        }
        self.commit_transform(now);
        self.pointer.press = Some(pos);
        self.pointer.last = pos;
    }

    pub fn pointer_moved(&mut self, pos: Point, now: Duration) {
        if self.is_torn_down() {
            return;
        }
        let prev = self.pointer.last;
        self.pointer.last = pos;

        let Some(press) = self.pointer.press else {
            self.update_hover(pos, now);
            return;
        };

        if !self.pointer.panning {
            let travel = ((pos.x - press.x).powi(2) + (pos.y - press.y).powi(2)).sqrt();
            if travel > CLICK_SLOP {
                self.pointer.panning = true;
            }
        }
        if self.pointer.panning && !self.hover.over_card {
            let delta = geom::vector(pos.x - prev.x, pos.y - prev.y);
            self.transform = self.transform.translated(delta);
        }
    }

    pub fn pointer_released(&mut self, pos: Point, now: Duration) {
        if self.is_torn_down() {
            return;
        }
        let was_panning = self.pointer.panning;
        self.pointer.press = None;
        self.pointer.panning = false;
        if was_panning {
            return;
        }
        if let Some(id) = self.hit_test(pos, now) {
            let _ = self.toggle_node(id, now);
        }
    }

    /// Wheel zoom about the cursor. Inert while the pointer is over the
    /// content card — that region captures wheel input exclusively.
    pub fn wheel(&mut self, delta_y: f64, pos: Point, now: Duration) {
        if self.is_torn_down() || self.hover.over_card {
            return;
        }
        self.commit_transform(now);
        let factor = (2.0_f64).powf(-delta_y * self.config().zoom.wheel_factor);
        self.transform = self.transform.scaled_about(factor, pos, &self.config().zoom);
    }

    pub fn zoom_in(&mut self, now: Duration) {
        self.step_zoom(self.config().zoom.step, now);
    }

    pub fn zoom_out(&mut self, now: Duration) {
        self.step_zoom(1.0 / self.config().zoom.step, now);
    }

    fn step_zoom(&mut self, factor: f64, now: Duration) {
        if self.is_torn_down() {
            return;
        }
        let from = self.transform_at(now);
        let center = geom::point(self.surface().width / 2.0, self.surface().height / 2.0);
        let to = from.scaled_about(factor, center, &self.config().zoom);
        let duration = self.config().zoom.step_duration;
        self.animate_transform(from, to, duration, now);
    }

    pub fn reset_zoom(&mut self, now: Duration) {
        if self.is_torn_down() {
            return;
        }
        let from = self.transform_at(now);
        let duration = self.config().zoom.reset_duration;
        self.animate_transform(from, ZoomTransform::IDENTITY, duration, now);
    }

    /// Drags the mini-map viewport rectangle so its top-left corner lands on
    /// `(x, y)` (mini-map coordinates); the main canvas pans to match.
    pub fn minimap_drag(&mut self, x: f64, y: f64, now: Duration) {
        if self.is_torn_down() {
            return;
        }
        let Some(bounds) = self.layout.bounds else {
            return;
        };
        let from = self.transform_at(now);
        let to = pan_for_viewport_drag(
            (x, y),
            &from,
            self.surface(),
            &bounds,
            &self.config().minimap,
        );
        let duration = self.config().minimap.pan_duration;
        self.animate_transform(from, to, duration, now);
    }

    /// Toggles a non-leaf node and re-lays out, seeding animations from the
    /// node's current on-screen position. Leaf ids (and calls after
    /// teardown) are no-ops reported as [`ToggleOutcome::Leaf`].
    pub fn toggle_node(&mut self, id: NodeId, now: Duration) -> Result<ToggleOutcome> {
        if self.is_torn_down() {
            return Ok(ToggleOutcome::Leaf);
        }
        let outcome = self.state_mut().toggle(id)?;
        if outcome != ToggleOutcome::Leaf {
            self.relayout(now, Some(id));
            self.push_event(ViewEvent::NodeToggled { id, outcome });
        }
        Ok(outcome)
    }

    /// Topmost node box under the screen point, honoring in-flight motion.
    pub fn hit_test(&self, pos: Point, now: Duration) -> Option<NodeId> {
        let world = self.transform_at(now).invert(pos);
        let anim = self.config().animation.duration;
        let t = ease_cubic_in_out(progress(self.layout_started, anim, now));

        let mut hit = None;
        for placed in &self.layout.nodes {
            let x = lerp(placed.prev_x, placed.x, t);
            let y = lerp(placed.prev_y, placed.y, t);
            let grow = if self.entering.contains(&placed.id) {
                t
            } else {
                1.0
            };
            let half_w = placed.width * grow / 2.0;
            let half_h = placed.height * grow / 2.0;
            if (world.x - x).abs() <= half_w && (world.y - y).abs() <= half_h {
                hit = Some(placed.id);
            }
        }
        hit
    }
}
