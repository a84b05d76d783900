use serde::{Deserialize, Serialize};

use crate::config::ZoomConfig;
use crate::geom::{self, Point, Transform, Vector};

/// Affine view transform: uniform scale `k` plus translation `(x, y)`.
///
/// Screen = world · k + (x, y). The translation is in screen px, matching the
/// convention of the usual pan/zoom behaviors, so panning adds screen deltas
/// directly and zooming about a screen point is a fixed-point computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        self.k == 1.0 && self.x == 0.0 && self.y == 0.0
    }

    /// World → screen.
    pub fn apply(&self, p: Point) -> Point {
        geom::point(p.x * self.k + self.x, p.y * self.k + self.y)
    }

    /// Screen → world.
    pub fn invert(&self, p: Point) -> Point {
        geom::point((p.x - self.x) / self.k, (p.y - self.y) / self.k)
    }

    /// Pans by a screen-space delta.
    pub fn translated(&self, delta: Vector) -> Self {
        Self {
            k: self.k,
            x: self.x + delta.x,
            y: self.y + delta.y,
        }
    }

    /// Rescales by `factor`, keeping the screen point `center` fixed.
    ///
    /// The scale is clamped to the configured extent; the translation is
    /// recomputed from the clamped value, so repeated steps at the boundary
    /// are exact no-ops instead of drifting the pan.
    pub fn scaled_about(&self, factor: f64, center: Point, config: &ZoomConfig) -> Self {
        let k = (self.k * factor).clamp(config.min_scale, config.max_scale);
        let ratio = k / self.k;
        Self {
            k,
            x: center.x - (center.x - self.x) * ratio,
            y: center.y - (center.y - self.y) * ratio,
        }
    }

    /// Linear blend between two transforms, for animated transitions.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            k: self.k + (other.k - self.k) * t,
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    pub fn to_transform(&self) -> Transform {
        Transform::scale(self.k, self.k).then_translate(geom::vector(self.x, self.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_and_invert_round_trip() {
        let t = ZoomTransform {
            k: 2.5,
            x: -40.0,
            y: 12.0,
        };
        let p = geom::point(17.0, -3.0);
        let back = t.invert(t.apply(p));
        assert!((back.x - p.x).abs() < 1e-12);
        assert!((back.y - p.y).abs() < 1e-12);
    }

    #[test]
    fn scaled_about_keeps_center_fixed() {
        let config = ZoomConfig::default();
        let t = ZoomTransform {
            k: 1.0,
            x: 30.0,
            y: 30.0,
        };
        let center = geom::point(100.0, 80.0);
        let zoomed = t.scaled_about(1.2, center, &config);
        let before = t.invert(center);
        let after = zoomed.invert(center);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn scale_is_clamped_to_the_extent() {
        let config = ZoomConfig::default();
        let mut t = ZoomTransform::IDENTITY;
        for _ in 0..50 {
            t = t.scaled_about(0.5, geom::point(0.0, 0.0), &config);
        }
        assert_eq!(t.k, config.min_scale);
        for _ in 0..50 {
            t = t.scaled_about(3.0, geom::point(0.0, 0.0), &config);
        }
        assert_eq!(t.k, config.max_scale);
    }
}
