use std::time::Duration;

use whizmap_core::ZoomTransform;

/// Symmetric cubic easing: slow in, fast middle, slow out.
pub(crate) fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Raw progress of a transition started at `started`, clamped to [0, 1].
/// Zero-length transitions complete instantly.
pub(crate) fn progress(started: Duration, duration: Duration, now: Duration) -> f64 {
    if now <= started {
        return 0.0;
    }
    if duration.is_zero() {
        return 1.0;
    }
    ((now - started).as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

pub(crate) fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Animated view-transform change (discrete zoom step, reset, mini-map pan).
///
/// Start and end states are fixed when the transition is created; sampling
/// never recomputes them, so concurrent node transitions and a transform
/// transition cannot disagree about targets.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TransformTransition {
    pub from: ZoomTransform,
    pub to: ZoomTransform,
    pub started: Duration,
    pub duration: Duration,
}

impl TransformTransition {
    pub fn at(&self, now: Duration) -> ZoomTransform {
        let t = ease_cubic_in_out(progress(self.started, self.duration, now));
        self.from.lerp(&self.to, t)
    }

    pub fn finished(&self, now: Duration) -> bool {
        progress(self.started, self.duration, now) >= 1.0
    }
}
