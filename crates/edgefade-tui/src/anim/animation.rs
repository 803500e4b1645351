//! Opacity animation controller
//!
//! Moves one overlay's opacity toward its discrete target using the configured
//! duration and easing curve.

use std::time::{Duration, Instant};

use edgefade_core::Opacity;

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};

/// Active fade state
#[derive(Debug, Clone)]
struct ActiveFade {
    /// Fade start time
    start: Instant,
    /// Opacity at the start of the fade
    from: f64,
    /// Target opacity
    to: f64,
    /// Length of this fade
    duration: Duration,
}

/// Animates a single overlay toward 0 or 1
///
/// Call `retarget()` whenever the tracker produces a target, then `update()`
/// each frame to get the current interpolated opacity.
#[derive(Debug, Clone)]
pub struct OpacityAnimator {
    fade: Option<ActiveFade>,
    duration: Duration,
    easing: EasingType,
    target: Opacity,
    /// Current opacity (always up-to-date after `update`)
    current: f64,
}

impl OpacityAnimator {
    /// Create an animator resting at fully transparent
    pub fn new(duration: Duration, easing: EasingType) -> Self {
        Self {
            fade: None,
            duration,
            easing,
            target: Opacity::Hidden,
            current: 0.0,
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.fade.is_some()
    }

    pub fn target(&self) -> Opacity {
        self.target
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Jump to a target without animating
    pub fn set(&mut self, target: Opacity) {
        self.fade = None;
        self.target = target;
        self.current = target.as_f64();
    }

    /// Start fading toward `target`
    pub fn retarget(&mut self, target: Opacity) {
        self.retarget_at(target, Instant::now());
    }

    /// Start fading toward `target` as of `now`.
    ///
    /// The same target is a no-op so an in-flight fade keeps its timing. A new
    /// target starts from the current interpolated value.
    pub fn retarget_at(&mut self, target: Opacity, now: Instant) {
        if target == self.target {
            return;
        }
        self.target = target;
        let to = target.as_f64();

        if self.duration.is_zero() || self.current == to {
            self.fade = None;
            self.current = to;
            return;
        }

        // A partial fade covers less distance, so it gets less time
        let distance = (to - self.current).abs().min(1.0);
        self.fade = Some(ActiveFade {
            start: now,
            from: self.current,
            to,
            duration: self.duration.mul_f64(distance),
        });
        self.update_at(now);
    }

    /// Advance the animation and return the current opacity
    pub fn update(&mut self) -> f64 {
        self.update_at(Instant::now())
    }

    pub fn update_at(&mut self, now: Instant) -> f64 {
        if let Some(ref fade) = self.fade {
            if is_complete(fade.start, now, fade.duration) {
                self.current = fade.to;
                self.fade = None;
            } else {
                let t = progress(fade.start, now, fade.duration);
                let eased_t = self.easing.apply(t);
                self.current = lerp(fade.from, fade.to, eased_t);
            }
        }
        self.current
    }
}
