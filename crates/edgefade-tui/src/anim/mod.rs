//! Fade animation for the edge overlays
//!
//! # Layout
//!
//! - `easing` - Pure easing curves mapping [0, 1] to [0, 1]
//! - `timing` - Progress and interpolation helpers
//! - `animation` - Opacity animator combining the two
//!
//! # Usage
//!
//! ```ignore
//! use edgefade_tui::anim::OpacityAnimator;
//!
//! let mut animator = OpacityAnimator::new(config.duration(), config.curve);
//! animator.retarget(Opacity::Shown);
//!
//! // each frame
//! let opacity = animator.update();
//! ```

pub mod easing;
pub mod timing;

pub mod animation;

pub use animation::OpacityAnimator;
pub use easing::{EasingType, EasingTypeExt};
