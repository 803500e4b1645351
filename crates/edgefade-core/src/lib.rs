pub mod config;
pub mod error;
pub mod scheduler;
pub mod source;
pub mod tracker;

pub use config::{AppConfig, EasingType, FadeConfig, ScrollDirection};
pub use error::{Error, Result};
pub use scheduler::FrameScheduler;
pub use source::{ScrollController, ScrollExtentSample, ScrollSource, SharedSource};
pub use tracker::{Edge, EdgeTargets, EdgeTracker, Opacity, ScrollContext};
