pub mod anim;
pub mod app;
pub mod event;
pub mod input;
pub mod shadow;
pub mod theme;
pub mod widgets;

pub use app::{DemoApp, SourceMode};
pub use shadow::ScrollShadow;
pub use theme::Theme;
