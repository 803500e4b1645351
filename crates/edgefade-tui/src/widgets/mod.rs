pub mod edge_fade;
mod scroll_list;

pub use edge_fade::FadeOverlay;
pub use scroll_list::ScrollList;
