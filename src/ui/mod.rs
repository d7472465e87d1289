//! Small landing page interactions that sit next to the counters

pub mod glow;
pub mod scroll_top;

pub use glow::{GlowPosition, Rect, glow_position};
pub use scroll_top::ScrollTop;
