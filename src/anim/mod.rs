//! View-triggered counter animation
//!
//! Everything in here is pure and deterministic:
//! - Time comes in as frame timestamps (ms), never read from a clock
//! - No DOM, storage or platform dependencies
//! - One run per display; no restarts

pub mod count_up;
pub mod counter;
pub mod easing;
pub mod props;
pub mod visibility;

pub use count_up::{AnimPhase, CountUp, Frame, Frames};
pub use counter::AnimatedCounter;
pub use easing::ease_out_expo;
pub use props::CounterProps;
pub use visibility::{Intersection, VisibilityGate};
