//! GrandHub landing page counters
//!
//! Core modules:
//! - `anim`: View-triggered count-up animation (easing, visibility gate, run state)
//! - `persistence`: Client-local store and the persisted social-proof counter
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Page-embedded configuration
//! - `ui`: Scroll-to-top and glow-hover card helpers

pub mod anim;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod ui;

pub use anim::{AnimatedCounter, CountUp, CounterProps, VisibilityGate, ease_out_expo};
pub use error::{AnimError, PropsError, SettingsError, StoreError};
pub use persistence::{KeyValueStore, MemoryStore, PersistentCounterStore};
pub use settings::Settings;

/// Landing page defaults
pub mod consts {
    /// Count-up run length
    pub const DEFAULT_DURATION_MS: f64 = 1800.0;
    /// Fraction of a counter that must be visible before it starts
    pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.3;

    /// Social-proof counter
    pub const SOCIAL_PROOF_STORAGE_KEY: &str = "grandhub_user_count";
    pub const SOCIAL_PROOF_FLOOR: u64 = 150;
    pub const SOCIAL_PROOF_MAX_STEP: u64 = 3;

    /// Scroll offset (px) before the scroll-to-top button appears
    pub const SCROLL_TOP_SHOW_AFTER_PX: f64 = 400.0;
}
