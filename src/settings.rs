//! Landing page settings
//!
//! Embedded in the page as JSON (`<script id="grandhub-settings"
//! type="application/json">`). Every field is optional; missing or broken
//! settings fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Count-up animation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Default run length for counters without `data-duration`
    pub duration_ms: f64,
    /// Fraction of a counter that must be on screen before it starts
    pub visibility_threshold: f64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
        }
    }
}

/// Persisted "users joined" counter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialProofSettings {
    pub storage_key: String,
    /// Lowest value ever shown
    pub floor: u64,
    /// Per-visit increment is drawn from [0, max_step)
    pub max_step: u64,
}

impl Default for SocialProofSettings {
    fn default() -> Self {
        Self {
            storage_key: SOCIAL_PROOF_STORAGE_KEY.to_string(),
            floor: SOCIAL_PROOF_FLOOR,
            max_step: SOCIAL_PROOF_MAX_STEP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollTopSettings {
    /// Scroll offset (px) past which the button shows
    pub show_after_px: f64,
}

impl Default for ScrollTopSettings {
    fn default() -> Self {
        Self {
            show_after_px: SCROLL_TOP_SHOW_AFTER_PX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub animation: AnimationSettings,
    pub social_proof: SocialProofSettings,
    pub scroll_top: ScrollTopSettings,

    // === Accessibility ===
    /// Reduced motion (counters jump straight to their value)
    pub reduced_motion: bool,
}

impl Settings {
    /// Element holding the settings JSON
    pub const ELEMENT_ID: &'static str = "grandhub-settings";

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let t = self.animation.visibility_threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(SettingsError::Invalid {
                field: "animation.visibility_threshold",
                reason: format!("{} is outside [0, 1]", t),
            });
        }
        let d = self.animation.duration_ms;
        if !d.is_finite() || d < 0.0 {
            return Err(SettingsError::Invalid {
                field: "animation.duration_ms",
                reason: format!("{} is not a usable duration", d),
            });
        }
        if self.social_proof.storage_key.is_empty() {
            return Err(SettingsError::Invalid {
                field: "social_proof.storage_key",
                reason: "empty key".to_string(),
            });
        }
        Ok(())
    }

    /// Whether counters should animate at all (respects reduced_motion)
    pub fn effective_animation(&self) -> bool {
        !self.reduced_motion
    }

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        let Some(json) = json else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from page");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring page settings: {}", e);
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.animation.duration_ms, 1800.0);
        assert_eq!(s.social_proof.storage_key, "grandhub_user_count");
        assert_eq!(s.social_proof.floor, 150);
        assert_eq!(s.social_proof.max_step, 3);
        assert!(s.effective_animation());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let s = Settings::from_json(r#"{"social_proof": {"floor": 500}, "reduced_motion": true}"#)
            .unwrap();
        assert_eq!(s.social_proof.floor, 500);
        assert_eq!(s.social_proof.max_step, 3);
        assert_eq!(s.animation, AnimationSettings::default());
        assert!(!s.effective_animation());
    }

    #[test]
    fn test_empty_object() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let err = Settings::from_json(r#"{"animation": {"visibility_threshold": 1.5}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "animation.visibility_threshold",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_bad_duration() {
        let err = Settings::from_json(r#"{"animation": {"duration_ms": -1}}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "animation.duration_ms", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(SettingsError::Parse(_))
        ));
    }
}
