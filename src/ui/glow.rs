//! Glow-hover card pointer tracking
//!
//! The card's CSS draws a radial glow centred on `--glow-x` / `--glow-y`.

/// Card bounds in client coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Glow centre as percentages of the card, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowPosition {
    pub x_pct: f64,
    pub y_pct: f64,
}

impl GlowPosition {
    pub const CENTER: GlowPosition = GlowPosition {
        x_pct: 50.0,
        y_pct: 50.0,
    };

    /// CSS custom properties as (name, value) pairs
    pub fn css_vars(&self) -> [(&'static str, String); 2] {
        [
            ("--glow-x", format!("{:.1}%", self.x_pct)),
            ("--glow-y", format!("{:.1}%", self.y_pct)),
        ]
    }
}

/// Map a pointer at (`client_x`, `client_y`) onto the card.
///
/// Zero-sized cards (not laid out yet) get the centre.
pub fn glow_position(rect: Rect, client_x: f64, client_y: f64) -> GlowPosition {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return GlowPosition::CENTER;
    }
    let pct = |offset: f64, size: f64| ((offset / size) * 100.0).clamp(0.0, 100.0);
    GlowPosition {
        x_pct: pct(client_x - rect.left, rect.width),
        y_pct: pct(client_y - rect.top, rect.height),
    }
}
