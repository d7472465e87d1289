//! Scroll-to-top button visibility

#[derive(Debug, Clone)]
pub struct ScrollTop {
    show_after_px: f64,
    visible: bool,
}

impl ScrollTop {
    pub fn new(show_after_px: f64) -> Self {
        Self {
            show_after_px,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Feed the current scroll offset. Returns the new visibility only when it
    /// changed, so the DOM is touched once per crossing.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<bool> {
        let visible = scroll_y > self.show_after_px;
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        Some(visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_crossings_only() {
        let mut st = ScrollTop::new(400.0);
        assert_eq!(st.on_scroll(0.0), None);
        assert_eq!(st.on_scroll(400.0), None);
        assert_eq!(st.on_scroll(401.0), Some(true));
        assert_eq!(st.on_scroll(900.0), None);
        assert!(st.is_visible());
        assert_eq!(st.on_scroll(10.0), Some(false));
        assert!(!st.is_visible());
    }
}
