//! One-shot viewport visibility latch
//!
//! The host forwards intersection reports; the gate decides when the element
//! has been seen. After firing (or after the element goes away) it reports
//! that it no longer wants callbacks, and the host disconnects its observer.

/// A single intersection report for the observed element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Fraction of the element's area inside the viewport
    pub ratio: f64,
    pub is_intersecting: bool,
}

impl Intersection {
    pub fn new(ratio: f64, is_intersecting: bool) -> Self {
        Self {
            ratio,
            is_intersecting,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VisibilityGate {
    threshold: f64,
    fired: bool,
    attached: bool,
}

impl VisibilityGate {
    /// Attach with `threshold` (clamped to [0, 1]; NaN counts as 0).
    pub fn attach(threshold: f64) -> Self {
        let threshold = if threshold.is_nan() {
            0.0
        } else {
            threshold.clamp(0.0, 1.0)
        };
        Self {
            threshold,
            fired: false,
            attached: true,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Whether the host should keep delivering intersection reports
    pub fn is_observing(&self) -> bool {
        self.attached
    }

    /// Feed one report. Returns true exactly once: on the first report at or
    /// above the threshold. The gate detaches itself when it fires.
    pub fn observe(&mut self, entry: Intersection) -> bool {
        if !self.attached || self.fired {
            return false;
        }
        if entry.is_intersecting && entry.ratio >= self.threshold {
            self.fired = true;
            self.attached = false;
            log::debug!(
                "Visibility gate fired at ratio {:.2} (threshold {:.2})",
                entry.ratio,
                self.threshold
            );
            return true;
        }
        false
    }

    /// Element removed. Disposes the observation without firing.
    pub fn detach(&mut self) {
        self.attached = false;
    }
}
