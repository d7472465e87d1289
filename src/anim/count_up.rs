//! Count-up run state machine
//!
//! Pure and clock-agnostic: the host feeds frame timestamps in, displayed
//! integers come out. No DOM or timer dependencies live here.

use serde::{Deserialize, Serialize};

use super::easing::ease_out_expo;
use crate::error::AnimError;

/// Lifecycle of a single count-up display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimPhase {
    /// Waiting for the visibility signal
    Idle,
    /// Started; the next frame stamps the start time
    Armed,
    /// Frames are being produced
    Animating,
    /// Final value emitted
    Done,
    /// Host element torn down before the run finished
    Cancelled,
}

/// One displayed value, plus whether another frame should be scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub value: u64,
    pub more: bool,
}

/// Animates a displayed integer from 0 to `target` over `duration_ms`.
///
/// One run per instance: once `Done` or `Cancelled` the animator stays there.
#[derive(Debug, Clone)]
pub struct CountUp {
    target: u64,
    duration_ms: f64,
    start_ms: Option<f64>,
    current: u64,
    phase: AnimPhase,
}

impl CountUp {
    pub fn new(target: u64, duration_ms: f64) -> Self {
        Self {
            target,
            duration_ms,
            start_ms: None,
            current: 0,
            phase: AnimPhase::Idle,
        }
    }

    pub fn phase(&self) -> AnimPhase {
        self.phase
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Last emitted value (0 before the first frame)
    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, AnimPhase::Armed | AnimPhase::Animating)
    }

    /// Arm the run. Starting anything but an idle animator is an error;
    /// the running animation is left untouched.
    pub fn start(&mut self) -> Result<(), AnimError> {
        if self.phase != AnimPhase::Idle {
            return Err(AnimError::AlreadyStarted { phase: self.phase });
        }
        self.phase = AnimPhase::Armed;
        Ok(())
    }

    /// Normalized progress at `now_ms`, clamped to [0, 1].
    ///
    /// A zero, negative or non-finite duration counts as already finished.
    pub fn progress_at(&self, now_ms: f64) -> f64 {
        let Some(start) = self.start_ms else {
            return 0.0;
        };
        if !(self.duration_ms.is_finite() && self.duration_ms > 0.0) {
            return 1.0;
        }
        let p = (now_ms - start) / self.duration_ms;
        if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
    }

    /// Advance to the frame at `now_ms`.
    ///
    /// Returns `None` when there is nothing to display (not started, or the
    /// run is over), so a host loop can simply stop rescheduling.
    pub fn tick(&mut self, now_ms: f64) -> Option<Frame> {
        match self.phase {
            AnimPhase::Idle | AnimPhase::Done | AnimPhase::Cancelled => return None,
            AnimPhase::Armed => {
                self.start_ms = Some(now_ms);
                self.phase = AnimPhase::Animating;
            }
            AnimPhase::Animating => {}
        }

        let progress = self.progress_at(now_ms);
        let value = if progress >= 1.0 {
            self.target
        } else {
            let eased = ease_out_expo(progress);
            ((eased * self.target as f64).round() as u64).min(self.target)
        };

        // Clock jitter can step backwards; the display must not
        self.current = self.current.max(value);

        let more = progress < 1.0;
        if !more {
            self.phase = AnimPhase::Done;
        }
        Some(Frame {
            value: self.current,
            more,
        })
    }

    /// Jump straight to the target. Used when frame scheduling is
    /// unavailable or reduced motion is requested.
    pub fn skip_to_end(&mut self) -> Option<Frame> {
        if !self.is_running() {
            return None;
        }
        self.current = self.target;
        self.phase = AnimPhase::Done;
        Some(Frame {
            value: self.target,
            more: false,
        })
    }

    /// Tear down. Returns true if a pending or active run was abandoned.
    pub fn cancel(&mut self) -> bool {
        match self.phase {
            AnimPhase::Idle | AnimPhase::Armed | AnimPhase::Animating => {
                self.phase = AnimPhase::Cancelled;
                true
            }
            AnimPhase::Done | AnimPhase::Cancelled => false,
        }
    }

    /// Lazy display sequence against a fixed-step clock.
    ///
    /// An idle animator is started first. A non-positive step jumps to the
    /// end in a single frame.
    pub fn frames(mut self, start_ms: f64, step_ms: f64) -> Frames {
        if self.phase == AnimPhase::Idle {
            // Cannot fail from Idle
            let _ = self.start();
        }
        Frames {
            anim: self,
            now_ms: start_ms,
            step_ms,
        }
    }
}

/// Iterator returned by [`CountUp::frames`]
#[derive(Debug, Clone)]
pub struct Frames {
    anim: CountUp,
    now_ms: f64,
    step_ms: f64,
}

impl Iterator for Frames {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if !(self.step_ms.is_finite() && self.step_ms > 0.0) {
            return self.anim.skip_to_end().map(|f| f.value);
        }
        let frame = self.anim.tick(self.now_ms)?;
        self.now_ms += self.step_ms;
        Some(frame.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[test]
    fn test_idle_never_emits() {
        let mut anim = CountUp::new(1000, 1800.0);
        assert_eq!(anim.tick(0.0), None);
        assert_eq!(anim.tick(5000.0), None);
        assert_eq!(anim.current(), 0);
        assert_eq!(anim.phase(), AnimPhase::Idle);
    }

    #[test]
    fn test_first_tick_stamps_start() {
        let mut anim = CountUp::new(1000, 1800.0);
        anim.start().unwrap();
        assert_eq!(anim.phase(), AnimPhase::Armed);

        // Start time is the first frame, not wall-clock zero
        let f = anim.tick(10_000.0).unwrap();
        assert_eq!(f, Frame { value: 0, more: true });
        assert_eq!(anim.phase(), AnimPhase::Animating);

        let f = anim.tick(10_900.0).unwrap();
        let expected = (ease_out_expo(0.5) * 1000.0).round() as u64;
        assert_eq!(f.value, expected);
        assert!(f.more);
    }

    #[test]
    fn test_reaches_target_after_duration() {
        let mut anim = CountUp::new(1000, 1800.0);
        anim.start().unwrap();
        anim.tick(0.0);
        anim.tick(900.0);
        let f = anim.tick(1800.0).unwrap();
        assert_eq!(f, Frame { value: 1000, more: false });
        assert_eq!(anim.phase(), AnimPhase::Done);
        assert_eq!(anim.tick(2000.0), None);
        assert_eq!(anim.current(), 1000);
    }

    #[test]
    fn test_double_start_rejected() {
        let mut anim = CountUp::new(10, 100.0);
        anim.start().unwrap();
        anim.tick(0.0);
        let err = anim.start().unwrap_err();
        assert_eq!(
            err,
            AnimError::AlreadyStarted {
                phase: AnimPhase::Animating
            }
        );
        // The run in flight is unaffected
        assert_eq!(anim.phase(), AnimPhase::Animating);

        anim.tick(100.0);
        assert!(anim.start().is_err(), "finished runs are not restartable");
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut anim = CountUp::new(42, 0.0);
        anim.start().unwrap();
        assert_eq!(anim.tick(5.0), Some(Frame { value: 42, more: false }));
    }

    #[test]
    fn test_backwards_clock_does_not_decrease() {
        let mut anim = CountUp::new(500, 1000.0);
        anim.start().unwrap();
        anim.tick(0.0);
        let ahead = anim.tick(600.0).unwrap().value;
        let behind = anim.tick(300.0).unwrap().value;
        assert_eq!(behind, ahead);
    }

    #[test]
    fn test_cancel_stops_frames() {
        let mut anim = CountUp::new(100, 1000.0);
        anim.start().unwrap();
        anim.tick(0.0);
        assert!(anim.cancel());
        assert_eq!(anim.phase(), AnimPhase::Cancelled);
        assert_eq!(anim.tick(500.0), None);
        assert!(!anim.cancel());
    }

    #[test]
    fn test_skip_to_end() {
        let mut anim = CountUp::new(77, 1800.0);
        assert_eq!(anim.skip_to_end(), None, "idle display stays at 0");
        anim.start().unwrap();
        assert_eq!(anim.skip_to_end(), Some(Frame { value: 77, more: false }));
        assert_eq!(anim.phase(), AnimPhase::Done);
    }

    #[test]
    fn test_frames_simulated_clock() {
        let values: Vec<u64> = CountUp::new(1000, 1800.0).frames(0.0, FRAME_MS).collect();
        assert_eq!(values.first(), Some(&0));
        assert_eq!(values.last(), Some(&1000));
        // 1800ms at 60fps, plus the initial frame
        assert!((108..=110).contains(&values.len()), "got {}", values.len());
    }

    #[test]
    fn test_frames_zero_target() {
        let values: Vec<u64> = CountUp::new(0, 500.0).frames(0.0, 100.0).collect();
        assert!(values.iter().all(|&v| v == 0));
        assert_eq!(values.len(), 6);
    }

    #[test]
    fn test_frames_bad_step() {
        let values: Vec<u64> = CountUp::new(9, 500.0).frames(0.0, 0.0).collect();
        assert_eq!(values, vec![9]);
    }

    proptest! {
        #[test]
        fn prop_final_value_is_target(
            target in 0u64..10_000_000,
            duration in 1.0f64..10_000.0,
            step in 1.0f64..250.0,
        ) {
            let last = CountUp::new(target, duration).frames(0.0, step).last();
            prop_assert_eq!(last, Some(target));
        }

        #[test]
        fn prop_sequence_non_decreasing(
            target in 0u64..1_000_000,
            duration in 1.0f64..5_000.0,
            step in 1.0f64..100.0,
        ) {
            let values: Vec<u64> = CountUp::new(target, duration).frames(0.0, step).collect();
            prop_assert!(values.windows(2).all(|w| w[0] <= w[1]));
            prop_assert!(values.iter().all(|&v| v <= target));
        }
    }
}
