//! Animated counter: visibility gate driving a count-up run
//!
//! Host-agnostic. The browser glue forwards intersection reports, frame
//! timestamps and unmount; this type says what to show and whether to keep
//! scheduling.

use super::count_up::{AnimPhase, CountUp, Frame};
use super::props::CounterProps;
use super::visibility::{Intersection, VisibilityGate};

#[derive(Debug, Clone)]
pub struct AnimatedCounter {
    props: CounterProps,
    gate: VisibilityGate,
    anim: CountUp,
}

impl AnimatedCounter {
    pub fn new(props: CounterProps, threshold: f64) -> Self {
        let anim = CountUp::new(props.value, props.duration_ms);
        Self {
            props,
            gate: VisibilityGate::attach(threshold),
            anim,
        }
    }

    pub fn props(&self) -> &CounterProps {
        &self.props
    }

    pub fn gate(&self) -> &VisibilityGate {
        &self.gate
    }

    pub fn phase(&self) -> AnimPhase {
        self.anim.phase()
    }

    /// Forward an intersection report. Returns true when the run was just
    /// started and the host should request its first frame.
    pub fn on_intersection(&mut self, entry: Intersection) -> bool {
        if !self.gate.observe(entry) {
            return false;
        }
        match self.anim.start() {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Ignoring second start: {}", e);
                false
            }
        }
    }

    /// Advance to the frame at `now_ms`.
    pub fn on_frame(&mut self, now_ms: f64) -> Option<Frame> {
        self.anim.tick(now_ms)
    }

    /// Show the target immediately (no frame clock, or reduced motion).
    pub fn finish_now(&mut self) -> Option<Frame> {
        self.anim.skip_to_end()
    }

    /// Element torn down: stop observing and abandon any run.
    /// Returns true if a pending or active run was cancelled.
    pub fn unmount(&mut self) -> bool {
        self.gate.detach();
        self.anim.cancel()
    }

    /// Page hidden. A page kept in the back/forward cache can come back, so
    /// only a real unload tears the counter down. Returns true when the host
    /// should release its observer and frame callback.
    pub fn on_page_hide(&mut self, persisted: bool) -> bool {
        if persisted {
            return false;
        }
        self.unmount();
        true
    }

    /// Current display text, including prefix and suffix
    pub fn text(&self) -> String {
        self.props.render(self.anim.current())
    }
}
