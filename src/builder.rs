use std::time::Duration;

use crate::playback::{PlaybackController, DEFAULT_PERIOD};
use crate::registry::Family;
use crate::trace::Trace;
use crate::utils::default_period;

/// Configures a [`PlaybackController`] before use.
pub struct PlaybackBuilder<S> {
    period: Option<Duration>,
    trace: Option<Trace<S>>,
}

impl<S> Default for PlaybackBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> PlaybackBuilder<S> {
    pub fn new() -> Self {
        Self {
            period: None,
            trace: None,
        }
    }

    /// # Panics
    /// Panics if `period` is zero.
    pub fn with_period(mut self, period: Duration) -> Self {
        assert!(!period.is_zero(), "auto-advance period must be > 0");
        self.period = Some(period);
        self
    }

    /// Use the usual pace for `family`.
    pub fn for_family(self, family: Family) -> Self {
        self.with_period(default_period(family))
    }

    /// Load `trace` on build. An empty trace is ignored and the controller
    /// starts `Empty`.
    pub fn with_trace(mut self, trace: Trace<S>) -> Self {
        self.trace = Some(trace);
        self
    }

    pub fn build(self) -> PlaybackController<S> {
        let mut controller = PlaybackController::with_period(self.period.unwrap_or(DEFAULT_PERIOD));
        if let Some(trace) = self.trace {
            // Only `EmptyTrace` can fail here; the controller then stays empty.
            let _ = controller.load(trace);
        }
        controller
    }
}
