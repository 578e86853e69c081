//! Playback controller: a transport state machine over one trace.
//!
//! The controller never spawns timers of its own. `play` hands out a
//! [`TickToken`] naming the live auto-advance schedule and the host calls
//! [`PlaybackController::on_tick`] with it, or feeds wall time through
//! [`PlaybackController::advance`]. Every transition that pauses, steps,
//! replaces or discards the trace cancels the live token, so ticks scheduled
//! before that point are recognised as stale and ignored.
//!
//! ```text
//! Empty ──load/run──▶ Ready ──play──▶ Playing ◀──play── Paused
//!                                        │  └──pause──────▲
//!                                        └─last step──▶ Complete ──play──▶ Playing (from 0)
//! ```

use std::time::Duration;

use serde::Serialize;

use crate::error::{Error, PlaybackError};
use crate::registry::{AlgorithmArgs, AlgorithmDescriptor, AlgorithmOutput};
use crate::step::Step;
use crate::trace::{StepRecord, Trace};

/// Period used when none is configured.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// No trace loaded.
    Empty,
    /// Trace loaded, positioned at step 0, never played.
    Ready,
    Playing,
    Paused,
    /// Positioned at the last step.
    Complete,
}

/// Handle of one auto-advance schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Moved one step forward and keeps playing.
    Advanced,
    /// Moved onto the last step; playback stopped.
    Completed,
    /// The token is not the live schedule; nothing changed.
    Stale,
}

/// What a viewer renders.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Frame<'a, S> {
    pub step: &'a StepRecord<S>,
    pub position: usize,
    pub total: usize,
    pub playing: bool,
}

/// Owns one trace and a cursor into it.
#[derive(Debug)]
pub struct PlaybackController<S = Step> {
    trace: Option<Trace<S>>,
    position: usize,
    state: PlaybackState,
    period: Duration,
    timer: Option<TickToken>,
    issued: u64,
    /// Host time accumulated towards the next tick.
    pending: Duration,
}

impl<S> Default for PlaybackController<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> PlaybackController<S> {
    pub fn new() -> Self {
        Self::with_period(DEFAULT_PERIOD)
    }

    /// # Panics
    /// Panics if `period` is zero.
    pub fn with_period(period: Duration) -> Self {
        assert!(!period.is_zero(), "auto-advance period must be > 0");
        Self {
            trace: None,
            position: 0,
            state: PlaybackState::Empty,
            period,
            timer: None,
            issued: 0,
            pending: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Current index, `None` while empty.
    pub fn position(&self) -> Option<usize> {
        self.trace.as_ref().map(|_| self.position)
    }

    pub fn total_steps(&self) -> usize {
        self.trace.as_ref().map_or(0, Trace::len)
    }

    pub fn trace(&self) -> Option<&Trace<S>> {
        self.trace.as_ref()
    }

    /// The live auto-advance handle, if playing.
    pub fn live_token(&self) -> Option<TickToken> {
        self.timer
    }

    pub fn frame(&self) -> Option<Frame<'_, S>> {
        let trace = self.trace.as_ref()?;
        Some(Frame {
            step: trace.get(self.position)?,
            position: self.position,
            total: trace.len(),
            playing: self.is_playing(),
        })
    }

    /// Replace whatever is loaded with `trace`, positioned at step 0.
    pub fn load(&mut self, trace: Trace<S>) -> Result<(), PlaybackError> {
        if trace.is_empty() {
            return Err(PlaybackError::EmptyTrace);
        }
        self.cancel_timer();
        self.trace = Some(trace);
        self.position = 0;
        self.transition(PlaybackState::Ready);
        Ok(())
    }

    /// Start or resume auto-advance and return its handle.
    ///
    /// From `Complete` (or when parked on the last step) playback restarts at
    /// step 0. A one-step trace goes straight to `Complete` and no handle is
    /// issued.
    pub fn play(&mut self) -> Result<Option<TickToken>, PlaybackError> {
        let last = self.last_index()?;
        if self.state == PlaybackState::Playing {
            return Ok(self.timer);
        }
        if self.state == PlaybackState::Complete || self.position == last {
            self.position = 0;
        }
        self.cancel_timer();
        if last == 0 {
            self.transition(PlaybackState::Complete);
            return Ok(None);
        }
        self.issued += 1;
        let token = TickToken(self.issued);
        self.timer = Some(token);
        self.transition(PlaybackState::Playing);
        Ok(Some(token))
    }

    pub fn pause(&mut self) -> Result<(), PlaybackError> {
        self.last_index()?;
        if self.state == PlaybackState::Playing {
            self.cancel_timer();
            self.transition(PlaybackState::Paused);
        }
        Ok(())
    }

    /// Move one step forward (clamped) and pause.
    pub fn step_forward(&mut self) -> Result<usize, PlaybackError> {
        let last = self.last_index()?;
        self.seek((self.position + 1).min(last), last)
    }

    /// Move one step back (clamped) and pause.
    pub fn step_back(&mut self) -> Result<usize, PlaybackError> {
        let last = self.last_index()?;
        self.seek(self.position.saturating_sub(1), last)
    }

    /// Drop the trace and return to `Empty`.
    pub fn reset(&mut self) {
        self.cancel_timer();
        self.trace = None;
        self.position = 0;
        self.transition(PlaybackState::Empty);
    }

    /// Deliver one auto-advance tick scheduled under `token`.
    pub fn on_tick(&mut self, token: TickToken) -> TickOutcome {
        if self.timer != Some(token) || self.state != PlaybackState::Playing {
            #[cfg(feature = "tracing")]
            tracing::trace!(?token, "stale tick ignored");
            return TickOutcome::Stale;
        }
        let last = self.total_steps().saturating_sub(1);
        self.position = (self.position + 1).min(last);
        if self.position == last {
            self.cancel_timer();
            self.transition(PlaybackState::Complete);
            TickOutcome::Completed
        } else {
            TickOutcome::Advanced
        }
    }

    /// Feed host time; fires one tick per whole elapsed period while playing.
    /// Returns the number of steps advanced.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let Some(token) = self.timer else {
            return 0;
        };
        self.pending += elapsed;
        let mut moved = 0;
        while self.pending >= self.period {
            self.pending -= self.period;
            match self.on_tick(token) {
                TickOutcome::Advanced => moved += 1,
                TickOutcome::Completed => return moved + 1,
                TickOutcome::Stale => break,
            }
        }
        moved
    }

    fn last_index(&self) -> Result<usize, PlaybackError> {
        match &self.trace {
            Some(trace) => Ok(trace.len() - 1),
            None => Err(PlaybackError::NoTrace),
        }
    }

    fn seek(&mut self, position: usize, last: usize) -> Result<usize, PlaybackError> {
        self.cancel_timer();
        self.position = position;
        let next = if position == last {
            PlaybackState::Complete
        } else {
            PlaybackState::Paused
        };
        self.transition(next);
        Ok(position)
    }

    fn cancel_timer(&mut self) {
        self.timer = None;
        self.pending = Duration::ZERO;
    }

    fn transition(&mut self, to: PlaybackState) {
        #[cfg(feature = "tracing")]
        tracing::debug!(from = ?self.state, to = ?to, position = self.position, "playback");
        self.state = to;
    }
}

impl PlaybackController<Step> {
    /// Run `descriptor` on `args` and load the resulting trace.
    ///
    /// Any pending auto-advance is cancelled first. If the arguments are
    /// rejected the controller ends up `Empty`.
    pub fn run(
        &mut self,
        descriptor: &AlgorithmDescriptor,
        args: &AlgorithmArgs,
    ) -> Result<AlgorithmOutput, Error> {
        self.cancel_timer();
        match descriptor.run(args) {
            Ok(run) => {
                self.load(run.trace)?;
                Ok(run.output)
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(algorithm = descriptor.key, error = %err, "run rejected");
                self.reset();
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Recorder;

    fn trace_of(len: usize) -> Trace<usize> {
        let mut rec = Recorder::new();
        for i in 0..len {
            rec.record(format!("step {i}"), i);
        }
        rec.finish()
    }

    fn loaded(len: usize) -> PlaybackController<usize> {
        let mut c = PlaybackController::new();
        c.load(trace_of(len)).unwrap();
        c
    }

    #[test]
    fn starts_empty() {
        let mut c: PlaybackController<usize> = PlaybackController::new();
        assert_eq!(c.state(), PlaybackState::Empty);
        assert_eq!(c.position(), None);
        assert!(c.frame().is_none());
        assert_eq!(c.play(), Err(PlaybackError::NoTrace));
        assert_eq!(c.step_forward(), Err(PlaybackError::NoTrace));
        assert_eq!(c.pause(), Err(PlaybackError::NoTrace));
    }

    #[test]
    fn load_rejects_empty_trace() {
        let mut c = PlaybackController::new();
        assert_eq!(c.load(trace_of(0)), Err(PlaybackError::EmptyTrace));
        assert_eq!(c.state(), PlaybackState::Empty);
    }

    #[test]
    fn load_positions_at_zero() {
        let c = loaded(3);
        assert_eq!(c.state(), PlaybackState::Ready);
        let frame = c.frame().unwrap();
        assert_eq!((frame.position, frame.total, frame.playing), (0, 3, false));
        assert_eq!(frame.step.narration, "step 0");
    }

    #[test]
    fn ticks_play_to_completion() {
        let mut c = loaded(3);
        let token = c.play().unwrap().unwrap();
        assert!(c.is_playing());
        assert_eq!(c.on_tick(token), TickOutcome::Advanced);
        assert_eq!(c.on_tick(token), TickOutcome::Completed);
        assert_eq!(c.state(), PlaybackState::Complete);
        assert_eq!(c.position(), Some(2));
        assert_eq!(c.on_tick(token), TickOutcome::Stale);
    }

    #[test]
    fn pause_cancels_the_live_token() {
        let mut c = loaded(4);
        let token = c.play().unwrap().unwrap();
        c.pause().unwrap();
        assert_eq!(c.state(), PlaybackState::Paused);
        assert_eq!(c.on_tick(token), TickOutcome::Stale);
        assert_eq!(c.position(), Some(0));

        let resumed = c.play().unwrap().unwrap();
        assert_ne!(resumed, token);
        assert_eq!(c.on_tick(resumed), TickOutcome::Advanced);
    }

    #[test]
    fn stepping_pauses_and_clamps() {
        let mut c = loaded(3);
        c.play().unwrap();
        assert_eq!(c.step_back(), Ok(0));
        assert_eq!(c.state(), PlaybackState::Paused);
        assert_eq!(c.step_forward(), Ok(1));
        assert_eq!(c.step_forward(), Ok(2));
        assert_eq!(c.state(), PlaybackState::Complete);
        assert_eq!(c.step_forward(), Ok(2));
        assert_eq!(c.step_back(), Ok(1));
        assert_eq!(c.state(), PlaybackState::Paused);
    }

    #[test]
    fn play_from_complete_restarts() {
        let mut c = loaded(2);
        c.step_forward().unwrap();
        assert_eq!(c.state(), PlaybackState::Complete);
        c.play().unwrap();
        assert_eq!(c.position(), Some(0));
        assert!(c.is_playing());
    }

    #[test]
    fn single_step_trace_completes_immediately() {
        let mut c = loaded(1);
        assert_eq!(c.play(), Ok(None));
        assert_eq!(c.state(), PlaybackState::Complete);
    }

    #[test]
    fn advance_fires_per_period() {
        let mut c: PlaybackController<usize> = PlaybackController::with_period(Duration::from_millis(100));
        c.load(trace_of(5)).unwrap();
        assert_eq!(c.advance(Duration::from_millis(500)), 0);
        c.play().unwrap();
        assert_eq!(c.advance(Duration::from_millis(250)), 2);
        assert_eq!(c.advance(Duration::from_millis(40)), 0);
        assert_eq!(c.advance(Duration::from_millis(60)), 1);
        assert_eq!(c.advance(Duration::from_secs(10)), 1);
        assert_eq!(c.state(), PlaybackState::Complete);
    }

    #[test]
    fn reload_cancels_pending_ticks() {
        let mut c = loaded(3);
        let token = c.play().unwrap().unwrap();
        c.load(trace_of(5)).unwrap();
        assert_eq!(c.on_tick(token), TickOutcome::Stale);
        assert_eq!(c.state(), PlaybackState::Ready);
    }

    #[test]
    fn reset_discards() {
        let mut c = loaded(3);
        c.play().unwrap();
        c.reset();
        assert_eq!(c.state(), PlaybackState::Empty);
        assert_eq!(c.total_steps(), 0);
        assert!(c.live_token().is_none());
    }

    #[test]
    #[should_panic(expected = "period must be > 0")]
    fn zero_period_panics() {
        let _ = PlaybackController::<usize>::with_period(Duration::ZERO);
    }
}
