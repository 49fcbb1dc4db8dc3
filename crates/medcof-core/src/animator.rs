//! Stat counter interpolation.
//!
//! A [`StatAnimation`] is one linear run from the displayed counters to a
//! target; sampling it is a pure function of the clock. [`StatAnimator`]
//! owns at most one run at a time and hands out a [`RunHandle`] per run so a
//! scheduler can tell when its run has been replaced.

use std::time::{Duration, Instant};

use crate::model::StatTriple;

/// Length of every stat animation run.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(500);

/// One interpolation run from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatAnimation {
    from: StatTriple,
    to: StatTriple,
    started_at: Instant,
    duration: Duration,
}

impl StatAnimation {
    pub fn new(from: StatTriple, to: StatTriple, started_at: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
        }
    }

    /// Fraction of the run elapsed at `now`, clamped to `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Counter values at `now`. Exactly `to` once the duration has elapsed.
    pub fn sample(&self, now: Instant) -> StatTriple {
        let progress = self.progress(now);
        StatTriple {
            materials: lerp_floor(self.from.materials, self.to.materials, progress),
            flashcards: lerp_floor(self.from.flashcards, self.to.flashcards, progress),
            classes: lerp_floor(self.from.classes, self.to.classes, progress),
        }
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

fn lerp_floor(from: u32, to: u32, progress: f64) -> u32 {
    let from = f64::from(from);
    let to = f64::from(to);
    (from + (to - from) * progress).floor().max(0.0) as u32
}

/// Identifies one run started by a [`StatAnimator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunHandle(u64);

/// Result of ticking a live run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub stats: StatTriple,
    /// The run reached its target; no further ticks should be scheduled.
    pub done: bool,
}

/// Restartable animator holding the displayed counters.
#[derive(Debug, Clone)]
pub struct StatAnimator {
    displayed: StatTriple,
    run: Option<(RunHandle, StatAnimation)>,
    next_run: u64,
    duration: Duration,
}

impl Default for StatAnimator {
    fn default() -> Self {
        Self::new(StatTriple::ZERO)
    }
}

impl StatAnimator {
    pub fn new(displayed: StatTriple) -> Self {
        Self {
            displayed,
            run: None,
            next_run: 1,
            duration: ANIMATION_DURATION,
        }
    }

    /// Counters as last displayed.
    pub fn displayed(&self) -> StatTriple {
        self.displayed
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    pub fn current_run(&self) -> Option<RunHandle> {
        self.run.map(|(handle, _)| handle)
    }

    /// Start a run from the displayed counters toward `to`, replacing any
    /// run in flight.
    pub fn start(&mut self, to: StatTriple, now: Instant) -> RunHandle {
        if let Some((old, _)) = self.run.take() {
            tracing::debug!(run = old.0, "stat animation superseded");
        }

        let handle = RunHandle(self.next_run);
        self.next_run += 1;
        self.run = Some((
            handle,
            StatAnimation::new(self.displayed, to, now, self.duration),
        ));
        tracing::debug!(run = handle.0, from = %self.displayed, to = %to, "stat animation started");
        handle
    }

    /// Advance `handle`'s run to `now`.
    ///
    /// Returns `None` when the handle is not the live run (cancelled,
    /// superseded, or already finished); the caller should stop ticking.
    pub fn tick(&mut self, handle: RunHandle, now: Instant) -> Option<Frame> {
        let (live, animation) = self.run?;
        if live != handle {
            return None;
        }

        let stats = animation.sample(now);
        let done = animation.is_finished(now);
        self.displayed = stats;
        if done {
            self.run = None;
        }
        Some(Frame { stats, done })
    }

    /// Stop `handle`'s run, keeping whatever is displayed.
    ///
    /// Returns `false` when the run was no longer live; calling it again is
    /// harmless.
    pub fn cancel(&mut self, handle: RunHandle) -> bool {
        match self.run {
            Some((live, _)) if live == handle => {
                self.run = None;
                tracing::debug!(run = handle.0, "stat animation cancelled");
                true
            }
            _ => false,
        }
    }
}
