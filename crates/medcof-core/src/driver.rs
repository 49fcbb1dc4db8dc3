//! Async frame driver for the stat animation.
//!
//! Each run is a tokio task ticking on a fixed interval and publishing
//! samples through a `watch` channel. Retargeting aborts the task in flight
//! and bumps the run number under the channel lock, so a late sample from a
//! superseded run is dropped instead of being published.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{Instant, MissedTickBehavior};

use crate::animator::{StatAnimation, ANIMATION_DURATION};
use crate::model::StatTriple;

/// Default tick period, roughly one display frame.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// The value published on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PublishedFrame {
    /// Run that produced this frame. Bumped on every retarget and cancel.
    pub run: u64,
    pub stats: StatTriple,
    pub done: bool,
}

/// Owns the animation task and the channel it publishes to.
#[derive(Debug)]
pub struct AnimationDriver {
    tx: Arc<watch::Sender<PublishedFrame>>,
    task: Option<JoinHandle<()>>,
    frame_interval: Duration,
}

impl AnimationDriver {
    pub fn new(initial: StatTriple, frame_interval: Duration) -> Self {
        let (tx, _rx) = watch::channel(PublishedFrame {
            run: 0,
            stats: initial,
            done: true,
        });
        Self {
            tx: Arc::new(tx),
            task: None,
            frame_interval: frame_interval.max(Duration::from_millis(1)),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PublishedFrame> {
        self.tx.subscribe()
    }

    /// Counters as last published.
    pub fn displayed(&self) -> StatTriple {
        self.tx.borrow().stats
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Start a new run from the displayed counters toward `to`.
    ///
    /// Must be called from within a tokio runtime. Returns the run number.
    pub fn retarget(&mut self, to: StatTriple) -> u64 {
        let mut from = StatTriple::ZERO;
        let mut run = 0;
        self.tx.send_modify(|frame| {
            frame.run += 1;
            frame.done = false;
            from = frame.stats;
            run = frame.run;
        });

        if let Some(task) = self.task.take() {
            task.abort();
        }

        let animation =
            StatAnimation::new(from, to, Instant::now().into_std(), ANIMATION_DURATION);
        tracing::debug!(run, from = %from, to = %to, "animation run spawned");
        self.task = Some(tokio::spawn(drive(
            Arc::clone(&self.tx),
            run,
            animation,
            self.frame_interval,
        )));
        run
    }

    /// Stop the current run, leaving the displayed counters where they are.
    ///
    /// Returns `false` if nothing was running.
    pub fn cancel(&mut self) -> bool {
        let Some(task) = self.task.take() else {
            return false;
        };
        let was_running = !task.is_finished();
        task.abort();
        self.tx.send_if_modified(|frame| {
            frame.run += 1;
            false
        });
        was_running
    }

    /// Wait for the current run to reach its target.
    ///
    /// Fails only if the run's task panicked.
    pub async fn finished(&mut self) -> Result<(), JoinError> {
        match self.task.take() {
            Some(task) => join_run(task).await,
            None => Ok(()),
        }
    }
}

impl Drop for AnimationDriver {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Await a run's task. Cancellation is how runs normally end early, so only
/// a panic is reported.
async fn join_run(task: JoinHandle<()>) -> Result<(), JoinError> {
    match task.await {
        Err(err) if err.is_cancelled() => Ok(()),
        Err(err) => {
            tracing::error!(error = %err, "animation task failed");
            Err(err)
        }
        Ok(()) => Ok(()),
    }
}

async fn drive(
    tx: Arc<watch::Sender<PublishedFrame>>,
    run: u64,
    animation: StatAnimation,
    frame_interval: Duration,
) {
    let mut ticker = tokio::time::interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let now = Instant::now().into_std();
        let stats = animation.sample(now);
        let done = animation.is_finished(now);

        let mut superseded = false;
        tx.send_if_modified(|frame| {
            if frame.run != run {
                superseded = true;
                return false;
            }
            let changed = frame.stats != stats || frame.done != done;
            frame.stats = stats;
            frame.done = done;
            changed
        });

        if superseded {
            tracing::trace!(run, "dropping frame from superseded run");
            break;
        }
        if done {
            tracing::debug!(run, "animation run finished");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARDIO: StatTriple = StatTriple {
        materials: 45,
        flashcards: 120,
        classes: 12,
    };
    const NEURO: StatTriple = StatTriple {
        materials: 30,
        flashcards: 80,
        classes: 10,
    };

    async fn collect_until_done(
        rx: &mut watch::Receiver<PublishedFrame>,
    ) -> Vec<PublishedFrame> {
        let mut frames = Vec::new();
        loop {
            rx.changed().await.unwrap();
            let frame = *rx.borrow_and_update();
            frames.push(frame);
            if frame.done {
                return frames;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn run_reaches_target_monotonically() {
        let mut driver = AnimationDriver::new(StatTriple::ZERO, DEFAULT_FRAME_INTERVAL);
        let mut rx = driver.subscribe();
        let started = Instant::now();
        let run = driver.retarget(CARDIO);

        let frames = collect_until_done(&mut rx).await;
        assert!(Instant::now() - started >= ANIMATION_DURATION);
        assert!(frames.iter().all(|f| f.run == run));
        assert_eq!(frames.first().unwrap().stats, StatTriple::ZERO);
        assert_eq!(frames.last().unwrap().stats, CARDIO);
        for pair in frames.windows(2) {
            assert!(pair[1].stats.materials >= pair[0].stats.materials);
            assert!(pair[1].stats.flashcards >= pair[0].stats.flashcards);
            assert!(pair[1].stats.classes >= pair[0].stats.classes);
        }

        driver.finished().await.unwrap();
        assert!(!driver.is_running());
        assert_eq!(driver.displayed(), CARDIO);
    }

    #[tokio::test(start_paused = true)]
    async fn retarget_supersedes_the_previous_run() {
        let mut driver = AnimationDriver::new(StatTriple::ZERO, DEFAULT_FRAME_INTERVAL);
        let first = driver.retarget(CARDIO);
        tokio::time::sleep(Duration::from_millis(200)).await;
        let mid = driver.displayed();
        assert_ne!(mid, StatTriple::ZERO);
        assert_ne!(mid, CARDIO);

        let mut rx = driver.subscribe();
        let second = driver.retarget(NEURO);
        assert!(second > first);

        let frames = collect_until_done(&mut rx).await;
        assert!(frames.iter().all(|f| f.run == second));
        assert!(frames.iter().all(|f| f.stats != CARDIO));
        assert_eq!(frames.first().unwrap().stats, mid);
        assert_eq!(frames.last().unwrap().stats, NEURO);

        // Long after the first run would have ended, nothing overwrote NEURO.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(driver.displayed(), NEURO);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_freezes_counters_and_is_idempotent() {
        let mut driver = AnimationDriver::new(StatTriple::ZERO, DEFAULT_FRAME_INTERVAL);
        driver.retarget(CARDIO);
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(driver.cancel());
        assert!(!driver.cancel());
        let frozen = driver.displayed();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(driver.displayed(), frozen);
        assert!(!driver.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_finish_is_a_no_op() {
        let mut driver = AnimationDriver::new(StatTriple::ZERO, DEFAULT_FRAME_INTERVAL);
        driver.retarget(NEURO);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!driver.cancel());
        assert_eq!(driver.displayed(), NEURO);
        driver.finished().await.unwrap();
    }

    #[tokio::test]
    async fn join_run_reports_panics_but_not_aborts() {
        let aborted = tokio::spawn(std::future::pending::<()>());
        aborted.abort();
        assert!(join_run(aborted).await.is_ok());

        let panicked = tokio::spawn(async { panic!("tick failed") });
        let err = join_run(panicked).await.unwrap_err();
        assert!(err.is_panic());
    }
}
