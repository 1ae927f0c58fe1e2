//! Periodic sampling loop.
//!
//! A tokio task reads the time source on a fixed cadence, runs
//! encode → compose, and publishes the newest [`ClockFrame`] on a watch
//! channel. Consumers only ever see the latest frame; a slow renderer skips
//! stale ones instead of queueing them. No state carries over between ticks.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::composer::{Layout, RingGeometry, compose};
use crate::encoder::{IndicatorState, encode};
use crate::error::ClockError;
use crate::time_source::TimeSource;

/// Default sampling cadence
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

/// Everything derived from one time sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockFrame {
    pub time_of_day: f64,
    pub state: IndicatorState,
    pub layout: Layout,
}

/// Encode and compose a single instant.
pub fn sample(time_of_day: f64, geometry: &RingGeometry) -> Result<ClockFrame, ClockError> {
    let state = encode(time_of_day)?;
    let layout = compose(&state, geometry);
    Ok(ClockFrame {
        time_of_day,
        state,
        layout,
    })
}

/// Handle to a running sampler task.
///
/// Dropping the handle also stops the task at its next tick.
pub struct SamplerHandle {
    frames: watch::Receiver<Option<ClockFrame>>,
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SamplerHandle {
    /// A receiver that is notified whenever a new frame is published
    pub fn subscribe(&self) -> watch::Receiver<Option<ClockFrame>> {
        self.frames.clone()
    }

    /// The most recent frame, if any tick has completed yet
    pub fn latest(&self) -> Option<ClockFrame> {
        self.frames.borrow().clone()
    }

    /// Stop sampling and wait for the task to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "Sampler task ended abnormally");
        }
    }
}

/// Spawn the sampling loop on the current tokio runtime.
///
/// The first sample is taken immediately, then once per `interval`. Missed
/// ticks are skipped rather than bursted.
pub fn spawn_sampler<S>(source: S, interval: Duration, geometry: RingGeometry) -> SamplerHandle
where
    S: TimeSource + 'static,
{
    let (frame_tx, frames) = watch::channel(None);
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tracing::info!(interval_ms = interval.as_millis() as u64, "Sampler started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                // Fires on an explicit shutdown or when the handle is dropped
                _ = shutdown_rx.changed() => break,
            }

            let time_of_day = source.seconds_since_midnight();
            match sample(time_of_day, &geometry) {
                Ok(frame) => {
                    tracing::trace!(
                        time_of_day,
                        coarse = frame.state.coarse_index(),
                        fine = frame.state.fine_index(),
                        "Sampled"
                    );
                    if frame_tx.send(Some(frame)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Time source produced an unusable sample");
                }
            }
        }

        tracing::info!("Sampler stopped");
    });

    SamplerHandle {
        frames,
        shutdown_tx,
        task,
    }
}
