//! Live readings and the periodic feed that emits them.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::NaiveDateTime;
use medsynth_core::rng::{seeded, StdRng};
use medsynth_core::{LiveConfig, VitalChannel, VitalSample};
use rand::Rng;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::baseline::VitalBaseline;

/// One independent live reading: fresh baseline, live noise band, no modifiers.
pub fn live_sample<R: Rng + ?Sized>(rng: &mut R, patient_id: &str, at: NaiveDateTime) -> VitalSample {
    let baseline = VitalBaseline::draw(rng);
    let mut values = [0.0; 7];
    for channel in VitalChannel::ALL {
        values[channel.index()] = channel.spec().live_walk().sample(rng, baseline.get(channel));
    }
    VitalSample::from_channels(patient_id, at, values)
}

// ============================================================================
// Rolling window
// ============================================================================

/// The most recent `capacity` readings, oldest first.
#[derive(Debug, Clone)]
pub struct LiveWindow {
    capacity: usize,
    samples: VecDeque<VitalSample>,
}

impl LiveWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a reading, evicting the oldest when full.
    pub fn push(&mut self, sample: VitalSample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn latest(&self) -> Option<&VitalSample> {
        self.samples.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VitalSample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Mean of one channel over the window.
    pub fn mean(&self, channel: VitalChannel) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: f64 = self.samples.iter().map(|s| s.get(channel)).sum();
        Some(sum / self.samples.len() as f64)
    }
}

// ============================================================================
// Feed
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LiveFeedConfig {
    pub interval: Duration,
    /// `None` runs until stopped.
    pub duration: Option<Duration>,
    pub window: usize,
}

impl Default for LiveFeedConfig {
    fn default() -> Self {
        Self::from(&LiveConfig::default())
    }
}

impl From<&LiveConfig> for LiveFeedConfig {
    fn from(cfg: &LiveConfig) -> Self {
        Self {
            interval: cfg.interval(),
            duration: cfg.duration(),
            window: cfg.window,
        }
    }
}

/// Periodic live-reading emitter for one patient.
///
/// Each tick produces one [`live_sample`] and sends it on the channel handed
/// out by [`LiveFeed::new`]. The feed stops when its duration elapses, when a
/// stop signal arrives, or when the receiver is dropped.
pub struct LiveFeed {
    patient_id: String,
    config: LiveFeedConfig,
    tx: mpsc::Sender<VitalSample>,
}

/// Handle to a spawned feed.
pub struct LiveHandle {
    stop_tx: watch::Sender<bool>,
    join: JoinHandle<usize>,
}

impl LiveHandle {
    /// Ask the feed to stop after its current tick.
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }

    /// Wait for the feed to finish. Returns the number of readings emitted.
    pub async fn join(self) -> usize {
        match self.join.await {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!("Live feed task failed: {}", e);
                0
            }
        }
    }
}

impl LiveFeed {
    pub fn new(patient_id: impl Into<String>, config: LiveFeedConfig) -> (Self, mpsc::Receiver<VitalSample>) {
        let (tx, rx) = mpsc::channel(config.window.max(1));
        let feed = Self {
            patient_id: patient_id.into(),
            config,
            tx,
        };
        (feed, rx)
    }

    /// Drive the feed on the current task. Returns the number of readings sent.
    pub async fn run<R: Rng>(self, mut rng: R, mut stop: watch::Receiver<bool>) -> usize {
        let started = tokio::time::Instant::now();
        let mut sent = 0usize;
        tracing::info!(
            "Live feed for {} started (interval {:?}, duration {:?})",
            self.patient_id,
            self.config.interval,
            self.config.duration
        );

        loop {
            if *stop.borrow() {
                break;
            }
            if let Some(limit) = self.config.duration {
                if started.elapsed() >= limit {
                    break;
                }
            }

            let at = chrono::Local::now().naive_local();
            let sample = live_sample(&mut rng, &self.patient_id, at);
            if self.tx.send(sample).await.is_err() {
                tracing::info!("Live feed for {}: receiver dropped, shutting down", self.patient_id);
                break;
            }
            sent += 1;

            tokio::select! {
                _ = tokio::time::sleep(self.config.interval) => {}
                changed = stop.changed() => {
                    if changed.is_err() || *stop.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Live feed for {} stopped after {} readings", self.patient_id, sent);
        sent
    }

    /// Spawn the feed with its own seeded stream.
    pub fn spawn(self, seed: u64) -> LiveHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let rng: StdRng = seeded(seed);
        let join = tokio::spawn(self.run(rng, stop_rx));
        LiveHandle { stop_tx, join }
    }
}
