//! Interval sampler

use crate::{FocusSeries, FocusSnapshot, VisualizationSink};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Sampler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Sampling period in milliseconds
    pub interval_ms: u64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self { interval_ms: 3000 }
    }
}

impl SamplerConfig {
    pub fn with_interval_ms(interval_ms: u64) -> Self {
        Self { interval_ms }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Focus sampler.
///
/// The owner calls [`FocusSampler::tick`] once per elapsed interval; every
/// tick and every reset pushes a full snapshot to the sink.
pub struct FocusSampler<S: VisualizationSink> {
    config: SamplerConfig,
    series: FocusSeries,
    sink: S,
}

impl<S: VisualizationSink> FocusSampler<S> {
    pub fn new(config: SamplerConfig, sink: S) -> Self {
        info!("Creating focus sampler: interval={}ms", config.interval_ms);
        Self {
            series: FocusSeries::new(config.interval_ms),
            config,
            sink,
        }
    }

    /// Record one interval
    pub fn tick(&mut self, playing: bool) {
        self.series.push(playing);
        debug!(
            "Focus sample {} = {}",
            self.series.len() - 1,
            u8::from(playing)
        );
        self.publish();
    }

    /// Drop all samples (a new video was loaded)
    pub fn reset(&mut self) {
        self.series.clear();
        debug!("Focus series cleared");
        self.publish();
    }

    fn publish(&mut self) {
        let snapshot = self.series.snapshot();
        self.sink.publish(&snapshot);
    }

    pub fn series(&self) -> &FocusSeries {
        &self.series
    }

    pub fn snapshot(&self) -> FocusSnapshot {
        self.series.snapshot()
    }

    pub fn interval(&self) -> Duration {
        self.config.interval()
    }
}
