//! Focus Sampling
//!
//! Samples the playing flag on a fixed interval into an append-only series
//! and publishes it as a full chart snapshot on every change.

mod sampler;
mod series;
mod sink;

pub use sampler::{FocusSampler, SamplerConfig};
pub use series::{FocusColor, FocusSeries, FocusSnapshot};
pub use sink::{MemorySink, VisualizationSink};
