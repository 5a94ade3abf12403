//! Focus series and chart snapshots

use serde::{Deserialize, Serialize};

/// Bar color for one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusColor {
    #[serde(rename = "#00ff00")]
    Green,
    #[serde(rename = "#ff0000")]
    Red,
}

impl FocusColor {
    pub fn hex(self) -> &'static str {
        match self {
            FocusColor::Green => "#00ff00",
            FocusColor::Red => "#ff0000",
        }
    }
}

/// Full chart state, always replaced as a whole
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSnapshot {
    /// Time window per bar, e.g. `"0-3s"`
    pub labels: Vec<String>,
    /// 1 = playing, 0 = paused
    pub values: Vec<u8>,
    pub colors: Vec<FocusColor>,
}

impl FocusSnapshot {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Append-only playing/paused samples.
///
/// Sample `i` covers `[i * interval, (i + 1) * interval)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusSeries {
    interval_ms: u64,
    samples: Vec<u8>,
}

impl FocusSeries {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            samples: Vec::new(),
        }
    }

    pub fn push(&mut self, playing: bool) {
        self.samples.push(u8::from(playing));
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Share of samples spent playing (0.0 when empty)
    pub fn focus_ratio(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let playing = self.samples.iter().filter(|&&v| v == 1).count();
        playing as f32 / self.samples.len() as f32
    }

    /// Label for sample `index`
    pub fn label(&self, index: usize) -> String {
        let start = index as u64 * self.interval_ms;
        format!(
            "{}-{}s",
            format_secs(start),
            format_secs(start + self.interval_ms)
        )
    }

    /// Chart representation of the whole series
    pub fn snapshot(&self) -> FocusSnapshot {
        FocusSnapshot {
            labels: (0..self.samples.len()).map(|i| self.label(i)).collect(),
            values: self.samples.clone(),
            colors: self
                .samples
                .iter()
                .map(|&v| if v == 1 { FocusColor::Green } else { FocusColor::Red })
                .collect(),
        }
    }
}

fn format_secs(ms: u64) -> String {
    if ms % 1000 == 0 {
        (ms / 1000).to_string()
    } else {
        (ms as f64 / 1000.0).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_second_snapshot() {
        let mut series = FocusSeries::new(10_000);
        series.push(true);
        series.push(true);
        series.push(false);

        let snapshot = series.snapshot();
        assert_eq!(snapshot.values, vec![1, 1, 0]);
        assert_eq!(snapshot.labels, vec!["0-10s", "10-20s", "20-30s"]);
        assert_eq!(
            snapshot.colors,
            vec![FocusColor::Green, FocusColor::Green, FocusColor::Red]
        );
    }

    #[test]
    fn test_fractional_interval_labels() {
        let series = FocusSeries::new(1500);
        assert_eq!(series.label(0), "0-1.5s");
        assert_eq!(series.label(1), "1.5-3s");
    }

    #[test]
    fn test_focus_ratio() {
        let mut series = FocusSeries::new(3000);
        assert_eq!(series.focus_ratio(), 0.0);
        series.push(true);
        series.push(false);
        series.push(true);
        series.push(true);
        assert_eq!(series.focus_ratio(), 0.75);
    }

    #[test]
    fn test_clear() {
        let mut series = FocusSeries::new(3000);
        series.push(true);
        series.clear();
        assert!(series.is_empty());
        assert!(series.snapshot().is_empty());
    }

    #[test]
    fn test_colors_serialize_as_hex() {
        let json = serde_json::to_string(&vec![FocusColor::Green, FocusColor::Red]).unwrap();
        assert_eq!(json, r##"["#00ff00","#ff0000"]"##);
        assert_eq!(FocusColor::Red.hex(), "#ff0000");
    }
}
