//! Hysteresis-debounced gaze classifier

use crate::{GazeBucket, GazeConfig, GazeLabel, HysteresisCounters, LandmarkFrame};
use tracing::{debug, info};

/// Debounced gaze classifier.
///
/// State machine over the sticky labels `Center`, `Left` and `Right`. A
/// frame's average gaze ratio picks a bucket; the sticky label moves to that
/// bucket once its counter reaches `threshold_frames`. A missing face is
/// reported as `NotDetected` on that tick only and leaves the counters and the
/// sticky label untouched.
#[derive(Debug, Clone)]
pub struct GazeClassifier {
    config: GazeConfig,
    counters: HysteresisCounters,
    label: GazeLabel,
}

impl GazeClassifier {
    pub fn new(config: GazeConfig) -> Self {
        info!(
            "Creating gaze classifier: threshold={} frames, center band=[{}, {}]",
            config.threshold_frames, config.left_bound, config.right_bound
        );
        Self {
            config,
            counters: HysteresisCounters::default(),
            label: GazeLabel::Center,
        }
    }

    /// Classify one perception tick
    pub fn classify(&mut self, frame: Option<&LandmarkFrame>) -> GazeLabel {
        let Some(frame) = frame else {
            return GazeLabel::NotDetected;
        };

        match frame.avg_gaze_ratio() {
            Ok(ratio) => self.classify_ratio(ratio),
            Err(e) => {
                // Degenerate frames count for nothing, the sticky label holds
                debug!("Skipping frame: {}", e);
                self.label
            }
        }
    }

    /// Feed an already computed average gaze ratio
    pub fn classify_ratio(&mut self, ratio: f32) -> GazeLabel {
        let bucket = self.bucket(ratio);
        self.counters.bump(bucket);

        for candidate in [GazeBucket::Left, GazeBucket::Right, GazeBucket::Center] {
            let label = candidate.label();
            if self.counters.get(candidate) >= self.config.threshold_frames && self.label != label {
                debug!("Gaze changed: {} -> {} (ratio {:.3})", self.label, label, ratio);
                self.label = label;
                break;
            }
        }

        self.label
    }

    fn bucket(&self, ratio: f32) -> GazeBucket {
        if ratio < self.config.left_bound {
            GazeBucket::Left
        } else if ratio > self.config.right_bound {
            GazeBucket::Right
        } else {
            GazeBucket::Center
        }
    }

    /// Current sticky label
    pub fn label(&self) -> GazeLabel {
        self.label
    }

    pub fn counters(&self) -> HysteresisCounters {
        self.counters
    }

    pub fn config(&self) -> &GazeConfig {
        &self.config
    }

    /// Back to the initial `Center` state with empty counters
    pub fn reset(&mut self) {
        self.counters.reset();
        self.label = GazeLabel::Center;
    }
}

impl Default for GazeClassifier {
    fn default() -> Self {
        Self::new(GazeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EyeLandmarks, Point2};
    use proptest::prelude::*;

    fn frame_with_ratio(ratio: f32) -> LandmarkFrame {
        let eye = EyeLandmarks::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(ratio, 0.0),
        );
        LandmarkFrame::new(eye, eye)
    }

    #[test]
    fn test_starts_center() {
        let classifier = GazeClassifier::default();
        assert_eq!(classifier.label(), GazeLabel::Center);
        assert_eq!(classifier.counters(), HysteresisCounters::default());
    }

    #[test]
    fn test_left_after_third_frame() {
        let mut classifier = GazeClassifier::default();

        assert_eq!(classifier.classify_ratio(0.3), GazeLabel::Center);
        assert_eq!(classifier.classify_ratio(0.3), GazeLabel::Center);
        assert_eq!(classifier.classify_ratio(0.3), GazeLabel::Left);

        // Further agreeing frames keep the label
        assert_eq!(classifier.classify_ratio(0.3), GazeLabel::Left);
        assert_eq!(classifier.counters().left, 4);
    }

    #[test]
    fn test_right_from_frames() {
        let mut classifier = GazeClassifier::default();
        for _ in 0..2 {
            assert_eq!(classifier.classify(Some(&frame_with_ratio(0.8))), GazeLabel::Center);
        }
        assert_eq!(classifier.classify(Some(&frame_with_ratio(0.8))), GazeLabel::Right);
    }

    #[test]
    fn test_jitter_does_not_flip() {
        let mut classifier = GazeClassifier::default();
        for ratio in [0.4, 0.4, 0.5, 0.4, 0.4, 0.6, 0.4, 0.4] {
            assert_eq!(classifier.classify_ratio(ratio), GazeLabel::Center);
        }
    }

    #[test]
    fn test_boundaries_are_center() {
        let mut classifier = GazeClassifier::default();
        classifier.classify_ratio(0.45);
        assert_eq!(classifier.counters().center, 1);
        classifier.classify_ratio(0.55);
        assert_eq!(classifier.counters().center, 2);
    }

    #[test]
    fn test_no_face_is_transient() {
        let mut classifier = GazeClassifier::default();
        for _ in 0..3 {
            classifier.classify_ratio(0.3);
        }
        assert_eq!(classifier.label(), GazeLabel::Left);

        assert_eq!(classifier.classify(None), GazeLabel::NotDetected);
        assert_eq!(classifier.label(), GazeLabel::Left);
        assert_eq!(classifier.counters().left, 3);

        // Center counting starts from one on the next detected frame
        assert_eq!(classifier.classify(Some(&frame_with_ratio(0.5))), GazeLabel::Left);
        assert_eq!(
            classifier.counters(),
            HysteresisCounters { left: 0, right: 0, center: 1 }
        );
    }

    #[test]
    fn test_no_face_does_not_erode_progress() {
        let mut classifier = GazeClassifier::default();
        classifier.classify_ratio(0.3);
        classifier.classify_ratio(0.3);
        classifier.classify(None);
        assert_eq!(classifier.classify_ratio(0.3), GazeLabel::Left);
    }

    #[test]
    fn test_degenerate_frame_skipped() {
        let mut classifier = GazeClassifier::default();
        classifier.classify_ratio(0.3);
        classifier.classify_ratio(0.3);

        let eye = EyeLandmarks::new(
            Point2::new(0.5, 0.0),
            Point2::new(0.5, 0.0),
            Point2::new(0.5, 0.0),
        );
        let degenerate = LandmarkFrame::new(eye, eye);
        assert_eq!(classifier.classify(Some(&degenerate)), GazeLabel::Center);
        assert_eq!(classifier.counters().left, 2);
    }

    #[test]
    fn test_strict_config() {
        let mut classifier = GazeClassifier::new(GazeConfig::strict());
        classifier.classify_ratio(0.46);
        assert_eq!(classifier.classify_ratio(0.46), GazeLabel::Left);
    }

    #[test]
    fn test_reset() {
        let mut classifier = GazeClassifier::default();
        for _ in 0..3 {
            classifier.classify_ratio(0.9);
        }
        classifier.reset();
        assert_eq!(classifier.label(), GazeLabel::Center);
        assert_eq!(classifier.counters(), HysteresisCounters::default());
    }

    proptest! {
        #[test]
        fn test_counters_stay_exclusive(ratios in prop::collection::vec(proptest::option::of(0.0f32..1.0), 0..64)) {
            let mut classifier = GazeClassifier::default();
            for ratio in ratios {
                let frame = ratio.map(frame_with_ratio);
                classifier.classify(frame.as_ref());
                let c = classifier.counters();
                let non_zero = [c.left, c.right, c.center].iter().filter(|&&n| n > 0).count();
                prop_assert!(non_zero <= 1);
                prop_assert_ne!(classifier.label(), GazeLabel::NotDetected);
            }
        }
    }
}
