//! Scripted perception source
//!
//! Stands in for the face tracker: replays a looping script of gaze
//! directions as synthetic eye landmarks, with jitter and the occasional
//! single-frame glitch so the debounce has something to reject.

use gaze::{EyeLandmarks, LandmarkFrame, Point2};
use serde::{Deserialize, Serialize};

/// Every Nth frame is mirrored into the opposite band
const GLITCH_EVERY: u64 = 20;

/// Peak jitter added to the scripted ratio
const JITTER: f32 = 0.03;

/// Where the simulated viewer is looking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptedGaze {
    Center,
    Left,
    Right,
    /// Face out of frame
    Away,
}

impl ScriptedGaze {
    fn base_ratio(self) -> Option<f32> {
        match self {
            ScriptedGaze::Center => Some(0.5),
            ScriptedGaze::Left => Some(0.32),
            ScriptedGaze::Right => Some(0.68),
            ScriptedGaze::Away => None,
        }
    }
}

/// One step of the script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSegment {
    pub gaze: ScriptedGaze,
    pub frames: u32,
}

impl ScriptSegment {
    pub fn new(gaze: ScriptedGaze, frames: u32) -> Self {
        Self { gaze, frames }
    }
}

/// About 20 seconds at 30 fps
pub fn default_script() -> Vec<ScriptSegment> {
    vec![
        ScriptSegment::new(ScriptedGaze::Center, 150),
        ScriptSegment::new(ScriptedGaze::Left, 90),
        ScriptSegment::new(ScriptedGaze::Center, 120),
        ScriptSegment::new(ScriptedGaze::Away, 60),
        ScriptSegment::new(ScriptedGaze::Center, 90),
        ScriptSegment::new(ScriptedGaze::Right, 90),
    ]
}

/// Looping landmark generator
#[derive(Debug, Clone)]
pub struct ScriptedPerception {
    script: Vec<ScriptSegment>,
    segment: usize,
    frame_in_segment: u32,
    tick: u64,
}

impl ScriptedPerception {
    pub fn new(script: Vec<ScriptSegment>) -> Self {
        // Zero-length segments would never be left
        let script: Vec<_> = script.into_iter().filter(|s| s.frames > 0).collect();
        Self {
            script,
            segment: 0,
            frame_in_segment: 0,
            tick: 0,
        }
    }

    /// Gaze the next frame will show
    pub fn current_gaze(&self) -> ScriptedGaze {
        self.script
            .get(self.segment)
            .map(|s| s.gaze)
            .unwrap_or(ScriptedGaze::Center)
    }

    /// Produce the next perception result
    pub fn next_frame(&mut self) -> Option<LandmarkFrame> {
        let gaze = self.current_gaze();
        let tick = self.tick;
        self.advance();

        let base = gaze.base_ratio()?;
        let mut ratio = base + JITTER * (tick as f32 * 0.7).sin();
        if tick % GLITCH_EVERY == GLITCH_EVERY - 1 {
            ratio = 1.0 - ratio;
        }
        Some(synth_frame(ratio))
    }

    fn advance(&mut self) {
        self.tick += 1;
        let Some(segment) = self.script.get(self.segment) else {
            return;
        };

        self.frame_in_segment += 1;
        if self.frame_in_segment >= segment.frames {
            self.frame_in_segment = 0;
            self.segment = (self.segment + 1) % self.script.len();
        }
    }
}

/// Eye landmarks in normalized image coordinates whose gaze ratio is `ratio`
fn synth_frame(ratio: f32) -> LandmarkFrame {
    fn eye(outer_x: f32, inner_x: f32, ratio: f32) -> EyeLandmarks {
        EyeLandmarks::new(
            Point2::new(outer_x, 0.42),
            Point2::new(inner_x, 0.42),
            Point2::new(outer_x + ratio * (inner_x - outer_x), 0.42),
        )
    }

    // Mirrored eyes: outer corners face away from the nose
    LandmarkFrame::new(eye(0.38, 0.46, ratio), eye(0.62, 0.54, ratio))
}
