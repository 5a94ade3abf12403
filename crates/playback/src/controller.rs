//! Play/pause decisions from gaze labels

use crate::Player;
use gaze::GazeLabel;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// What the controller did for one gaze label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackCommand {
    Play,
    Pause,
    /// Already in the desired state
    None,
}

/// Playback controller.
///
/// Keeps its own belief of whether the video is playing and only issues a
/// command when the gaze label disagrees with it, so `play` and `pause`
/// always alternate.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    playing: bool,
}

impl PlaybackController {
    /// Start out playing, matching the classifier's initial `Center`
    pub fn new() -> Self {
        Self { playing: true }
    }

    /// React to the label produced for the current tick
    pub fn on_gaze<P: Player + ?Sized>(&mut self, label: GazeLabel, player: &P) -> PlaybackCommand {
        match (label.is_center(), self.playing) {
            (true, false) => {
                self.play(player);
                PlaybackCommand::Play
            }
            (false, true) => {
                self.pause(player);
                PlaybackCommand::Pause
            }
            _ => PlaybackCommand::None,
        }
    }

    fn play<P: Player + ?Sized>(&mut self, player: &P) {
        if player.is_ready() {
            player.play();
            metrics::counter!("playback_commands_total", "command" => "play").increment(1);
            info!("Video resumed");
        } else {
            warn!("Player not ready, dropping play command");
        }
        self.playing = true;
    }

    fn pause<P: Player + ?Sized>(&mut self, player: &P) {
        if player.is_ready() {
            player.pause();
            metrics::counter!("playback_commands_total", "command" => "pause").increment(1);
            info!("Video paused");
        } else {
            warn!("Player not ready, dropping pause command");
        }
        self.playing = false;
    }

    /// Whether the video is believed to be playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Overwrite the belief without issuing a command (a fresh load autoplays)
    pub fn set_playing(&mut self, playing: bool) {
        debug!("Playing flag set to {}", playing);
        self.playing = playing;
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PlayerCall, SimulatedPlayer};
    use gaze::GazeClassifier;
    use proptest::prelude::*;

    #[test]
    fn test_pause_then_play() {
        let player = SimulatedPlayer::ready();
        let mut controller = PlaybackController::new();

        assert_eq!(controller.on_gaze(GazeLabel::Center, &player), PlaybackCommand::None);
        assert_eq!(controller.on_gaze(GazeLabel::Right, &player), PlaybackCommand::Pause);
        assert_eq!(controller.on_gaze(GazeLabel::Left, &player), PlaybackCommand::None);
        assert_eq!(controller.on_gaze(GazeLabel::Center, &player), PlaybackCommand::Play);

        assert_eq!(player.calls(), vec![PlayerCall::Pause, PlayerCall::Play]);
    }

    #[test]
    fn test_face_lost_pauses() {
        let player = SimulatedPlayer::ready();
        let mut controller = PlaybackController::new();

        controller.on_gaze(GazeLabel::NotDetected, &player);
        controller.on_gaze(GazeLabel::NotDetected, &player);

        assert!(!controller.is_playing());
        assert_eq!(player.calls(), vec![PlayerCall::Pause]);
    }

    #[test]
    fn test_not_ready_updates_flag_only() {
        let player = SimulatedPlayer::new();
        let mut controller = PlaybackController::new();

        assert_eq!(controller.on_gaze(GazeLabel::Left, &player), PlaybackCommand::Pause);
        assert!(!controller.is_playing());
        assert!(player.calls().is_empty());
    }

    #[test]
    fn test_left_glance_pauses_once() {
        let player = SimulatedPlayer::ready();
        let mut classifier = GazeClassifier::default();
        let mut controller = PlaybackController::new();

        let labels: Vec<_> = [0.3, 0.3, 0.3]
            .iter()
            .map(|&ratio| {
                let label = classifier.classify_ratio(ratio);
                controller.on_gaze(label, &player);
                label
            })
            .collect();

        assert_eq!(labels.last(), Some(&GazeLabel::Left));
        assert_eq!(player.calls(), vec![PlayerCall::Pause]);
    }

    fn any_label() -> impl Strategy<Value = GazeLabel> {
        prop_oneof![
            Just(GazeLabel::Center),
            Just(GazeLabel::Left),
            Just(GazeLabel::Right),
            Just(GazeLabel::NotDetected),
        ]
    }

    proptest! {
        #[test]
        fn test_commands_alternate(labels in prop::collection::vec(any_label(), 0..64)) {
            let player = SimulatedPlayer::ready();
            let mut controller = PlaybackController::new();
            for label in labels {
                controller.on_gaze(label, &player);
            }

            let calls = player.calls();
            for pair in calls.windows(2) {
                prop_assert_ne!(&pair[0], &pair[1]);
            }
            // Starts playing, so the first command can only be a pause
            if let Some(first) = calls.first() {
                prop_assert_eq!(first, &PlayerCall::Pause);
            }
        }
    }
}
