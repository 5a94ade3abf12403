//! Session control loop

use crate::loader::{wait_pending, PendingLoad};
use crate::{LoadOutcome, SessionConfig, SessionError, SessionStatus};
use focus_sampler::{FocusSampler, VisualizationSink};
use gaze::{GazeClassifier, GazeLabel, LandmarkFrame};
use playback::{PlaybackController, Player, RetryError};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use video_id::VideoId;

/// Queued user requests before senders wait
const COMMAND_BUFFER: usize = 16;

/// Requests from the user surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Load a known id, skipping resolution
    Load(VideoId),
    /// Load from free-form input (URL or bare id)
    LoadText(String),
    /// Load a configured sample video by index
    LoadSample(usize),
    Shutdown,
}

/// Gaze playback session.
///
/// Runs as one task; every event is handled to completion before the next
/// one is picked, so the playing flag and focus series need no locking.
pub struct Session<P: Player + 'static, S: VisualizationSink> {
    config: SessionConfig,
    classifier: GazeClassifier,
    controller: PlaybackController,
    sampler: FocusSampler<S>,
    player: Arc<P>,
    /// Latest perception result; unseen frames are overwritten
    frames: watch::Receiver<Option<LandmarkFrame>>,
    commands: mpsc::Receiver<SessionCommand>,
    status: watch::Sender<SessionStatus>,
    pending: Option<PendingLoad>,
    gaze: GazeLabel,
    last_load: Option<LoadOutcome>,
}

impl<P: Player + 'static, S: VisualizationSink> Session<P, S> {
    /// Create a session and the handle used to feed it
    pub fn new(
        config: SessionConfig,
        player: Arc<P>,
        sink: S,
    ) -> Result<(Self, SessionHandle), SessionError> {
        config.validate()?;

        let (frame_tx, frame_rx) = watch::channel(None);
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (status_tx, status_rx) = watch::channel(SessionStatus::default());

        let session = Self {
            classifier: GazeClassifier::new(config.gaze.clone()),
            controller: PlaybackController::new(),
            sampler: FocusSampler::new(config.sampler.clone(), sink),
            config,
            player,
            frames: frame_rx,
            commands: command_rx,
            status: status_tx,
            pending: None,
            gaze: GazeLabel::Center,
            last_load: None,
        };

        let handle = SessionHandle {
            frames: Arc::new(frame_tx),
            commands: command_tx,
            status: status_rx,
        };

        Ok((session, handle))
    }

    /// Run until shutdown is requested or every handle is dropped
    pub async fn run(mut self) {
        info!("Starting gaze session");

        let period = self.sampler.interval();
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.publish_status();

        loop {
            tokio::select! {
                biased;
                command = self.commands.recv() => match command {
                    Some(SessionCommand::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },
                _ = ticker.tick() => self.on_sample(),
                result = wait_pending(&mut self.pending) => self.finish_load(result),
                changed = self.frames.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let frame = *self.frames.borrow_and_update();
                    self.on_frame(frame.as_ref());
                }
            }
            self.publish_status();
        }

        if let Some(stale) = self.pending.take() {
            info!("Abandoning pending load of {}", stale.id);
        }
        info!("Gaze session stopped");
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Load(id) => self.begin_load(id),
            SessionCommand::LoadText(input) => match VideoId::parse(&input) {
                Ok(id) => self.begin_load(id),
                Err(e) => {
                    warn!("{}", e);
                    self.last_load = Some(LoadOutcome::Rejected { input });
                }
            },
            SessionCommand::LoadSample(index) => match self.config.sample(index).cloned() {
                Some(sample) => {
                    info!("Loading sample video {:?}", sample.title);
                    self.begin_load(sample.video_id);
                }
                None => warn!("No sample video at index {}", index),
            },
            SessionCommand::Shutdown => {}
        }
    }

    fn begin_load(&mut self, id: VideoId) {
        // A newer request always wins over a load still waiting on the player
        if let Some(stale) = self.pending.take() {
            info!("Load of {} superseded by {}", stale.id, id);
            self.last_load = Some(LoadOutcome::Superseded(stale.id));
        }

        if self.player.is_ready() {
            self.complete_load(id);
        } else {
            info!("Player not ready, waiting to load {}", id);
            self.pending = Some(PendingLoad::new(id, Arc::clone(&self.player), self.config.retry));
        }
    }

    fn finish_load(&mut self, result: Result<(), RetryError>) {
        let Some(load) = self.pending.take() else {
            return;
        };

        match result {
            Ok(()) => self.complete_load(load.id),
            Err(RetryError::Exhausted { attempts }) => {
                warn!("Failed to load video {} after {} attempts", load.id, attempts);
                metrics::counter!("video_loads_total", "outcome" => "failed").increment(1);
                self.last_load = Some(LoadOutcome::Failed {
                    id: load.id,
                    attempts,
                });
            }
        }
    }

    fn complete_load(&mut self, id: VideoId) {
        self.player.load_video_by_id(&id);
        self.controller.set_playing(true);
        self.sampler.reset();
        metrics::counter!("video_loads_total", "outcome" => "loaded").increment(1);
        info!("Video loaded: {}", id);
        self.last_load = Some(LoadOutcome::Loaded(id));
    }

    fn on_frame(&mut self, frame: Option<&LandmarkFrame>) {
        let label = self.classifier.classify(frame);
        let command = self.controller.on_gaze(label, self.player.as_ref());
        if label != self.gaze {
            debug!("Status: {} ({:?})", label, command);
        }
        self.gaze = label;
    }

    fn on_sample(&mut self) {
        self.sampler.tick(self.controller.is_playing());
    }

    fn publish_status(&self) {
        let series = self.sampler.series();
        let status = SessionStatus {
            gaze: self.gaze,
            playing: self.controller.is_playing(),
            controls_enabled: self.player.is_ready(),
            loading: self.pending.as_ref().map(|load| load.id.clone()),
            last_load: self.last_load.clone(),
            samples: series.len(),
            focus_ratio: series.focus_ratio(),
        };

        self.status.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
    }
}

/// Cloneable handle for feeding a running [`Session`]
#[derive(Clone)]
pub struct SessionHandle {
    frames: Arc<watch::Sender<Option<LandmarkFrame>>>,
    commands: mpsc::Sender<SessionCommand>,
    status: watch::Receiver<SessionStatus>,
}

impl SessionHandle {
    /// Hand over the latest perception result (`None` = no face).
    ///
    /// Replaces any frame the session has not picked up yet.
    pub fn submit_frame(&self, frame: Option<LandmarkFrame>) {
        self.frames.send_replace(frame);
    }

    pub async fn load(&self, id: VideoId) -> Result<(), SessionError> {
        self.send(SessionCommand::Load(id)).await
    }

    /// Load from a URL or bare id typed by the user
    pub async fn load_text(&self, input: impl Into<String>) -> Result<(), SessionError> {
        self.send(SessionCommand::LoadText(input.into())).await
    }

    pub async fn load_sample(&self, index: usize) -> Result<(), SessionError> {
        self.send(SessionCommand::LoadSample(index)).await
    }

    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Shutdown).await
    }

    async fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SessionError::Closed)
    }

    /// Latest published status
    pub fn status(&self) -> SessionStatus {
        self.status.borrow().clone()
    }

    /// Receiver notified on every status change
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.clone()
    }
}
