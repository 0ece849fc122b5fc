// libs/meeting-session-cell/src/testing.rs
//! Test fixtures for driving the lifecycle controller without a real SDK.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::bootstrap::SessionConfiguration;
use crate::engine::MediaEngine;
use crate::models::{MediaDevice, MeetingEvent, SessionError, TileId, TileState};

#[derive(Default)]
struct FakeState {
    audio_inputs: Vec<MediaDevice>,
    video_inputs: Vec<MediaDevice>,
    fail_acquire: bool,
    fail_engine_start: bool,
    fail_content_share: bool,
    failing_stop_steps: Vec<&'static str>,
    calls: Vec<String>,
    event_tx: Option<mpsc::UnboundedSender<MeetingEvent>>,
}

/// Scriptable [`MediaEngine`] that records every call and exposes the push
/// side of the event channel, so tests can play the SDK.
#[derive(Default)]
pub struct FakeMediaEngine {
    state: Mutex<FakeState>,
}

impl FakeMediaEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// One microphone and one camera.
    pub fn with_default_devices() -> Self {
        let engine = Self::new();
        engine.add_audio_input("mic-1", "Built-in Microphone");
        engine.add_video_input("cam-1", "Built-in Camera");
        engine
    }

    pub fn add_audio_input(&self, device_id: &str, label: &str) {
        self.lock().audio_inputs.push(MediaDevice::new(device_id, label));
    }

    pub fn add_video_input(&self, device_id: &str, label: &str) {
        self.lock().video_inputs.push(MediaDevice::new(device_id, label));
    }

    pub fn fail_media_access(&self) {
        self.lock().fail_acquire = true;
    }

    pub fn fail_engine_start(&self) {
        self.lock().fail_engine_start = true;
    }

    pub fn fail_content_share(&self) {
        self.lock().fail_content_share = true;
    }

    /// Make a named teardown step fail: one of `stop`, `stop_local_video_tile`,
    /// `stop_video_input`, `stop_audio_input`, `release_local_media`.
    pub fn fail_stop_step(&self, step: &'static str) {
        self.lock().failing_stop_steps.push(step);
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn has_subscriber(&self) -> bool {
        self.lock()
            .event_tx
            .as_ref()
            .is_some_and(|tx| !tx.is_closed())
    }

    /// Deliver an event to the subscribed controller, if any. Returns whether
    /// a live subscriber received it.
    pub fn push_event(&self, event: MeetingEvent) -> bool {
        match self.lock().event_tx.as_ref() {
            Some(tx) => tx.send(event).is_ok(),
            None => false,
        }
    }

    pub fn push_camera_tile(&self, tile_id: TileId, attendee_id: &str, is_local: bool) -> bool {
        self.push_event(MeetingEvent::TileUpdated(TileState {
            tile_id,
            bound_attendee_id: Some(attendee_id.to_string()),
            bound_external_user_id: None,
            is_content: false,
            is_local,
        }))
    }

    pub fn push_content_tile(&self, tile_id: TileId, attendee_id: &str) -> bool {
        self.push_event(MeetingEvent::TileUpdated(TileState {
            tile_id,
            bound_attendee_id: Some(attendee_id.to_string()),
            bound_external_user_id: None,
            is_content: true,
            is_local: false,
        }))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, call: &str) {
        self.lock().calls.push(call.to_string());
    }

    fn stop_step(&self, step: &'static str) -> Result<(), SessionError> {
        self.record(step);
        if self.lock().failing_stop_steps.contains(&step) {
            return Err(SessionError::Engine {
                message: format!("{} failed", step),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MediaEngine for FakeMediaEngine {
    async fn acquire_local_media(&self) -> Result<(), SessionError> {
        self.record("acquire_local_media");
        if self.lock().fail_acquire {
            return Err(SessionError::MediaAccess {
                message: "permission denied".to_string(),
            });
        }
        Ok(())
    }

    async fn release_local_media(&self) -> Result<(), SessionError> {
        self.stop_step("release_local_media")
    }

    async fn list_audio_inputs(&self) -> Result<Vec<MediaDevice>, SessionError> {
        self.record("list_audio_inputs");
        Ok(self.lock().audio_inputs.clone())
    }

    async fn list_video_inputs(&self) -> Result<Vec<MediaDevice>, SessionError> {
        self.record("list_video_inputs");
        Ok(self.lock().video_inputs.clone())
    }

    async fn start_audio_input(&self, device_id: &str) -> Result<(), SessionError> {
        self.record(&format!("start_audio_input:{}", device_id));
        Ok(())
    }

    async fn stop_audio_input(&self) -> Result<(), SessionError> {
        self.stop_step("stop_audio_input")
    }

    async fn start_video_input(&self, device_id: &str) -> Result<(), SessionError> {
        self.record(&format!("start_video_input:{}", device_id));
        Ok(())
    }

    async fn stop_video_input(&self) -> Result<(), SessionError> {
        self.stop_step("stop_video_input")
    }

    async fn start(&self, _configuration: &SessionConfiguration) -> Result<(), SessionError> {
        self.record("start");
        if self.lock().fail_engine_start {
            return Err(SessionError::Engine {
                message: "engine refused to start".to_string(),
            });
        }
        Ok(())
    }

    async fn stop(&self) -> Result<(), SessionError> {
        self.stop_step("stop")
    }

    async fn start_local_video_tile(&self) -> Result<(), SessionError> {
        self.record("start_local_video_tile");
        Ok(())
    }

    async fn stop_local_video_tile(&self) -> Result<(), SessionError> {
        self.stop_step("stop_local_video_tile")
    }

    async fn start_content_share(&self) -> Result<(), SessionError> {
        self.record("start_content_share");
        if self.lock().fail_content_share {
            return Err(SessionError::ScreenShare {
                message: "capture cancelled".to_string(),
            });
        }
        Ok(())
    }

    async fn stop_content_share(&self) -> Result<(), SessionError> {
        self.record("stop_content_share");
        Ok(())
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<MeetingEvent> {
        self.record("subscribe");
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().event_tx = Some(tx);
        rx
    }
}
