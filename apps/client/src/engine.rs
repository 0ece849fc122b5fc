// apps/client/src/engine.rs
//! Loopback media engine.
//!
//! Stand-in implementation of the SDK boundary for local development: it
//! enumerates a fixed microphone/camera pair and echoes local actions back
//! as lifecycle events, so the shell and controller can be exercised end to
//! end without real capture or transport.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;

use meeting_session_cell::{
    MediaDevice, MediaEngine, MeetingEvent, SessionConfiguration, SessionError, TileId, TileState,
};

#[derive(Default)]
struct LoopbackState {
    event_tx: Option<mpsc::UnboundedSender<MeetingEvent>>,
    attendee_id: Option<String>,
    external_user_id: Option<String>,
    next_tile_id: TileId,
    local_tile: Option<TileId>,
    content_tile: Option<TileId>,
}

#[derive(Default)]
pub struct LoopbackMediaEngine {
    state: Mutex<LoopbackState>,
}

impl LoopbackMediaEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LoopbackState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit(&self, event: MeetingEvent) {
        if let Some(tx) = self.lock().event_tx.as_ref() {
            // A dropped receiver just means nobody is observing anymore.
            let _ = tx.send(event);
        }
    }

    fn allocate_tile(&self) -> TileId {
        let mut state = self.lock();
        state.next_tile_id += 1;
        state.next_tile_id
    }
}

#[async_trait]
impl MediaEngine for LoopbackMediaEngine {
    async fn acquire_local_media(&self) -> Result<(), SessionError> {
        Ok(())
    }

    async fn release_local_media(&self) -> Result<(), SessionError> {
        Ok(())
    }

    async fn list_audio_inputs(&self) -> Result<Vec<MediaDevice>, SessionError> {
        Ok(vec![MediaDevice::new("loopback-mic", "Loopback Microphone")])
    }

    async fn list_video_inputs(&self) -> Result<Vec<MediaDevice>, SessionError> {
        Ok(vec![MediaDevice::new("loopback-cam", "Loopback Camera")])
    }

    async fn start_audio_input(&self, _device_id: &str) -> Result<(), SessionError> {
        Ok(())
    }

    async fn stop_audio_input(&self) -> Result<(), SessionError> {
        Ok(())
    }

    async fn start_video_input(&self, _device_id: &str) -> Result<(), SessionError> {
        Ok(())
    }

    async fn stop_video_input(&self) -> Result<(), SessionError> {
        Ok(())
    }

    async fn start(&self, configuration: &SessionConfiguration) -> Result<(), SessionError> {
        let mut state = self.lock();
        state.attendee_id = Some(configuration.attendee_id.clone());
        state.external_user_id = Some(configuration.external_user_id.clone());
        Ok(())
    }

    async fn stop(&self) -> Result<(), SessionError> {
        let mut state = self.lock();
        state.attendee_id = None;
        state.external_user_id = None;
        state.local_tile = None;
        state.content_tile = None;
        Ok(())
    }

    async fn start_local_video_tile(&self) -> Result<(), SessionError> {
        let tile_id = self.allocate_tile();
        let (attendee_id, external_user_id) = {
            let mut state = self.lock();
            state.local_tile = Some(tile_id);
            (state.attendee_id.clone(), state.external_user_id.clone())
        };
        self.emit(MeetingEvent::TileUpdated(TileState {
            tile_id,
            bound_attendee_id: attendee_id,
            bound_external_user_id: external_user_id,
            is_content: false,
            is_local: true,
        }));
        Ok(())
    }

    async fn stop_local_video_tile(&self) -> Result<(), SessionError> {
        if let Some(tile_id) = self.lock().local_tile.take() {
            self.emit(MeetingEvent::TileRemoved(tile_id));
        }
        Ok(())
    }

    async fn start_content_share(&self) -> Result<(), SessionError> {
        let tile_id = self.allocate_tile();
        let attendee_id = {
            let mut state = self.lock();
            state.content_tile = Some(tile_id);
            state.attendee_id.clone()
        };
        self.emit(MeetingEvent::TileUpdated(TileState {
            tile_id,
            bound_attendee_id: attendee_id,
            bound_external_user_id: None,
            is_content: true,
            is_local: false,
        }));
        self.emit(MeetingEvent::ContentShareStarted);
        Ok(())
    }

    async fn stop_content_share(&self) -> Result<(), SessionError> {
        // Safe when no share is active.
        if let Some(tile_id) = self.lock().content_tile.take() {
            self.emit(MeetingEvent::TileRemoved(tile_id));
            self.emit(MeetingEvent::ContentShareStopped);
        }
        Ok(())
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<MeetingEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().event_tx = Some(tx);
        rx
    }
}
