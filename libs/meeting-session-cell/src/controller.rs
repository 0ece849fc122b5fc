// libs/meeting-session-cell/src/controller.rs
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use meeting_api_cell::MeetingApiClient;

use crate::bootstrap::SessionHandle;
use crate::models::{
    MeetingEvent, SessionError, SessionState, TileBinding, TileId, TileKind, TileState,
};

/// Drives one meeting session through `Idle -> Starting -> Joined -> Leaving`.
///
/// SDK events are reduced synchronously into the tile-binding set; rendering
/// reads [`MeetingController::tiles`] afterwards in its own pass. The
/// `Starting` state is the mutual-exclusion guard against overlapping starts.
pub struct MeetingController {
    api: Arc<MeetingApiClient>,
    handle: SessionHandle,
    attendee_names: HashMap<String, String>,
    state: SessionState,
    // Single observer slot: subscribed on start, dropped on leave.
    events: Option<mpsc::UnboundedReceiver<MeetingEvent>>,
    tiles: BTreeMap<TileId, TileBinding>,
    content_share_active: bool,
}

impl MeetingController {
    pub fn new(api: Arc<MeetingApiClient>, handle: SessionHandle) -> Self {
        Self {
            api,
            handle,
            attendee_names: HashMap::new(),
            state: SessionState::Idle,
            events: None,
            tiles: BTreeMap::new(),
            content_share_active: false,
        }
    }

    /// Optional lookup from attendee id to a human-readable label.
    pub fn with_attendee_names(mut self, names: HashMap<String, String>) -> Self {
        self.attendee_names = names;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_joined(&self) -> bool {
        self.state == SessionState::Joined
    }

    pub fn content_share_active(&self) -> bool {
        self.content_share_active
    }

    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    /// Active bindings in tile-id order - the declarative input to rendering.
    pub fn tiles(&self) -> Vec<&TileBinding> {
        self.tiles.values().collect()
    }

    /// Resolve the in-meeting label for the local attendee.
    pub fn local_display_name(&self) -> String {
        let configuration = self.handle.configuration();
        self.attendee_names
            .get(&configuration.attendee_id)
            .cloned()
            .unwrap_or_else(|| configuration.external_user_id.clone())
    }

    // ==========================================================================
    // JOIN
    // ==========================================================================

    /// Acquire local media, start the first enumerated input devices, start
    /// the engine, register the observer and start the local tile.
    ///
    /// Transitions to `Joined` only when every step succeeded; any failure
    /// rolls back to `Idle` and is returned to the caller.
    pub async fn start_meeting(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Idle {
            warn!("start_meeting rejected: session is {}", self.state);
            return Err(SessionError::AlreadyActive { state: self.state });
        }
        self.state = SessionState::Starting;

        match self.run_start_sequence().await {
            Ok(()) => {
                self.state = SessionState::Joined;
                info!(
                    "Joined meeting {}",
                    self.handle.configuration().meeting_id
                );
                Ok(())
            }
            Err(e) => {
                error!("Failed to join meeting: {}", e);
                self.events = None;
                self.state = SessionState::Idle;
                Err(e)
            }
        }
    }

    async fn run_start_sequence(&mut self) -> Result<(), SessionError> {
        let engine = Arc::clone(self.handle.engine());

        engine.acquire_local_media().await?;

        let audio_inputs = engine.list_audio_inputs().await?;
        let video_inputs = engine.list_video_inputs().await?;

        // First enumerated device wins; there is no preference ranking.
        if let Some(device) = audio_inputs.first() {
            engine.start_audio_input(&device.device_id).await?;
            info!("Audio input started: {}", device.label);
        }
        if let Some(device) = video_inputs.first() {
            engine.start_video_input(&device.device_id).await?;
            info!("Video input started: {}", device.label);
        }

        engine.start(self.handle.configuration()).await?;
        self.events = Some(engine.subscribe());
        engine.start_local_video_tile().await?;

        Ok(())
    }

    // ==========================================================================
    // EVENT REDUCTION
    // ==========================================================================

    /// Drain every queued SDK event into the binding set. Returns the number
    /// of events applied; callers re-render once afterwards.
    pub fn process_events(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.events.as_mut().and_then(|rx| rx.try_recv().ok()) {
            self.apply_event(event);
            applied += 1;
        }
        applied
    }

    /// Reduce a single SDK event. Deterministic and side-effect free apart
    /// from the binding set and the content-share flag.
    pub fn apply_event(&mut self, event: MeetingEvent) {
        match event {
            MeetingEvent::TileUpdated(tile) => self.bind_tile(tile),
            MeetingEvent::TileRemoved(tile_id) => {
                if self.tiles.remove(&tile_id).is_some() {
                    info!("Unbound tile {}", tile_id);
                }
            }
            MeetingEvent::ContentShareStarted => {
                self.content_share_active = true;
                info!("Content share started");
            }
            MeetingEvent::ContentShareStopped => {
                self.content_share_active = false;
                info!("Content share stopped");
            }
        }
    }

    fn bind_tile(&mut self, tile: TileState) {
        if tile.bound_attendee_id.is_none() && !tile.is_content {
            return;
        }
        if self.tiles.contains_key(&tile.tile_id) {
            debug!("Duplicate update for bound tile {}", tile.tile_id);
            return;
        }

        let kind = if tile.is_content {
            TileKind::Content
        } else {
            TileKind::Camera
        };
        let label = self.resolve_label(&tile);

        info!(
            "Bound {} to tile {}",
            match kind {
                TileKind::Content => "screen share",
                TileKind::Camera => "user video",
            },
            tile.tile_id
        );

        self.tiles.insert(
            tile.tile_id,
            TileBinding {
                tile_id: tile.tile_id,
                label,
                kind,
                is_local: tile.is_local,
            },
        );
    }

    /// Display-name map, then the SDK-reported external user id, then the raw
    /// attendee id. Content tiles are always labeled distinctly.
    fn resolve_label(&self, tile: &TileState) -> String {
        if tile.is_content {
            return "Screen Share".to_string();
        }
        let attendee_id = tile
            .bound_attendee_id
            .as_deref()
            .unwrap_or_default();
        self.attendee_names
            .get(attendee_id)
            .cloned()
            .or_else(|| tile.bound_external_user_id.clone())
            .unwrap_or_else(|| format!("User: {}", attendee_id))
    }

    // ==========================================================================
    // LEAVE
    // ==========================================================================

    /// Tear the session down. Best effort throughout: every stop step is
    /// attempted, failures are logged as warnings, and the controller always
    /// returns to `Idle` with its bindings cleared. No-op when already idle.
    pub async fn end_meeting(&mut self) {
        if self.state == SessionState::Idle {
            debug!("end_meeting with no active session");
            return;
        }
        self.state = SessionState::Leaving;

        // Unregister the observer before the engine winds down.
        self.events = None;

        let engine = Arc::clone(self.handle.engine());
        if let Err(e) = engine.stop().await {
            warn!("Failed to stop audio/video engine: {}", e);
        }
        if let Err(e) = engine.stop_local_video_tile().await {
            warn!("Failed to stop local video tile: {}", e);
        }
        if let Err(e) = engine.stop_video_input().await {
            warn!("Failed to stop video input: {}", e);
        }
        if let Err(e) = engine.stop_audio_input().await {
            warn!("Failed to stop audio input: {}", e);
        }
        if let Err(e) = engine.release_local_media().await {
            warn!("Failed to release local media tracks: {}", e);
        }

        let meeting_id = self.handle.configuration().meeting_id.clone();
        let attendee_id = self.handle.configuration().attendee_id.clone();
        if let Err(e) = self.api.delete_attendee(&meeting_id, &attendee_id).await {
            warn!("Could not delete attendee from backend: {}", e);
        }

        self.tiles.clear();
        self.content_share_active = false;
        self.state = SessionState::Idle;
        info!("Left meeting {}", meeting_id);
    }

    // ==========================================================================
    // CONTENT SHARE
    // ==========================================================================

    pub async fn start_content_share(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Joined {
            return Err(SessionError::NotJoined);
        }
        self.handle.engine().start_content_share().await?;
        info!("Screen sharing requested");
        Ok(())
    }

    /// Always safe to invoke, including when no share is active.
    pub async fn stop_content_share(&mut self) {
        if let Err(e) = self.handle.engine().stop_content_share().await {
            warn!("Failed to stop content share: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::bootstrap_session;
    use crate::testing::FakeMediaEngine;
    use shared_config::AppConfig;
    use shared_models::{AttendeeInfo, MeetingCredentials, MeetingInfo};

    fn test_controller(names: HashMap<String, String>) -> MeetingController {
        let config = AppConfig {
            meeting_api_base_url: "http://localhost:8080".to_string(),
            external_meeting_id: "demo-meeting".to_string(),
        };
        let credentials = MeetingCredentials {
            meeting: MeetingInfo {
                meeting_id: "m1".to_string(),
                media_placement: serde_json::Value::Null,
                external_meeting_id: None,
            },
            attendee: AttendeeInfo {
                attendee_id: "a-local".to_string(),
                join_token: "t1".to_string(),
                external_user_id: Some("alice".to_string()),
            },
        };
        let engine = Arc::new(FakeMediaEngine::new());
        let handle = bootstrap_session(&config, &credentials, "alice", engine);
        let api = Arc::new(MeetingApiClient::new(&config));
        MeetingController::new(api, handle).with_attendee_names(names)
    }

    fn camera_tile(tile_id: TileId, attendee_id: &str) -> MeetingEvent {
        MeetingEvent::TileUpdated(TileState {
            tile_id,
            bound_attendee_id: Some(attendee_id.to_string()),
            bound_external_user_id: None,
            is_content: false,
            is_local: false,
        })
    }

    #[test]
    fn unbound_non_content_tile_is_ignored() {
        let mut controller = test_controller(HashMap::new());
        controller.apply_event(MeetingEvent::TileUpdated(TileState {
            tile_id: 1,
            bound_attendee_id: None,
            bound_external_user_id: None,
            is_content: false,
            is_local: false,
        }));
        assert!(controller.tiles().is_empty());
    }

    #[test]
    fn duplicate_tile_update_binds_once() {
        let mut controller = test_controller(HashMap::new());
        controller.apply_event(camera_tile(1, "a1"));
        controller.apply_event(camera_tile(1, "a1"));
        assert_eq!(controller.tiles().len(), 1);
    }

    #[test]
    fn removing_unbound_tile_is_a_noop() {
        let mut controller = test_controller(HashMap::new());
        controller.apply_event(MeetingEvent::TileRemoved(42));
        assert!(controller.tiles().is_empty());
    }

    #[test]
    fn label_prefers_display_name_map() {
        let mut names = HashMap::new();
        names.insert("a1".to_string(), "Dr. Alice".to_string());
        let mut controller = test_controller(names);

        controller.apply_event(MeetingEvent::TileUpdated(TileState {
            tile_id: 1,
            bound_attendee_id: Some("a1".to_string()),
            bound_external_user_id: Some("alice".to_string()),
            is_content: false,
            is_local: false,
        }));

        assert_eq!(controller.tiles()[0].label, "Dr. Alice");
    }

    #[test]
    fn label_falls_back_to_external_user_id_then_attendee_id() {
        let mut controller = test_controller(HashMap::new());

        controller.apply_event(MeetingEvent::TileUpdated(TileState {
            tile_id: 1,
            bound_attendee_id: Some("a1".to_string()),
            bound_external_user_id: Some("alice".to_string()),
            is_content: false,
            is_local: false,
        }));
        controller.apply_event(camera_tile(2, "a2"));

        assert_eq!(controller.tiles()[0].label, "alice");
        assert_eq!(controller.tiles()[1].label, "User: a2");
    }

    #[test]
    fn content_tile_is_always_labeled_screen_share() {
        let mut names = HashMap::new();
        names.insert("a1".to_string(), "Dr. Alice".to_string());
        let mut controller = test_controller(names);

        controller.apply_event(MeetingEvent::TileUpdated(TileState {
            tile_id: 7,
            bound_attendee_id: Some("a1".to_string()),
            bound_external_user_id: None,
            is_content: true,
            is_local: false,
        }));

        let tiles = controller.tiles();
        assert_eq!(tiles[0].label, "Screen Share");
        assert_eq!(tiles[0].kind, TileKind::Content);
    }

    #[test]
    fn local_tile_is_marked() {
        let mut controller = test_controller(HashMap::new());
        controller.apply_event(MeetingEvent::TileUpdated(TileState {
            tile_id: 1,
            bound_attendee_id: Some("a-local".to_string()),
            bound_external_user_id: Some("alice".to_string()),
            is_content: false,
            is_local: true,
        }));
        assert!(controller.tiles()[0].is_local);
    }

    #[test]
    fn content_share_flag_follows_events() {
        let mut controller = test_controller(HashMap::new());
        assert!(!controller.content_share_active());

        controller.apply_event(MeetingEvent::ContentShareStarted);
        assert!(controller.content_share_active());

        controller.apply_event(MeetingEvent::ContentShareStopped);
        assert!(!controller.content_share_active());
    }

    #[test]
    fn local_display_name_prefers_map_over_user_id() {
        let mut names = HashMap::new();
        names.insert("a-local".to_string(), "Alice M.".to_string());
        let controller = test_controller(names);
        assert_eq!(controller.local_display_name(), "Alice M.");

        let controller = test_controller(HashMap::new());
        assert_eq!(controller.local_display_name(), "alice");
    }
}
