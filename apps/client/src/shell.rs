// apps/client/src/shell.rs
//! View shell: two screens selected purely by whether meeting credentials
//! are present. The shell owns form state and the per-meeting controller;
//! rendering is a pure snapshot of that state.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use meeting_api_cell::{MeetingApiClient, MeetingApiError};
use meeting_session_cell::{
    bootstrap_session, MediaEngine, MeetingController, SessionError, TileBinding, TileKind,
};
use shared_config::AppConfig;
use shared_models::MeetingCredentials;

use crate::clipboard;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    Api(#[from] MeetingApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("no active meeting")]
    NoActiveMeeting,
}

// ==============================================================================
// RENDER MODEL
// ==============================================================================

/// Presentation of one bound tile. Content tiles render larger than camera
/// tiles; the local tile is highlighted and muted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileView {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub highlighted: bool,
    pub muted: bool,
}

impl TileView {
    fn from_binding(binding: &TileBinding) -> Self {
        let (width, height) = match binding.kind {
            TileKind::Content => (600, 400),
            TileKind::Camera => (300, 220),
        };
        Self {
            label: binding.label.clone(),
            width,
            height,
            highlighted: binding.is_local,
            muted: binding.is_local,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Landing {
        create_user_id: String,
        join_user_id: String,
        join_meeting_id: String,
    },
    InMeeting {
        meeting_id: String,
        joined: bool,
        local_display_name: String,
        content_share_active: bool,
        tiles: Vec<TileView>,
    },
}

impl Screen {
    pub fn render(&self) -> String {
        let mut out = String::new();
        match self {
            Screen::Landing {
                create_user_id,
                join_user_id,
                join_meeting_id,
            } => {
                let _ = writeln!(out, "=== Create a New Meeting ===");
                let _ = writeln!(out, "  user id: [{}]", create_user_id);
                let _ = writeln!(out, "=== Join Existing Meeting ===");
                let _ = writeln!(out, "  user id: [{}]", join_user_id);
                let _ = writeln!(out, "  meeting id: [{}]", join_meeting_id);
            }
            Screen::InMeeting {
                meeting_id,
                joined,
                local_display_name,
                content_share_active,
                tiles,
            } => {
                let _ = writeln!(out, "=== Meeting ===");
                if *joined {
                    let _ = writeln!(out, "  meeting id: {} (copy with 'copy')", meeting_id);
                    let _ = writeln!(out, "  in the meeting as: {}", local_display_name);
                    if *content_share_active {
                        let _ = writeln!(out, "  content share active");
                    }
                } else {
                    let _ = writeln!(out, "  'start' to join the meeting");
                }
                for tile in tiles {
                    let marker = if tile.highlighted { "*" } else { " " };
                    let _ = writeln!(
                        out,
                        " {} [{}x{}] {}",
                        marker, tile.width, tile.height, tile.label
                    );
                }
            }
        }
        out
    }
}

// ==============================================================================
// SHELL
// ==============================================================================

pub struct AppShell {
    config: Arc<AppConfig>,
    api: Arc<MeetingApiClient>,
    engine: Arc<dyn MediaEngine>,
    attendee_names: HashMap<String, String>,

    user_id: String,
    create_user_id: String,
    join_user_id: String,
    join_meeting_id: String,

    credentials: Option<MeetingCredentials>,
    controller: Option<MeetingController>,
}

impl AppShell {
    pub fn new(
        config: Arc<AppConfig>,
        api: Arc<MeetingApiClient>,
        engine: Arc<dyn MediaEngine>,
    ) -> Self {
        Self {
            config,
            api,
            engine,
            attendee_names: HashMap::new(),
            user_id: String::new(),
            create_user_id: String::new(),
            join_user_id: String::new(),
            join_meeting_id: String::new(),
            credentials: None,
            controller: None,
        }
    }

    pub fn set_attendee_names(&mut self, names: HashMap<String, String>) {
        self.attendee_names = names;
    }

    // Form field capture

    pub fn set_create_user_id(&mut self, value: &str) {
        self.create_user_id = value.to_string();
    }

    pub fn set_join_user_id(&mut self, value: &str) {
        self.join_user_id = value.to_string();
    }

    pub fn set_join_meeting_id(&mut self, value: &str) {
        self.join_meeting_id = value.to_string();
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn meeting_id(&self) -> Option<&str> {
        self.credentials
            .as_ref()
            .map(|credentials| credentials.meeting.meeting_id.as_str())
    }

    /// Create a meeting with the create-form user id as host and switch to
    /// the in-meeting screen. On failure nothing is retained and the landing
    /// screen stays up for a manual retry.
    pub async fn create_meeting(&mut self) -> Result<(), ShellError> {
        let user_id = self.create_user_id.trim().to_string();
        let credentials = self.api.create_meeting(&user_id).await?;
        self.install_session(credentials, user_id);
        Ok(())
    }

    /// Join an existing meeting with the join-form fields.
    pub async fn join_meeting(&mut self) -> Result<(), ShellError> {
        let user_id = self.join_user_id.trim().to_string();
        let meeting_id = self.join_meeting_id.trim().to_string();
        let credentials = self.api.join_as_attendee(&meeting_id, &user_id).await?;
        self.install_session(credentials, user_id);
        Ok(())
    }

    /// Re-bootstraps whenever new credentials arrive: one session handle and
    /// one controller per credentials/user pair.
    fn install_session(&mut self, credentials: MeetingCredentials, user_id: String) {
        let handle = bootstrap_session(
            &self.config,
            &credentials,
            &user_id,
            Arc::clone(&self.engine),
        );
        let controller = MeetingController::new(Arc::clone(&self.api), handle)
            .with_attendee_names(self.attendee_names.clone());

        self.credentials = Some(credentials);
        self.user_id = user_id;
        self.controller = Some(controller);
    }

    pub async fn start_meeting(&mut self) -> Result<(), ShellError> {
        let controller = self.controller.as_mut().ok_or(ShellError::NoActiveMeeting)?;
        controller.start_meeting().await?;
        Ok(())
    }

    pub async fn start_content_share(&mut self) -> Result<(), ShellError> {
        let controller = self.controller.as_mut().ok_or(ShellError::NoActiveMeeting)?;
        controller.start_content_share().await?;
        Ok(())
    }

    pub async fn stop_content_share(&mut self) {
        if let Some(controller) = self.controller.as_mut() {
            controller.stop_content_share().await;
        }
    }

    /// Drain pending SDK events into the controller's binding set.
    pub fn process_events(&mut self) -> usize {
        self.controller
            .as_mut()
            .map(MeetingController::process_events)
            .unwrap_or(0)
    }

    /// Leave the meeting and reset every locally held identifier so the
    /// landing forms start empty. Teardown warnings never block the reset.
    pub async fn leave_meeting(&mut self) {
        if let Some(controller) = self.controller.as_mut() {
            controller.end_meeting().await;
        }
        self.controller = None;
        self.credentials = None;
        self.user_id.clear();
        self.create_user_id.clear();
        self.join_user_id.clear();
        self.join_meeting_id.clear();
    }

    pub fn copy_meeting_id(&self) -> bool {
        match self.meeting_id() {
            Some(meeting_id) => clipboard::write_text(meeting_id),
            None => false,
        }
    }

    pub fn screen(&self) -> Screen {
        match (&self.credentials, &self.controller) {
            (Some(credentials), Some(controller)) => Screen::InMeeting {
                meeting_id: credentials.meeting.meeting_id.clone(),
                joined: controller.is_joined(),
                local_display_name: controller.local_display_name(),
                content_share_active: controller.content_share_active(),
                tiles: controller
                    .tiles()
                    .into_iter()
                    .map(TileView::from_binding)
                    .collect(),
            },
            _ => Screen::Landing {
                create_user_id: self.create_user_id.clone(),
                join_user_id: self.join_user_id.clone(),
                join_meeting_id: self.join_meeting_id.clone(),
            },
        }
    }
}
