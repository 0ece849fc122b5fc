// libs/meeting-session-cell/src/models.rs
use std::fmt;

// ==============================================================================
// SDK-FACING TYPES
// ==============================================================================

/// SDK-assigned identifier of a renderable video/content stream.
pub type TileId = u32;

/// A local capture device as reported by the SDK's device controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDevice {
    pub device_id: String,
    pub label: String,
}

impl MediaDevice {
    pub fn new(device_id: &str, label: &str) -> Self {
        Self {
            device_id: device_id.to_string(),
            label: label.to_string(),
        }
    }
}

/// Snapshot of a tile as the SDK reports it on a tile-update event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileState {
    pub tile_id: TileId,
    pub bound_attendee_id: Option<String>,
    pub bound_external_user_id: Option<String>,
    pub is_content: bool,
    pub is_local: bool,
}

/// SDK lifecycle notifications, reduced synchronously by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingEvent {
    TileUpdated(TileState),
    TileRemoved(TileId),
    ContentShareStarted,
    ContentShareStopped,
}

// ==============================================================================
// CONTROLLER STATE
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Starting,
    Joined,
    Leaving,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Starting => "starting",
            SessionState::Joined => "joined",
            SessionState::Leaving => "leaving",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Camera,
    Content,
}

/// Association between a tile id and its resolved presentation.
///
/// At most one binding exists per tile id; a duplicate update event for an
/// already-bound tile is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileBinding {
    pub tile_id: TileId,
    pub label: String,
    pub kind: TileKind,
    pub is_local: bool,
}

// ==============================================================================
// ERROR HANDLING
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("media access denied: {message}")]
    MediaAccess { message: String },

    #[error("screen share unavailable: {message}")]
    ScreenShare { message: String },

    #[error("engine failure: {message}")]
    Engine { message: String },

    #[error("meeting already active in state {state}")]
    AlreadyActive { state: SessionState },

    #[error("not joined to a meeting")]
    NotJoined,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_state_display_is_lowercase() {
        assert_eq!(SessionState::Idle.to_string(), "idle");
        assert_eq!(SessionState::Starting.to_string(), "starting");
        assert_eq!(SessionState::Joined.to_string(), "joined");
        assert_eq!(SessionState::Leaving.to_string(), "leaving");
    }

    #[test]
    fn already_active_error_names_the_state() {
        let error = SessionError::AlreadyActive {
            state: SessionState::Joined,
        };
        assert_eq!(error.to_string(), "meeting already active in state joined");
    }
}
