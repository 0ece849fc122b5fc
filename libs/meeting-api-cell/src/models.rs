// libs/meeting-api-cell/src/models.rs
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

// ==============================================================================
// REQUEST BODIES
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMeetingRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinMeetingRequest {
    #[serde(rename = "meetingId")]
    pub meeting_id: String,

    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAttendeeRequest {
    #[serde(rename = "meetingId")]
    pub meeting_id: String,

    #[serde(rename = "attendeeId")]
    pub attendee_id: String,
}

// ==============================================================================
// ERROR HANDLING
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum MeetingApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: StatusCode, body: String },

    #[error("invalid response payload: {message}")]
    InvalidResponse { message: String },
}
