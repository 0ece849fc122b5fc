// libs/meeting-api-cell/src/client.rs
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error, info};

use shared_config::AppConfig;
use shared_models::MeetingCredentials;

use crate::models::{
    CreateMeetingRequest, DeleteAttendeeRequest, JoinMeetingRequest, MeetingApiError,
};

/// Client for the conferencing backend's meeting/attendee endpoints.
///
/// All calls are single-shot: failures propagate to the caller and the user
/// retries the triggering action. `delete_attendee` is the one exception in
/// spirit - callers treat its failure as a warning during teardown.
pub struct MeetingApiClient {
    client: Client,
    base_url: String,
}

impl MeetingApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.meeting_api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a new meeting with `user_id` as host.
    /// POST /api/chime/create
    pub async fn create_meeting(
        &self,
        user_id: &str,
    ) -> Result<MeetingCredentials, MeetingApiError> {
        info!("Creating meeting for host user: {}", user_id);

        let request = CreateMeetingRequest {
            user_id: user_id.to_string(),
        };

        let credentials = self.post_credentials("/api/chime/create", &request).await?;

        info!(
            "Meeting created: {} (attendee {})",
            credentials.meeting.meeting_id, credentials.attendee.attendee_id
        );
        Ok(credentials)
    }

    /// Register `user_id` as an attendee on an existing meeting.
    /// POST /api/chime/attendee
    ///
    /// Whether `meeting_id` references a live meeting is decided server-side;
    /// an unknown id comes back as a `Server` error with whatever status the
    /// backend chose.
    pub async fn join_as_attendee(
        &self,
        meeting_id: &str,
        user_id: &str,
    ) -> Result<MeetingCredentials, MeetingApiError> {
        info!("Joining meeting {} as user: {}", meeting_id, user_id);

        let request = JoinMeetingRequest {
            meeting_id: meeting_id.to_string(),
            user_id: user_id.to_string(),
        };

        let credentials = self.post_credentials("/api/chime/attendee", &request).await?;

        info!(
            "Joined meeting {} as attendee {}",
            credentials.meeting.meeting_id, credentials.attendee.attendee_id
        );
        Ok(credentials)
    }

    /// Remove an attendee record from the backend.
    /// POST /api/chime/attendee/delete
    ///
    /// No response body is required; only the status is checked.
    pub async fn delete_attendee(
        &self,
        meeting_id: &str,
        attendee_id: &str,
    ) -> Result<(), MeetingApiError> {
        info!(
            "Deleting attendee {} from meeting {}",
            attendee_id, meeting_id
        );

        let request = DeleteAttendeeRequest {
            meeting_id: meeting_id.to_string(),
            attendee_id: attendee_id.to_string(),
        };

        let url = format!("{}/api/chime/attendee/delete", self.base_url);
        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Attendee deletion failed: {} - {}", status, body);
            return Err(MeetingApiError::Server { status, body });
        }

        info!("Attendee {} deleted", attendee_id);
        Ok(())
    }

    async fn post_credentials<T: Serialize>(
        &self,
        path: &str,
        request: &T,
    ) -> Result<MeetingCredentials, MeetingApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Sending request to: {}", url);

        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Backend response: {} - {}", status, body);

        if !status.is_success() {
            error!("Backend call failed: {} - {}", status, body);
            return Err(MeetingApiError::Server { status, body });
        }

        serde_json::from_str(&body).map_err(|e| MeetingApiError::InvalidResponse {
            message: format!("failed to parse credentials: {}", e),
        })
    }
}
