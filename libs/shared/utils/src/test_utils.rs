use std::sync::Arc;

use serde_json::json;

use shared_config::AppConfig;
use shared_models::{AttendeeInfo, MeetingCredentials, MeetingInfo};

pub struct TestConfig {
    pub meeting_api_base_url: String,
    pub external_meeting_id: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            meeting_api_base_url: "http://localhost:8080".to_string(),
            external_meeting_id: "demo-meeting".to_string(),
        }
    }
}

impl TestConfig {
    /// Config pointing at a mock backend (typically a wiremock server uri).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            meeting_api_base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            meeting_api_base_url: self.meeting_api_base_url.clone(),
            external_meeting_id: self.external_meeting_id.clone(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Credentials as the view shell would hold them after a successful create/join.
pub fn test_credentials(meeting_id: &str, attendee_id: &str, user_id: &str) -> MeetingCredentials {
    MeetingCredentials {
        meeting: MeetingInfo {
            meeting_id: meeting_id.to_string(),
            media_placement: json!({
                "audioHostUrl": "wss://audio.example.com",
                "signalingUrl": "wss://signaling.example.com"
            }),
            external_meeting_id: None,
        },
        attendee: AttendeeInfo {
            attendee_id: attendee_id.to_string(),
            join_token: format!("token-{}", attendee_id),
            external_user_id: Some(user_id.to_string()),
        },
    }
}

pub struct MockBackendResponses;

impl MockBackendResponses {
    /// Body of a successful create/join call.
    pub fn credentials_response(
        meeting_id: &str,
        attendee_id: &str,
        user_id: &str,
    ) -> serde_json::Value {
        json!({
            "meeting": {
                "meetingId": meeting_id,
                "mediaPlacement": {
                    "audioHostUrl": "wss://audio.example.com",
                    "signalingUrl": "wss://signaling.example.com"
                }
            },
            "attendee": {
                "attendeeId": attendee_id,
                "joinToken": format!("token-{}", attendee_id),
                "externalUserId": user_id
            }
        })
    }

    pub fn error_response(message: &str) -> serde_json::Value {
        json!({
            "error": message
        })
    }
}
