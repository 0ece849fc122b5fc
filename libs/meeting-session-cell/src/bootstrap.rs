// libs/meeting-session-cell/src/bootstrap.rs
use std::sync::Arc;

use tracing::info;

use shared_config::AppConfig;
use shared_models::MeetingCredentials;

use crate::engine::MediaEngine;

/// SDK session configuration assembled from backend credentials and the
/// local user identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfiguration {
    pub meeting_id: String,
    pub media_placement: serde_json::Value,
    pub external_meeting_id: String,
    pub attendee_id: String,
    pub join_token: String,
    pub external_user_id: String,
}

impl SessionConfiguration {
    pub fn new(credentials: &MeetingCredentials, user_id: &str, external_meeting_id: &str) -> Self {
        Self {
            meeting_id: credentials.meeting.meeting_id.clone(),
            media_placement: credentials.meeting.media_placement.clone(),
            external_meeting_id: external_meeting_id.to_string(),
            attendee_id: credentials.attendee.attendee_id.clone(),
            join_token: credentials.attendee.join_token.clone(),
            external_user_id: user_id.to_string(),
        }
    }
}

/// One bootstrapped SDK session: configuration plus the engine it runs on.
///
/// Exactly one handle exists per credentials/user pair; the view shell
/// re-bootstraps whenever either changes. The handle is passed explicitly to
/// whoever drives it - there is no process-wide slot to read it back from.
pub struct SessionHandle {
    configuration: SessionConfiguration,
    engine: Arc<dyn MediaEngine>,
}

impl SessionHandle {
    pub fn configuration(&self) -> &SessionConfiguration {
        &self.configuration
    }

    pub fn engine(&self) -> &Arc<dyn MediaEngine> {
        &self.engine
    }
}

/// Construct the session handle for one meeting.
pub fn bootstrap_session(
    config: &AppConfig,
    credentials: &MeetingCredentials,
    user_id: &str,
    engine: Arc<dyn MediaEngine>,
) -> SessionHandle {
    let configuration =
        SessionConfiguration::new(credentials, user_id, &config.external_meeting_id);

    info!(
        "Bootstrapped session for meeting {} as attendee {}",
        configuration.meeting_id, configuration.attendee_id
    );

    SessionHandle {
        configuration,
        engine,
    }
}
