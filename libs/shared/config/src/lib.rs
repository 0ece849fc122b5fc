use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub meeting_api_base_url: String,
    pub external_meeting_id: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            meeting_api_base_url: env::var("MEETING_API_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("MEETING_API_BASE_URL not set, using default");
                    "http://localhost:8080".to_string()
                }),
            external_meeting_id: env::var("EXTERNAL_MEETING_ID")
                .unwrap_or_else(|_| {
                    warn!("EXTERNAL_MEETING_ID not set, using default");
                    "demo-meeting".to_string()
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.meeting_api_base_url.is_empty() && !self.external_meeting_id.is_empty()
    }
}
