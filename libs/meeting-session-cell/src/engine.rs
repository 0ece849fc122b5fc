// libs/meeting-session-cell/src/engine.rs
use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::bootstrap::SessionConfiguration;
use crate::models::{MediaDevice, MeetingEvent, SessionError};

/// The published interface of the external conferencing SDK.
///
/// Device enumeration, capture, network transport and tile management are all
/// delegated to the implementation; this crate only sequences the calls.
/// Implementations must keep `stop_content_share` safe to invoke when no
/// share is active.
#[async_trait]
pub trait MediaEngine: Send + Sync {
    /// Request camera and microphone access. Fails with
    /// [`SessionError::MediaAccess`] when permission is denied.
    async fn acquire_local_media(&self) -> Result<(), SessionError>;

    /// Stop and release every captured local track.
    async fn release_local_media(&self) -> Result<(), SessionError>;

    async fn list_audio_inputs(&self) -> Result<Vec<MediaDevice>, SessionError>;

    async fn list_video_inputs(&self) -> Result<Vec<MediaDevice>, SessionError>;

    async fn start_audio_input(&self, device_id: &str) -> Result<(), SessionError>;

    async fn stop_audio_input(&self) -> Result<(), SessionError>;

    async fn start_video_input(&self, device_id: &str) -> Result<(), SessionError>;

    async fn stop_video_input(&self) -> Result<(), SessionError>;

    /// Start the audio/video engine for the given session configuration.
    async fn start(&self, configuration: &SessionConfiguration) -> Result<(), SessionError>;

    /// Stop the audio/video engine.
    async fn stop(&self) -> Result<(), SessionError>;

    async fn start_local_video_tile(&self) -> Result<(), SessionError>;

    async fn stop_local_video_tile(&self) -> Result<(), SessionError>;

    /// Begin sharing a screen-capture stream as a content tile. Fails with
    /// [`SessionError::ScreenShare`] on denial or cancellation.
    async fn start_content_share(&self) -> Result<(), SessionError>;

    async fn stop_content_share(&self) -> Result<(), SessionError>;

    /// Register the observer: lifecycle events are delivered on the returned
    /// channel. The controller holds exactly one receiver per session and
    /// drops it on leave.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<MeetingEvent>;
}
