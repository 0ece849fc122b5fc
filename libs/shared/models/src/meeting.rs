use serde::{Deserialize, Serialize};

/// Server-side meeting descriptor as returned by the conferencing backend.
///
/// `media_placement` is opaque to the client: it is handed to the SDK
/// session configuration without being interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeetingInfo {
    #[serde(rename = "meetingId")]
    pub meeting_id: String,

    #[serde(rename = "mediaPlacement", default)]
    pub media_placement: serde_json::Value,

    #[serde(rename = "externalMeetingId", skip_serializing_if = "Option::is_none")]
    pub external_meeting_id: Option<String>,
}

/// A participant's credential pair, scoped to one meeting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendeeInfo {
    #[serde(rename = "attendeeId")]
    pub attendee_id: String,

    #[serde(rename = "joinToken")]
    pub join_token: String,

    #[serde(rename = "externalUserId", skip_serializing_if = "Option::is_none")]
    pub external_user_id: Option<String>,
}

/// Everything needed to bootstrap one meeting session.
///
/// Owned by the view shell for the duration of one meeting and discarded
/// on leave; never shared across concurrent meetings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeetingCredentials {
    pub meeting: MeetingInfo,
    pub attendee: AttendeeInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn credentials_deserialize_from_backend_payload() {
        let payload = json!({
            "meeting": {
                "meetingId": "m1",
                "mediaPlacement": { "audioHostUrl": "wss://audio.example.com" }
            },
            "attendee": {
                "attendeeId": "a1",
                "joinToken": "t1",
                "externalUserId": "alice"
            }
        });

        let credentials: MeetingCredentials = serde_json::from_value(payload).unwrap();
        assert_eq!(credentials.meeting.meeting_id, "m1");
        assert_eq!(credentials.attendee.attendee_id, "a1");
        assert_eq!(credentials.attendee.join_token, "t1");
        assert_eq!(credentials.attendee.external_user_id.as_deref(), Some("alice"));
        assert_eq!(
            credentials.meeting.media_placement["audioHostUrl"],
            "wss://audio.example.com"
        );
    }

    #[test]
    fn media_placement_defaults_to_null_when_absent() {
        let payload = json!({
            "meeting": { "meetingId": "m1" },
            "attendee": { "attendeeId": "a1", "joinToken": "t1" }
        });

        let credentials: MeetingCredentials = serde_json::from_value(payload).unwrap();
        assert!(credentials.meeting.media_placement.is_null());
        assert!(credentials.attendee.external_user_id.is_none());
    }
}
