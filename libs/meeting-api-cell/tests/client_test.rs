use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use meeting_api_cell::{MeetingApiClient, MeetingApiError};
use shared_utils::test_utils::{MockBackendResponses, TestConfig};

async fn client_for(mock_server: &MockServer) -> MeetingApiClient {
    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();
    MeetingApiClient::new(&config)
}

#[tokio::test]
async fn create_meeting_sends_user_id_and_parses_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chime/create"))
        .and(body_json(json!({ "userId": "alice" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockBackendResponses::credentials_response("m1", "a1", "alice")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let credentials = client.create_meeting("alice").await.unwrap();

    assert_eq!(credentials.meeting.meeting_id, "m1");
    assert_eq!(credentials.attendee.attendee_id, "a1");
    assert_eq!(credentials.attendee.external_user_id.as_deref(), Some("alice"));
}

#[tokio::test]
async fn join_as_attendee_sends_meeting_and_user_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chime/attendee"))
        .and(body_json(json!({ "meetingId": "m1", "userId": "bob" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockBackendResponses::credentials_response("m1", "a2", "bob")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let credentials = client.join_as_attendee("m1", "bob").await.unwrap();

    assert_eq!(credentials.meeting.meeting_id, "m1");
    assert_eq!(credentials.attendee.attendee_id, "a2");
    assert_eq!(credentials.attendee.join_token, "token-a2");
}

#[tokio::test]
async fn delete_attendee_posts_both_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chime/attendee/delete"))
        .and(body_json(json!({ "meetingId": "m1", "attendeeId": "a1" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    assert!(client.delete_attendee("m1", "a1").await.is_ok());
}

#[tokio::test]
async fn non_success_status_maps_to_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chime/attendee"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(MockBackendResponses::error_response("meeting not found")),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let result = client.join_as_attendee("no-such-meeting", "bob").await;

    assert_matches!(result, Err(MeetingApiError::Server { status, .. }) => {
        assert_eq!(status.as_u16(), 404);
    });
}

#[tokio::test]
async fn undecodable_body_maps_to_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chime/create"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let result = client.create_meeting("alice").await;

    assert_matches!(result, Err(MeetingApiError::InvalidResponse { .. }));
}

#[tokio::test]
async fn unreachable_backend_maps_to_network_error() {
    // Port 9 (discard) is a safe never-listening target.
    let config = TestConfig::with_base_url("http://127.0.0.1:9").to_app_config();
    let client = MeetingApiClient::new(&config);

    let result = client.create_meeting("alice").await;
    assert_matches!(result, Err(MeetingApiError::Network(_)));
}
