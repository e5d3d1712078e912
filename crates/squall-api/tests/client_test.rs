// Integration tests for `ApiClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use squall_api::types::{CreateCriteriaRequest, TokenRequest, UpdateProfileRequest};
use squall_api::{ApiClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn account_body(id: &str, role: &str) -> serde_json::Value {
    json!({
        "id": id,
        "email": format!("{id}@example.com"),
        "role": role,
        "approvalStatus": "ACTIVE",
        "emailVerified": true,
    })
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_token_exchange() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/token"))
        .and(body_json(json!({"username": "carla", "password": "hunter22"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "tok-123",
            "tokenType": "Bearer",
            "expiresIn": 3600,
        })))
        .mount(&server)
        .await;

    let resp = client
        .token(&TokenRequest {
            username: "carla".into(),
            password: "hunter22".into(),
        })
        .await
        .unwrap();

    assert_eq!(resp.access_token, "tok-123");
    assert_eq!(resp.token_type, "Bearer");
    assert_eq!(resp.expires_in, 3600);
}

#[tokio::test]
async fn test_bearer_token_attached_when_set() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(account_body("u1", "ROLE_USER")))
        .mount(&server)
        .await;

    client.set_token(Some(SecretString::from("tok-123")));
    let me = client.me().await.unwrap();

    assert_eq!(me.id, "u1");
    assert_eq!(me.role, "ROLE_USER");
    assert!(me.email_verified);
}

#[tokio::test]
async fn test_criteria_round_trip() {
    let (server, client) = setup().await;

    let stored = json!({
        "id": "c1",
        "userId": "u1",
        "name": "Bring a Jacket",
        "location": "Orlando",
        "latitude": 28.5383,
        "longitude": -81.3792,
        "temperatureThreshold": 60.0,
        "temperatureDirection": "BELOW",
        "temperatureUnit": "F",
        "monitorCurrent": true,
        "enabled": true,
    });

    Mock::given(method("POST"))
        .and(path("/api/criteria"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&stored))
        .mount(&server)
        .await;

    let req = CreateCriteriaRequest {
        user_id: "u1".into(),
        name: "Bring a Jacket".into(),
        location: "Orlando".into(),
        latitude: 28.5383,
        longitude: -81.3792,
        temperature_unit: "F".into(),
        monitor_current: true,
        monitor_forecast: true,
        forecast_window_hours: 48,
        once_per_event: true,
        rearm_window_minutes: 240,
        temperature_threshold: Some(60.0),
        temperature_direction: Some("BELOW".into()),
        max_wind_speed: None,
        rain_threshold: None,
        rain_threshold_type: None,
    };

    let created = client.create_criteria(&req).await.unwrap();
    assert_eq!(created.id, "c1");
    assert_eq!(created.temperature_threshold, Some(60.0));
    assert_eq!(created.temperature_direction.as_deref(), Some("BELOW"));
    assert_eq!(created.max_wind_speed, None);
}

#[tokio::test]
async fn test_create_criteria_omits_empty_predicate_groups() {
    let req = CreateCriteriaRequest {
        user_id: "u1".into(),
        name: "Windy".into(),
        location: "Chicago".into(),
        latitude: 41.8781,
        longitude: -87.6298,
        temperature_unit: "F".into(),
        monitor_current: true,
        monitor_forecast: false,
        forecast_window_hours: 24,
        once_per_event: true,
        rearm_window_minutes: 60,
        temperature_threshold: None,
        temperature_direction: None,
        max_wind_speed: Some(25.0),
        rain_threshold: None,
        rain_threshold_type: None,
    };

    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(value["maxWindSpeed"], json!(25.0));
    assert!(value.get("temperatureThreshold").is_none());
    assert!(value.get("rainThreshold").is_none());
}

#[tokio::test]
async fn test_delete_criteria_no_content() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/criteria/c9"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.delete_criteria("c9").await.unwrap();
}

#[tokio::test]
async fn test_current_weather_query_params() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/weather/conditions/current"))
        .and(query_param("latitude", "28.5383"))
        .and(query_param("longitude", "-81.3792"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "w1",
            "location": "Orlando",
            "temperature": 16.11,
            "windSpeed": 12.0,
            "precipitationProbability": 40.0,
        })))
        .mount(&server)
        .await;

    let weather = client.current_weather(28.5383, -81.3792).await.unwrap();
    assert_eq!(weather.temperature, Some(16.11));
    assert_eq!(weather.precipitation_probability, Some(40.0));
}

#[tokio::test]
async fn test_update_profile() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/users/me"))
        .and(body_json(json!({"name": "Carla", "phoneNumber": "+14075551234"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(account_body("u1", "ROLE_USER")))
        .mount(&server)
        .await;

    let updated = client
        .update_me(&UpdateProfileRequest {
            name: "Carla".into(),
            phone_number: "+14075551234".into(),
        })
        .await
        .unwrap();
    assert_eq!(updated.id, "u1");
}

#[tokio::test]
async fn test_admin_approve_posts_without_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/users/u7/approve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(account_body("u7", "ROLE_USER")))
        .mount(&server)
        .await;

    let approved = client.approve_user("u7").await.unwrap();
    assert_eq!(approved.id, "u7");
}

// ── Error-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_validation_error_surface() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/criteria"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": "Invalid input",
            "errors": [{"field": "latitude", "message": "out of range"}],
        })))
        .mount(&server)
        .await;

    let req = CreateCriteriaRequest {
        user_id: "u1".into(),
        name: "Bad".into(),
        location: "Nowhere".into(),
        latitude: 999.0,
        longitude: 0.0,
        temperature_unit: "F".into(),
        monitor_current: true,
        monitor_forecast: true,
        forecast_window_hours: 48,
        once_per_event: true,
        rearm_window_minutes: 240,
        temperature_threshold: Some(60.0),
        temperature_direction: Some("BELOW".into()),
        max_wind_speed: None,
        rain_threshold: None,
        rain_threshold_type: None,
    };

    let err = client.create_criteria(&req).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.user_message(), "Invalid input (latitude: out of range)");
}

#[tokio::test]
async fn test_unauthorized_classifies_as_auth_expired() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "title": "Unauthorized",
        })))
        .mount(&server)
        .await;

    let err = client.me().await.unwrap_err();
    assert!(err.is_auth_expired());
    assert_eq!(err.user_message(), "Unauthorized");
}

#[tokio::test]
async fn test_non_json_error_body_passes_through() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = client.me().await.unwrap_err();
    match &err {
        Error::Api {
            status, problem, ..
        } => {
            assert_eq!(*status, 502);
            assert!(problem.is_none());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.user_message(), "bad gateway");
}

#[tokio::test]
async fn test_success_body_that_is_not_json() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let err = client.me().await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>nope</html>"),
        other => panic!("unexpected error: {other:?}"),
    }
}
