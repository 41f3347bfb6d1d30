//! Account endpoints driven over HTTP against a wiremock server.

use igapi::api::{HttpTransport, IgClient, Session};
use igapi::config::Config;
use igapi::error::IgError;
use igapi::service::{ContactPointUsage, Gender, ProfileEdit};

use reqwest::StatusCode;
use serde_json::json;
use wiremock::{
    Mock, MockServer, Request, ResponseTemplate,
    matchers::{body_string_contains, header, method, path, query_param},
};

fn session() -> Session {
    Session {
        user_id: "1234567890".to_string(),
        uuid: "uuid-1".to_string(),
        device_id: "android-0123456789abcdef".to_string(),
        phone_id: "phone-1".to_string(),
        username: "alice".to_string(),
        auth_token: Some("tok".to_string()),
        csrf_token: "csrf-1".to_string(),
    }
}

fn client(server: &MockServer) -> IgClient<HttpTransport> {
    let cfg = Config {
        api_url: format!("{}/api/v1/", server.uri()),
        ..Config::default()
    };
    let transport = HttpTransport::new(&cfg).unwrap().with_auth_token("tok");
    IgClient::new(transport, session())
}

fn ok_user() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "status": "ok",
        "user": { "pk": 1234567890, "username": "alice" }
    }))
}

#[tokio::test]
async fn test_send_sms_code_normalizes_phone_number() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/accounts/send_sms_code/"))
        .and(body_string_contains("phone_number=%2B34123456789"))
        .and(body_string_contains("_uuid=uuid-1"))
        .and(body_string_contains("_uid=1234567890"))
        .and(body_string_contains("_csrftoken=csrf-1"))
        .and(header("authorization", "Bearer IGT:2:tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client(&server)
        .account()
        .send_sms_code("+34 (123) 456-789")
        .await
        .unwrap();
    assert!(resp.envelope.is_ok());
}

#[tokio::test]
async fn test_edit_profile_opens_profile_then_posts_every_field() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/current_user/"))
        .and(query_param("edit", "true"))
        .respond_with(ok_user())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/accounts/edit_profile/"))
        .and(body_string_contains("external_url=https%3A%2F%2Fexample.com"))
        .and(body_string_contains("phone_number=555+0100"))
        .and(body_string_contains("username=alice"))
        .and(body_string_contains("first_name=Alice+A"))
        .and(body_string_contains("biography=hello"))
        .and(body_string_contains("email=alice%40example.com"))
        .and(body_string_contains("gender=2"))
        .respond_with(ok_user())
        .expect(1)
        .mount(&server)
        .await;

    let profile = ProfileEdit {
        external_url: "https://example.com".to_string(),
        phone_number: "555 0100".to_string(),
        full_name: "Alice A".to_string(),
        biography: "hello".to_string(),
        email: "alice@example.com".to_string(),
        gender: Gender::Female,
        new_username: None,
    };
    let resp = client(&server).account().edit_profile(&profile).await.unwrap();
    assert_eq!(resp.user.unwrap().username.as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_enable_two_factor_returns_security_info() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/accounts/enable_sms_two_factor/"))
        .and(body_string_contains("verification_code=123456"))
        .and(body_string_contains("phone_number=%2B15550100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "backup_codes": ["stale"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/accounts/account_security_info/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "backup_codes": ["1111 2222", "3333 4444"],
            "is_two_factor_enabled": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = client(&server)
        .account()
        .enable_two_factor_sms("+1 555-0100", "123456")
        .await
        .unwrap();
    assert_eq!(
        info.backup_codes,
        Some(vec!["1111 2222".to_string(), "3333 4444".to_string()])
    );
    assert_eq!(info.is_two_factor_enabled, Some(true));
}

#[tokio::test]
async fn test_biography_length_is_checked_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/accounts/set_biography/"))
        .respond_with(ok_user())
        .expect(3)
        .mount(&server)
        .await;

    let client = client(&server);
    let account = client.account();
    for bio in [String::new(), "b".repeat(149), "é".repeat(150)] {
        account.set_biography(&bio).await.unwrap();
    }

    let err = account.set_biography(&"b".repeat(151)).await.unwrap_err();
    assert!(matches!(err, IgError::InvalidArgument(_)));
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_upstream_error_status_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/accounts/set_private/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "status": "fail",
            "message": "login_required"
        })))
        .mount(&server)
        .await;

    let err = client(&server).account().set_private().await.unwrap_err();
    assert_eq!(err.upstream_status(), Some(StatusCode::FORBIDDEN));
    assert!(!err.is_validation());
    assert_eq!(
        err.to_string(),
        "Upstream error with status 403 Forbidden: login_required"
    );
}

#[tokio::test]
async fn test_fail_envelope_on_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users/check_username/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "fail",
            "message": "checkpoint_required"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .account()
        .check_username("bob")
        .await
        .unwrap_err();
    assert!(matches!(err, IgError::Endpoint { ref message } if message == "checkpoint_required"));
}

#[tokio::test]
async fn test_contact_point_prefill_skips_authorization() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/accounts/contact_point_prefill/"))
        .and(body_string_contains("usage=prefill"))
        .and(body_string_contains("phone_id=phone-1"))
        .and(|req: &Request| !req.headers.contains_key("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .account()
        .set_contact_point_prefill(ContactPointUsage::Prefill)
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&received[0].body);
    assert!(!body.contains("_uuid"));
    assert!(!body.contains("_uid"));
}

#[tokio::test]
async fn test_presence_status_uses_signed_get() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/get_presence_disabled/"))
        .and(query_param("signed_body", "SIGNATURE.{}"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "disabled": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client(&server).account().get_presence_status().await.unwrap();
    assert!(resp.envelope.is_ok());
}
