mod common;

use anyhow::Result;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{fail, ok, token_pair};
use robot_admin::auth::ACCESS_TOKEN_KEY;
use robot_admin::gateway::ApiRequest;
use robot_admin::services::AuthService;

#[tokio::test]
async fn attaches_stored_access_token() -> Result<()> {
    let h = common::logged_in().await?;

    Mock::given(method("GET"))
        .and(path("/v1/users/profile"))
        .and(header("Authorization", "Bearer A1"))
        .respond_with(ok(json!({"userid": 1, "username": "admin"})))
        .expect(1)
        .mount(&h.server)
        .await;

    let data = h.gateway.execute(&ApiRequest::get("/users/profile")).await?;
    assert_eq!(data["username"], "admin");
    Ok(())
}

#[tokio::test]
async fn anonymous_requests_carry_no_authorization_header() -> Result<()> {
    let h = common::harness(&[], |c| c).await?;

    Mock::given(method("POST"))
        .and(path("/v1/reset-password"))
        .respond_with(ok(json!({})))
        .mount(&h.server)
        .await;

    AuthService::new(h.gateway.clone()).reset_password("a@example.com").await?;

    let requests = h.server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
    assert!(requests[0].headers.contains_key("x-request-id"));
    Ok(())
}

#[tokio::test]
async fn login_persists_pair_used_by_next_request() -> Result<()> {
    let h = common::harness(&[], |c| c).await?;

    Mock::given(method("POST"))
        .and(path("/v1/login"))
        .and(body_json(json!({"username": "admin", "password": "secret"})))
        .respond_with(ok(token_pair("A1", "R1")))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/users/profile"))
        .and(header("Authorization", "Bearer A1"))
        .respond_with(ok(json!({"userid": 1, "username": "admin", "status": 1})))
        .expect(1)
        .mount(&h.server)
        .await;

    let auth = AuthService::new(h.gateway.clone());
    let pair = auth.login("admin", "secret").await?;
    assert_eq!(pair.access_token, "A1");
    assert_eq!(h.access_token().as_deref(), Some("A1"));
    assert_eq!(h.refresh_token().as_deref(), Some("R1"));

    let profile = auth.profile().await?;
    assert_eq!(profile.username, "admin");
    Ok(())
}

#[tokio::test]
async fn successful_calls_leave_the_store_alone() -> Result<()> {
    let h = common::logged_in().await?;

    Mock::given(method("GET"))
        .and(path("/v1/users/menu"))
        .respond_with(ok(json!({"list": []})))
        .mount(&h.server)
        .await;

    let before = h.store.snapshot();
    let menu = AuthService::new(h.gateway.clone()).menu().await?;
    assert!(menu.list.is_empty());
    assert_eq!(h.store.snapshot(), before);
    assert!(h.recorder.notices().is_empty());
    Ok(())
}

#[tokio::test]
async fn empty_stored_token_is_not_sent() -> Result<()> {
    let h = common::harness(&[(ACCESS_TOKEN_KEY, "")], |c| c).await?;

    Mock::given(method("GET"))
        .and(path("/v1/robots/3"))
        .respond_with(ok(json!({"id": 3, "name": "bot"})))
        .mount(&h.server)
        .await;

    let data: Value = h.gateway.send(ApiRequest::get("/robots/3")).await?;
    assert_eq!(data["id"], 3);

    let requests = h.server.received_requests().await.unwrap_or_default();
    assert!(!requests[0].headers.contains_key("authorization"));
    Ok(())
}

#[tokio::test]
async fn bad_login_is_reported_without_refreshing() -> Result<()> {
    let h = common::harness(&[], |c| c).await?;

    Mock::given(method("POST"))
        .and(path("/v1/login"))
        .respond_with(fail(401, 401, "Unauthorized", None))
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/refresh-token"))
        .respond_with(ok(token_pair("A2", "R2")))
        .expect(0)
        .mount(&h.server)
        .await;

    let err = AuthService::new(h.gateway.clone())
        .login("admin", "wrong")
        .await
        .unwrap_err();
    assert!(err.is_reported());
    assert!(err.is_unauthorized());
    assert_eq!(h.recorder.notices().len(), 1);
    assert!(h.recorder.redirects().is_empty());
    assert_eq!(h.access_token(), None);
    Ok(())
}

#[tokio::test]
async fn non_envelope_bodies_map_to_status_or_decode_errors() -> Result<()> {
    let h = common::logged_in().await?;

    Mock::given(method("GET"))
        .and(path("/v1/admin/apis"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/robots/9"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&h.server)
        .await;

    let err = h.gateway.execute(&ApiRequest::get("/admin/apis")).await.unwrap_err();
    assert!(err.is_reported());
    assert_eq!(
        h.recorder.notices()[0].title,
        "Unexpected response status: 502"
    );

    let err = h.gateway.execute(&ApiRequest::get("/robots/9")).await.unwrap_err();
    assert!(!err.is_reported());
    assert!(matches!(err, robot_admin::GatewayError::Decode(_)));
    assert_eq!(h.recorder.notices().len(), 1);
    Ok(())
}
