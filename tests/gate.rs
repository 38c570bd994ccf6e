mod common;

use axum::http::StatusCode;
use serde_json::Value;
use uuid::Uuid;
use wecare_gate::domain::entities::Role;

fn assert_redirect(response: &axum_test::TestResponse, location: &str) {
    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), location);
}

#[tokio::test]
async fn test_no_session_goes_to_login() {
    let app = common::create_test_app();

    for path in ["/dashboard", "/doctor-dashboard/x", "/admin-dashboard", "/apis/v1"] {
        let response = app.server.get(path).await;
        assert_redirect(&response, "/login");
    }
}

#[tokio::test]
async fn test_invalid_or_expired_token_goes_to_login() {
    let app = common::create_test_app();
    let user_id = Uuid::new_v4();
    let expired = common::token_for_claims(&app, Role::Patient, user_id, -1);

    let response = app
        .server
        .get(&format!("/dashboard/{}", user_id))
        .add_header("Cookie", common::cookie_header(&expired))
        .await;
    assert_redirect(&response, "/login");

    let garbage = app
        .server
        .get("/dashboard")
        .add_header("Cookie", "token=abc.def.ghi")
        .await;
    assert_redirect(&garbage, "/login");
}

#[tokio::test]
async fn test_doctor_on_patient_tree_goes_home() {
    let app = common::create_test_app();
    let user_id = Uuid::new_v4();
    let token = common::token_for_claims(&app, Role::Doctor, user_id, 3600);

    let response = app
        .server
        .get("/dashboard/anything?tab=1")
        .add_header("Cookie", common::cookie_header(&token))
        .await;

    assert_redirect(&response, &format!("/doctor-dashboard/{}", user_id));
}

#[tokio::test]
async fn test_patient_on_doctor_tree_goes_home() {
    let app = common::create_test_app();
    let user_id = Uuid::new_v4();
    let token = common::token_for_claims(&app, Role::Patient, user_id, 3600);

    let response = app
        .server
        .get("/doctor-dashboard")
        .add_header("Cookie", common::cookie_header(&token))
        .await;

    assert_redirect(&response, &format!("/dashboard/{}", user_id));
}

#[tokio::test]
async fn test_generic_tree_always_goes_home() {
    let app = common::create_test_app();
    let user_id = Uuid::new_v4();
    let token = common::token_for_claims(&app, Role::Admin, user_id, 3600);

    let response = app
        .server
        .get(&format!("/apis/{}", user_id))
        .add_header("Cookie", common::cookie_header(&token))
        .await;

    assert_redirect(&response, &format!("/admin-dashboard/{}", user_id));
}

#[tokio::test]
async fn test_own_tree_without_id_inserts_it() {
    let app = common::create_test_app();
    let user_id = Uuid::new_v4();
    let token = common::token_for_claims(&app, Role::Patient, user_id, 3600);

    let root = app
        .server
        .get("/dashboard")
        .add_header("Cookie", common::cookie_header(&token))
        .await;
    assert_redirect(&root, &format!("/dashboard/{}", user_id));

    let nested = app
        .server
        .get("/dashboard/appointments/upcoming?page=2")
        .add_header("Cookie", common::cookie_header(&token))
        .await;
    assert_redirect(
        &nested,
        &format!("/dashboard/{}/appointments/upcoming?page=2", user_id),
    );
}

#[tokio::test]
async fn test_other_users_id_is_prefixed_not_replaced() {
    let app = common::create_test_app();
    let user_id = Uuid::new_v4();
    let other = Uuid::new_v4();
    let token = common::token_for_claims(&app, Role::Patient, user_id, 3600);

    let response = app
        .server
        .get(&format!("/dashboard/{}/records", other))
        .add_header("Cookie", common::cookie_header(&token))
        .await;

    assert_redirect(
        &response,
        &format!("/dashboard/{}/{}/records", user_id, other),
    );
}

#[tokio::test]
async fn test_canonical_path_passes_with_identity() {
    let app = common::create_test_app();
    let user = common::create_test_user(
        &app.users,
        "house@example.com",
        "5550002222",
        Role::Doctor,
    )
    .await;
    let token = common::token_for(&app, &user);
    let path = format!("/doctor-dashboard/{}/patients", user.id);

    let response = app
        .server
        .get(&path)
        .add_header("Cookie", common::cookie_header(&token))
        .add_header("x-session-user", r#"{"userId":"forged"}"#)
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["userId"], user.id.to_string());
    assert_eq!(json["role"], "DOCTOR");
    assert_eq!(json["path"], path);
}

#[tokio::test]
async fn test_redirect_target_is_canonical() {
    let app = common::create_test_app();
    let user_id = Uuid::new_v4();
    let token = common::token_for_claims(&app, Role::Admin, user_id, 3600);

    let first = app
        .server
        .get("/admin-dashboard/settings")
        .add_header("Cookie", common::cookie_header(&token))
        .await;
    first.assert_status(StatusCode::TEMPORARY_REDIRECT);
    let location = first.header("location").to_str().unwrap().to_string();

    let second = app
        .server
        .get(&location)
        .add_header("Cookie", common::cookie_header(&token))
        .await;
    second.assert_status_ok();
}

#[tokio::test]
async fn test_bearer_token_is_accepted() {
    let app = common::create_test_app();
    let user_id = Uuid::new_v4();
    let token = common::token_for_claims(&app, Role::Patient, user_id, 3600);

    let response = app
        .server
        .get(&format!("/dashboard/{}", user_id))
        .add_header("Authorization", format!("Bearer {}", token))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_lookalike_prefix_is_not_guarded() {
    let app = common::create_test_app();

    let response = app.server.get("/dashboardx").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_login_page_is_public() {
    let app = common::create_test_app();

    let response = app.server.get("/login").await;

    response.assert_status_ok();
    assert!(response.text().contains("<form"));
}
