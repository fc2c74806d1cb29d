mod common;

use common::utils::{spawn_app, spawn_app_in_production_mode};
use reqwest::header::{COOKIE, LOCATION, SET_COOKIE};

#[tokio::test]
async fn marketing_page_passes_through_on_the_root_host() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(format!("{}/", app.address))
        .header("x-forwarded-host", "pitchside.app")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["page"], "marketing");
}

#[tokio::test]
async fn unauthenticated_dashboard_redirects_to_login_with_origin() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(format!("{}/dashboard", app.address))
        .header("x-forwarded-host", "pitchside.app")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 307);
    assert_eq!(
        response.headers().get(LOCATION).unwrap(),
        "/login?redirect=/dashboard"
    );
}

#[tokio::test]
async fn authenticated_login_page_redirects_to_dashboard() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(format!("{}/login", app.address))
        .header("x-forwarded-host", "pitchside.app")
        .header(COOKIE, app.session_cookie())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 307);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/dashboard");
}

#[tokio::test]
async fn authenticated_bare_root_still_redirects_away() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(format!("{}/", app.address))
        .header("x-forwarded-host", "pitchside.app")
        .header(COOKIE, app.session_cookie())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 307);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/login");
}

#[tokio::test]
async fn wildcard_host_is_rewritten_onto_the_tenant_route() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(format!("{}/dashboard", app.address))
        .header("x-forwarded-host", "fc1984.pitchside.app")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["tenant"], "fc1984");
    assert_eq!(body["data"]["page"], "dashboard");
}

#[tokio::test]
async fn legacy_host_mapping_wins_over_suffix_stripping() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(format!("{}/", app.address))
        .header("x-forwarded-host", "play.oldclub.example")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["tenant"], "oldclub");
}

#[tokio::test]
async fn unrecognized_host_passes_through() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(format!("{}/", app.address))
        .header("x-forwarded-host", "203.0.113.9:8080")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["page"], "marketing");
}

#[tokio::test]
async fn root_host_path_is_never_served_as_a_tenant_site() {
    let app = spawn_app().await;

    // /pricing is shaped like a slug but this request was never
    // rewritten, so the dynamic tenant route must not claim it.
    let response = app
        .api_client
        .get(format!("{}/pricing", app.address))
        .header("x-forwarded-host", "pitchside.app")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn production_mode_serves_unrecognized_hosts_the_root_site() {
    let app = spawn_app_in_production_mode().await;

    // Locally this host would pass through untouched; in production it
    // gets the root-domain policy, so the dashboard bounces to login.
    let response = app
        .api_client
        .get(format!("{}/dashboard", app.address))
        .header("x-forwarded-host", "203.0.113.9:8080")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 307);
    assert_eq!(
        response.headers().get(LOCATION).unwrap(),
        "/login?redirect=/dashboard"
    );
}

#[tokio::test]
async fn excluded_paths_are_never_rewritten() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(format!("{}/backend_health", app.address))
        .header("x-forwarded-host", "fc1984.pitchside.app")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn refresh_only_cookie_rotates_the_session_pair() {
    let app = spawn_app().await;

    // Session presence makes the bare root redirect; the rotated pair
    // must ride along on that same response.
    let response = app
        .api_client
        .get(format!("{}/", app.address))
        .header("x-forwarded-host", "pitchside.app")
        .header(COOKIE, app.refresh_cookie())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 307);
    let cookies: Vec<_> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    assert!(cookies.iter().any(|c| c.starts_with("ps_session=")));
    assert!(cookies.iter().any(|c| c.starts_with("ps_refresh=")));
}

#[tokio::test]
async fn valid_session_is_not_needlessly_rotated() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(format!("{}/pricing", app.address))
        .header("x-forwarded-host", "pitchside.app")
        .header(COOKIE, app.session_cookie())
        .send()
        .await
        .expect("Failed to execute request");

    // Pass-through (404 here, no /pricing page is registered) and no
    // Set-Cookie churn for a still-valid access token.
    assert_eq!(response.status(), 404);
    assert!(response.headers().get(SET_COOKIE).is_none());
}
