mod common;

use common::utils::spawn_app;
use reqwest::header::{LOCATION, SET_COOKIE};
use uuid::Uuid;

#[tokio::test]
async fn callback_exchanges_a_code_for_session_cookies() {
    let app = spawn_app().await;
    let user_id = Uuid::new_v4();
    let code = app.login_code(user_id);

    let response = app
        .api_client
        .get(format!("{}/auth/callback?code={}", app.address, code))
        .header("x-forwarded-host", "pitchside.app")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 303);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/dashboard");

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
async fn callback_rejects_a_bogus_code() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(format!("{}/auth/callback?code=not-a-code", app.address))
        .header("x-forwarded-host", "pitchside.app")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 401);
}
