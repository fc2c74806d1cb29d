use jsonwebtoken::{encode, EncodingKey, Header};
use once_cell::sync::Lazy;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use uuid::Uuid;

use pitchside_backend::auth::session::SessionService;
use pitchside_backend::config::settings::{get_config, get_jwt_settings, Settings};
use pitchside_backend::middleware::auth::Claims;
use pitchside_backend::models::user::UserRole;
use pitchside_backend::run;
use pitchside_backend::services::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub settings: Settings,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// A valid session cookie header value for an arbitrary user.
    pub fn session_cookie(&self) -> String {
        let sessions = SessionService::new(&get_jwt_settings(&self.settings));
        let session = sessions
            .mint_session(Uuid::new_v4())
            .expect("Failed to mint session");
        format!("ps_session={}", session.access_token)
    }

    /// A refresh-only cookie header value (forces a rotation).
    pub fn refresh_cookie(&self) -> String {
        let sessions = SessionService::new(&get_jwt_settings(&self.settings));
        let session = sessions
            .mint_session(Uuid::new_v4())
            .expect("Failed to mint session");
        format!("ps_refresh={}", session.refresh_token)
    }

    /// A one-time login code redeemable at /auth/callback.
    pub fn login_code(&self, user_id: Uuid) -> String {
        let sessions = SessionService::new(&get_jwt_settings(&self.settings));
        sessions.issue_code(user_id).expect("Failed to issue code")
    }

    /// A bearer token accepted by the league admin middleware.
    pub fn admin_bearer(&self) -> String {
        self.bearer_with_role(UserRole::Admin)
    }

    /// A valid token for an ordinary member, which the admin scope
    /// must refuse.
    pub fn member_bearer(&self) -> String {
        self.bearer_with_role(UserRole::Member)
    }

    fn bearer_with_role(&self, role: UserRole) -> String {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            role,
            exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(
                self.settings.jwt.secret.expose_secret().as_bytes(),
            ),
        )
        .expect("Failed to encode token");
        format!("Bearer {}", token)
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(false).await
}

/// Like `spawn_app`, but with the production unrecognized-host
/// fallback enabled.
pub async fn spawn_app_in_production_mode() -> TestApp {
    spawn_app_with(true).await
}

async fn spawn_app_with(production: bool) -> TestApp {
    Lazy::force(&TRACING);

    let settings = get_config().expect("Failed to read configuration.");

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // Lazy pool: no test below actually reaches the database.
    let db_pool = PgPoolOptions::new()
        .connect_lazy(settings.database.connection_string().expose_secret())
        .expect("Failed to create lazy Postgres pool");

    let server = run(
        listener,
        db_pool,
        get_jwt_settings(&settings),
        settings.tenancy.clone(),
        production,
    )
    .expect("Failed to start server");
    tokio::spawn(server);

    // Redirects are assertions in these tests, so never follow them.
    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build test client");

    TestApp {
        address,
        settings,
        api_client,
    }
}
