// src/auth/session.rs
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::jwt::JwtSettings;

pub const SESSION_COOKIE: &str = "ps_session";
pub const REFRESH_COOKIE: &str = "ps_refresh";

/// Refresh tokens outlive access tokens by this many days.
const REFRESH_TOKEN_DAYS: i64 = 30;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub sub: String,
    /// Token kind: "access", "refresh" or "code" (one-time login code).
    pub typ: String,
    pub exp: usize,
    pub iat: usize,
}

impl SessionClaims {
    /// Parse the user ID from the claims subject field.
    /// Returns None if the UUID is invalid.
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// An active session plus the cookie pair that represents it. When
/// `rotated` is set the tokens were re-minted and must be written back
/// to the client.
#[derive(Debug, Clone)]
pub struct RefreshedSession {
    pub user_id: Uuid,
    pub access_token: String,
    pub refresh_token: String,
    pub rotated: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token handling failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("invalid login code")]
    InvalidCode,
}

/// Validates and refreshes browser sessions from the cookie pair.
///
/// Backed by HS256 JWTs signed with the application secret. The
/// refresh call is async because deployments that delegate to a remote
/// session authority suspend here; the local implementation is
/// CPU-only.
pub struct SessionService {
    secret: String,
    expiration_hours: i64,
}

impl SessionService {
    pub fn new(jwt_settings: &JwtSettings) -> Self {
        Self {
            secret: jwt_settings.secret.expose_secret().to_string(),
            expiration_hours: jwt_settings.expiration_hours,
        }
    }

    /// Validate the inbound cookie pair.
    ///
    /// A valid access token yields the session as-is. An expired or
    /// missing access token with a valid refresh token re-mints both
    /// tokens. Neither valid is "no active session", not an error.
    pub async fn refresh(
        &self,
        access: Option<&str>,
        refresh: Option<&str>,
    ) -> Result<Option<RefreshedSession>, AuthError> {
        if let Some(token) = access {
            if let Some(claims) = self.decode_kind(token, "access") {
                if let Some(user_id) = claims.user_id() {
                    return Ok(Some(RefreshedSession {
                        user_id,
                        access_token: token.to_string(),
                        refresh_token: refresh.unwrap_or_default().to_string(),
                        rotated: false,
                    }));
                }
            }
        }

        if let Some(token) = refresh {
            if let Some(claims) = self.decode_kind(token, "refresh") {
                if let Some(user_id) = claims.user_id() {
                    let mut session = self.mint_session(user_id)?;
                    session.rotated = true;
                    return Ok(Some(session));
                }
            }
        }

        Ok(None)
    }

    /// Exchange a one-time login code for a full session, used by the
    /// post-login callback.
    pub async fn exchange_code(&self, code: &str) -> Result<RefreshedSession, AuthError> {
        let claims = self.decode_kind(code, "code").ok_or(AuthError::InvalidCode)?;
        let user_id = claims.user_id().ok_or(AuthError::InvalidCode)?;
        let mut session = self.mint_session(user_id)?;
        session.rotated = true;
        Ok(session)
    }

    /// Mint a fresh access/refresh pair for a user.
    pub fn mint_session(&self, user_id: Uuid) -> Result<RefreshedSession, AuthError> {
        let access_token =
            self.encode_kind(user_id, "access", Duration::hours(self.expiration_hours))?;
        let refresh_token =
            self.encode_kind(user_id, "refresh", Duration::days(REFRESH_TOKEN_DAYS))?;
        Ok(RefreshedSession {
            user_id,
            access_token,
            refresh_token,
            rotated: false,
        })
    }

    /// Issue a short-lived one-time code redeemable via `exchange_code`.
    pub fn issue_code(&self, user_id: Uuid) -> Result<String, AuthError> {
        self.encode_kind(user_id, "code", Duration::minutes(5))
    }

    fn encode_kind(
        &self,
        user_id: Uuid,
        typ: &str,
        lifetime: Duration,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            typ: typ.to_string(),
            exp: (now + lifetime).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?)
    }

    fn decode_kind(&self, token: &str, typ: &str) -> Option<SessionClaims> {
        let data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .ok()?;
        if data.claims.typ == typ {
            Some(data.claims)
        } else {
            None
        }
    }
}
