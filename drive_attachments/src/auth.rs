//! OAuth2 authentication for the Drive API.
//!
//! Three credential sources are supported:
//! - a service account key (JWT bearer grant),
//! - an authorized-user token cache (refresh-token grant, re-saved after refresh),
//! - a pre-issued access token that is used as-is.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{DriveError, Result};
use crate::models::{
    AuthorizedUserCredentials, CredentialsFile, ServiceAccountCredentials, TokenResponse,
};

/// Google OAuth2 token endpoint.
const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Google Drive API scope.
const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

/// Tokens this close to expiry are refreshed.
const EXPIRY_BUFFER: Duration = Duration::from_secs(60);

/// JWT claims for service account authentication.
#[derive(Debug, Serialize)]
struct Claims {
    iss: String,   // Issuer (service account email)
    scope: String, // OAuth scope
    aud: String,   // Audience (token endpoint)
    exp: u64,      // Expiration time
    iat: u64,      // Issued at
}

/// Cached access token with expiration.
#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: SystemTime,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        self.expires_at > SystemTime::now() + EXPIRY_BUFFER
    }
}

enum Source {
    ServiceAccount(ServiceAccountCredentials),
    AuthorizedUser {
        credentials: AuthorizedUserCredentials,
        cache_path: Option<PathBuf>,
    },
    AccessToken,
}

/// Hands out bearer tokens, refreshing them when they expire.
#[derive(Clone)]
pub struct Authenticator {
    source: Arc<Source>,
    client: Client,
    cached_token: Arc<RwLock<Option<CachedToken>>>,
}

impl Authenticator {
    /// Load a service account key or an authorized-user token cache.
    ///
    /// For authorized users the file doubles as the token cache and is
    /// rewritten whenever the access token is refreshed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match serde_json::from_str::<CredentialsFile>(&content)? {
            CredentialsFile::ServiceAccount(credentials) => Ok(Self::service_account(credentials)),
            CredentialsFile::AuthorizedUser(credentials) => {
                Ok(Self::authorized_user(credentials, Some(path.to_path_buf())))
            }
        }
    }

    pub fn service_account(credentials: ServiceAccountCredentials) -> Self {
        Self::with_source(Source::ServiceAccount(credentials), None)
    }

    /// Authorized-user credentials; a still-valid cached access token is reused.
    pub fn authorized_user(
        credentials: AuthorizedUserCredentials,
        cache_path: Option<PathBuf>,
    ) -> Self {
        let seed = match (&credentials.access_token, credentials.expiry) {
            (Some(token), Some(expiry)) => Some(CachedToken {
                access_token: token.clone(),
                expires_at: UNIX_EPOCH + Duration::from_secs(expiry),
            }),
            _ => None,
        };
        Self::with_source(
            Source::AuthorizedUser {
                credentials,
                cache_path,
            },
            seed,
        )
    }

    /// A pre-issued bearer token. It is never refreshed.
    pub fn from_access_token(token: impl Into<String>) -> Self {
        let seed = CachedToken {
            access_token: token.into(),
            expires_at: SystemTime::now() + Duration::from_secs(365 * 24 * 3600),
        };
        Self::with_source(Source::AccessToken, Some(seed))
    }

    fn with_source(source: Source, seed: Option<CachedToken>) -> Self {
        Self {
            source: Arc::new(source),
            client: Client::new(),
            cached_token: Arc::new(RwLock::new(seed)),
        }
    }

    /// Get a valid access token, refreshing if necessary.
    pub async fn get_access_token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if token.is_fresh() || matches!(*self.source, Source::AccessToken) {
                    return Ok(token.access_token.clone());
                }
            }
        }

        let new_token = self.refresh_token().await?;

        {
            let mut cached = self.cached_token.write().await;
            *cached = Some(new_token.clone());
        }

        Ok(new_token.access_token)
    }

    async fn refresh_token(&self) -> Result<CachedToken> {
        match self.source.as_ref() {
            Source::ServiceAccount(credentials) => self.exchange_jwt(credentials).await,
            Source::AuthorizedUser {
                credentials,
                cache_path,
            } => {
                let token = self.exchange_refresh_token(credentials).await?;
                if let Some(path) = cache_path {
                    save_token_cache(path, credentials, &token)?;
                }
                Ok(token)
            }
            Source::AccessToken => Err(DriveError::AuthenticationError(
                "access token expired and cannot be refreshed".to_string(),
            )),
        }
    }

    /// Exchange a signed JWT assertion for an access token.
    async fn exchange_jwt(&self, credentials: &ServiceAccountCredentials) -> Result<CachedToken> {
        let now = unix_now()?;
        let token_uri = credentials.token_uri.as_deref().unwrap_or(TOKEN_URI);

        let claims = Claims {
            iss: credentials.client_email.clone(),
            scope: DRIVE_SCOPE.to_string(),
            aud: token_uri.to_string(),
            iat: now,
            exp: now + 3600, // 1 hour
        };

        let header = Header::new(Algorithm::RS256);
        let key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())?;
        let jwt = encode(&header, &claims, &key)?;

        let params = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", jwt.as_str()),
        ];
        debug!(client_email = %credentials.client_email, "requesting service account token");
        self.request_token(token_uri, &params).await
    }

    async fn exchange_refresh_token(
        &self,
        credentials: &AuthorizedUserCredentials,
    ) -> Result<CachedToken> {
        let token_uri = credentials.token_uri.as_deref().unwrap_or(TOKEN_URI);
        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("refresh_token", credentials.refresh_token.as_str()),
        ];
        info!("refreshing expired user access token");
        self.request_token(token_uri, &params).await
    }

    async fn request_token(&self, token_uri: &str, params: &[(&str, &str)]) -> Result<CachedToken> {
        let response = self.client.post(token_uri).form(params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DriveError::TokenRefreshError(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let token_response: TokenResponse = response.json().await?;
        let expires_at = SystemTime::now() + Duration::from_secs(token_response.expires_in);

        Ok(CachedToken {
            access_token: token_response.access_token,
            expires_at,
        })
    }
}

fn unix_now() -> Result<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| DriveError::AuthenticationError(format!("system clock error: {}", e)))
}

/// Rewrite the authorized-user file with the freshly issued token.
fn save_token_cache(
    path: &Path,
    credentials: &AuthorizedUserCredentials,
    token: &CachedToken,
) -> Result<()> {
    let expiry = token
        .expires_at
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .ok();
    let updated = CredentialsFile::AuthorizedUser(AuthorizedUserCredentials {
        access_token: Some(token.access_token.clone()),
        expiry,
        ..credentials.clone()
    });
    fs::write(path, serde_json::to_string_pretty(&updated)?)?;
    debug!(path = %path.display(), "saved refreshed token cache");
    Ok(())
}
