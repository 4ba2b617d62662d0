use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::{
    Error, Result,
    context::SyncContext,
    management::CredentialStore,
    types::{Credential, TokenResponse},
    warning,
};

/// Builds the authorization URL the user has to visit.
///
/// After granting access the browser is redirected to the configured
/// redirect URI with a `code` query parameter, which is then handed to
/// [`AuthSession::establish`].
pub fn authorize_url(ctx: &SyncContext) -> Result<Url> {
    let scope = ctx.scopes.join(" ");
    Url::parse_with_params(
        &ctx.auth_url,
        &[
            ("client_id", ctx.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", ctx.redirect_uri.as_str()),
            ("scope", scope.as_str()),
            ("state", "state"),
        ],
    )
    .map_err(|e| Error::Config(format!("invalid authorization url {}: {}", ctx.auth_url, e)))
}

/// The token endpoint.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Trades a single-use authorization code for a credential.
    async fn exchange(&self, code: &str) -> Result<Credential>;

    /// Trades the credential's refresh token for a fresh credential.
    async fn refresh(&self, credential: &Credential) -> Result<Credential>;
}

/// Spotify's token endpoint, authenticating the application with its client
/// ID and secret.
pub struct SpotifyTokenProvider {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl SpotifyTokenProvider {
    pub fn new(ctx: &SyncContext) -> Self {
        Self {
            client: Client::new(),
            token_url: ctx.token_url.clone(),
            client_id: ctx.client_id.clone(),
            client_secret: ctx.client_secret.clone(),
            redirect_uri: ctx.redirect_uri.clone(),
        }
    }

    async fn request(
        &self,
        form: &[(&str, &str)],
        previous_refresh: Option<&str>,
    ) -> Result<Credential> {
        let res = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(form)
            .send()
            .await
            .map_err(|e| Error::Auth(e.to_string()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| Error::Auth(e.to_string()))?;
        if !status.is_success() {
            return Err(Error::Auth(format!(
                "token endpoint returned {}: {}",
                status,
                body.trim()
            )));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Auth(format!("malformed token response: {}", e)))?;

        Credential::from_response(token, previous_refresh, Utc::now())
            .ok_or_else(|| Error::Auth("token response carries no refresh token".to_string()))
    }
}

#[async_trait]
impl TokenProvider for SpotifyTokenProvider {
    async fn exchange(&self, code: &str) -> Result<Credential> {
        self.request(
            &[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ],
            None,
        )
        .await
    }

    async fn refresh(&self, credential: &Credential) -> Result<Credential> {
        self.request(
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", credential.refresh_token.as_str()),
            ],
            Some(credential.refresh_token.as_str()),
        )
        .await
    }
}

/// Holds the credential in use and keeps it fresh.
///
/// Whenever a refresh changes the access token, the new credential is
/// written to the store before the token is handed out. A failed write is
/// reported and otherwise ignored: the token in memory is still valid, the
/// next run may just have to authorize again.
pub struct AuthSession<P: TokenProvider> {
    provider: P,
    store: CredentialStore,
    credential: Mutex<Credential>,
}

impl<P: TokenProvider> AuthSession<P> {
    pub fn new(provider: P, store: CredentialStore, credential: Credential) -> Self {
        Self {
            provider,
            store,
            credential: Mutex::new(credential),
        }
    }

    /// Exchanges `code` once and persists the resulting credential.
    pub async fn establish(provider: P, store: CredentialStore, code: &str) -> Result<Self> {
        let credential = provider.exchange(code.trim()).await?;
        if let Err(e) = store.save(&credential).await {
            warning!("Authorized, but the credential could not be saved: {}", e);
        }
        Ok(Self::new(provider, store, credential))
    }

    /// Returns a valid access token, refreshing first if needed.
    pub async fn access_token(&self) -> Result<String> {
        self.access_token_at(Utc::now()).await
    }

    pub async fn access_token_at(&self, now: DateTime<Utc>) -> Result<String> {
        let mut current = self.credential.lock().await;
        if current.is_stale_at(now) {
            log::debug!("access token expires at {}, refreshing", current.expiry);
            let refreshed = self.provider.refresh(&current).await?;

            if refreshed.access_token != current.access_token {
                if let Err(e) = self.store.save(&refreshed).await {
                    warning!(
                        "Refreshed credential could not be saved to {}: {}",
                        self.store.path().display(),
                        e
                    );
                }
            }
            *current = refreshed;
        }

        Ok(current.access_token.clone())
    }

    pub async fn credential(&self) -> Credential {
        self.credential.lock().await.clone()
    }
}
