use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    Error, Result,
    context::SyncContext,
    error, info,
    management::CredentialStore,
    spotify::{AuthSession, SpotifyTokenProvider, authorize_url},
    success, utils, warning,
};

/// Runs the authorization flow regardless of any stored credential.
pub async fn auth(ctx: &SyncContext) {
    let store = CredentialStore::new(&ctx.token_path);
    match authorize(ctx, store).await {
        Ok(_) => success!(
            "Authorization successful. Credential stored at {}",
            ctx.token_path.display()
        ),
        Err(e) => error!("Authorization failed: {}", e),
    }
}

/// Returns a session for the stored credential, authorizing interactively
/// when there is none or it cannot be read.
pub async fn session(ctx: &SyncContext) -> Result<AuthSession<SpotifyTokenProvider>> {
    let store = CredentialStore::new(&ctx.token_path);
    match store.load().await {
        Ok(credential) => Ok(AuthSession::new(
            SpotifyTokenProvider::new(ctx),
            store,
            credential,
        )),
        Err(e) if e.needs_authorization() => {
            if matches!(e, Error::CorruptCredential { .. }) {
                warning!("{}. Authorizing again.", e);
            } else {
                info!("No stored credential found, authorization required.");
            }
            authorize(ctx, store).await
        }
        Err(e) => Err(e),
    }
}

async fn authorize(
    ctx: &SyncContext,
    store: CredentialStore,
) -> Result<AuthSession<SpotifyTokenProvider>> {
    let url = authorize_url(ctx)?;

    info!("Visit the URL for the auth dialog:\n{}", url);
    if webbrowser::open(url.as_str()).is_err() {
        warning!("Failed to open browser. Please open the URL above manually.");
    }
    info!("Paste the code (or the whole redirected URL) and press enter:");

    let code = read_code().await?;
    AuthSession::establish(SpotifyTokenProvider::new(ctx), store, &code).await
}

async fn read_code() -> Result<String> {
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;

    utils::extract_code(&line)
        .ok_or_else(|| Error::Auth("no authorization code entered".to_string()))
}
