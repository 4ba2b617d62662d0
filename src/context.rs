use std::path::PathBuf;

use crate::{Result, config};

/// Everything a run needs to know about its environment.
///
/// Built once at process start and handed to the components that need it,
/// instead of each of them reading the environment on its own.
#[derive(Debug, Clone)]
pub struct SyncContext {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub token_path: PathBuf,
}

impl SyncContext {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: config::spotify_client_id()?,
            client_secret: config::spotify_client_secret()?,
            redirect_uri: config::spotify_redirect_uri()?,
            scopes: config::SCOPES.iter().map(|s| s.to_string()).collect(),
            api_url: config::spotify_api_url(),
            auth_url: config::spotify_auth_url(),
            token_url: config::spotify_token_url(),
            token_path: config::token_path(),
        })
    }
}
