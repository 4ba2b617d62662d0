//! Configuration management for monthsync.
//!
//! Values come from environment variables, optionally seeded from `.env`
//! files. The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the platform config directory under `monthsync/`
//! 4. Built-in defaults for the Spotify endpoints
//!
//! `dotenv` never overrides a variable that is already set, so loading the
//! working-directory file first gives it precedence over the config-directory
//! one.

use std::{env, path::PathBuf};

use crate::{Error, Result};

pub const APP_DIR: &str = "monthsync";

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Permissions requested during authorization.
pub const SCOPES: &[&str] = &[
    "playlist-modify-private",
    "playlist-modify-public",
    "playlist-read-private",
    "user-library-read",
    "user-read-private",
    "user-read-email",
];

/// Loads `.env` files from the working directory and the config directory.
///
/// Missing files are not an error; the required variables may just as well
/// be exported in the shell.
pub fn load_env() {
    if let Ok(path) = dotenv::dotenv() {
        log::debug!("loaded environment from {}", path.display());
    }

    let path = config_dir().join(".env");
    if path.is_file() {
        match dotenv::from_path(&path) {
            Ok(()) => log::debug!("loaded environment from {}", path.display()),
            Err(e) => log::warn!("ignoring unreadable {}: {}", path.display(), e),
        }
    }
}

/// Returns `<platform config dir>/monthsync`.
///
/// - Linux: `~/.config/monthsync`
/// - macOS: `~/Library/Application Support/monthsync`
/// - Windows: `%APPDATA%/monthsync`
pub fn config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Returns the Spotify application's client ID (`SPOTIFY_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String> {
    required("SPOTIFY_CLIENT_ID")
}

/// Returns the Spotify application's client secret (`SPOTIFY_CLIENT_SECRET`).
///
/// The secret should never end up in logs or version control.
pub fn spotify_client_secret() -> Result<String> {
    required("SPOTIFY_CLIENT_SECRET")
}

/// Returns the OAuth redirect URI (`SPOTIFY_REDIRECT_URI`).
///
/// Must match a redirect URI registered for the application. Nothing listens
/// on it; the user copies the `code` parameter from the browser's address bar.
pub fn spotify_redirect_uri() -> Result<String> {
    required("SPOTIFY_REDIRECT_URI")
}

/// Returns the Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_api_url() -> String {
    optional("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Returns the authorization endpoint (`SPOTIFY_AUTH_URL`).
pub fn spotify_auth_url() -> String {
    optional("SPOTIFY_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string())
}

/// Returns the token endpoint (`SPOTIFY_TOKEN_URL`).
pub fn spotify_token_url() -> String {
    optional("SPOTIFY_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string())
}

/// Returns where the credential is stored (`MONTHSYNC_TOKEN_PATH`).
///
/// Defaults to `token.json` inside [`config_dir`].
pub fn token_path() -> PathBuf {
    optional("MONTHSYNC_TOKEN_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| config_dir().join("token.json"))
}

fn required(name: &str) -> Result<String> {
    optional(name).ok_or_else(|| Error::Config(format!("{name} must be set")))
}

fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
