use std::path::PathBuf;

use thiserror::Error;

/// Every failure a sync run can end with.
///
/// The CLI treats all of them as fatal except [`Error::CredentialNotFound`]
/// and [`Error::CorruptCredential`], which send the user through
/// authorization again.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no stored credential at {}", .0.display())]
    CredentialNotFound(PathBuf),

    #[error("stored credential at {} is malformed: {source}", .path.display())]
    CorruptCredential {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("authorization failed: {0}")]
    Auth(String),

    #[error("unexpected response from {context}: {message}")]
    Decode { context: String, message: String },

    #[error("{context} failed with status {status}: {message}")]
    Remote {
        context: String,
        status: u16,
        message: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid playlist name pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl Error {
    pub fn decode(context: impl Into<String>, message: impl ToString) -> Self {
        Error::Decode {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error means "authorize again" rather than "give up".
    pub fn needs_authorization(&self) -> bool {
        matches!(
            self,
            Error::CredentialNotFound(_) | Error::CorruptCredential { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
