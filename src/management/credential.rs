use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{Error, Result, types::Credential};

/// Reads and writes the single stored credential.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the credential.
    ///
    /// A missing file yields [`Error::CredentialNotFound`] and unparsable
    /// content yields [`Error::CorruptCredential`], so callers can tell
    /// "never authorized" from "broken state".
    pub async fn load(&self) -> Result<Credential> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::CredentialNotFound(self.path.clone()));
            }
            Err(e) => return Err(Error::Io(e)),
        };

        serde_json::from_str(&content).map_err(|source| Error::CorruptCredential {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes the credential, creating parent directories as needed.
    ///
    /// The content goes to a sibling temp file first which is then renamed
    /// over the target, so an interrupted write leaves the old file intact.
    pub async fn save(&self, credential: &Credential) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                async_fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(credential)
            .map_err(|e| Error::decode("credential", e))?;

        let tmp = self.tmp_path();
        async_fs::write(&tmp, json).await?;
        if let Err(e) = async_fs::rename(&tmp, &self.path).await {
            let _ = async_fs::remove_file(&tmp).await;
            return Err(Error::Io(e));
        }

        log::debug!("credential written to {}", self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "token.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
