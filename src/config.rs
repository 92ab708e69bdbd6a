//! Operator identity handling for Jeweler.
//! Reads author and GitHub credentials from a git configuration file once, before
//! anything touches the filesystem.

use crate::constants::{GITHUB_TOKEN_KEY, GITHUB_USER_KEY, USER_EMAIL_KEY, USER_NAME_KEY};
use crate::error::{Error, Result, VcsError};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Author and hosting credentials of the person running the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_name: String,
    pub user_email: String,
    pub github_user: String,
    pub github_token: String,
}

/// Reads an [`Identity`] from a single git configuration file.
pub struct ConfigReader {
    path: Option<PathBuf>,
}

impl ConfigReader {
    /// Reader for the operator's global git configuration (`~/.gitconfig`).
    pub fn global() -> Self {
        Self { path: None }
    }

    /// Reader for an explicit git configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self { path: Some(path.as_ref().to_path_buf()) }
    }

    /// Loads the identity.
    ///
    /// Keys are checked in the order name, email, GitHub user, GitHub token,
    /// and the first one that is absent or empty aborts the read.
    ///
    /// # Errors
    /// * `Error::ConfigUnreadable` if the configuration file cannot be located, does not exist or cannot be parsed
    /// * `Error::MissingAuthorName` / `MissingAuthorEmail` / `MissingRemoteUsername` /
    ///   `MissingRemoteToken` for the first missing key
    pub fn read(&self) -> Result<Identity> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => git2::Config::find_global().map_err(|e| Error::ConfigUnreadable {
                config: "~/.gitconfig".to_string(),
                source: e.into(),
            })?,
        };
        let config_name = path.display().to_string();

        debug!("Reading identity from '{config_name}'.");

        // libgit2 treats a missing file as an empty configuration.
        if let Err(e) = fs::metadata(&path) {
            return Err(Error::ConfigUnreadable {
                config: config_name,
                source: VcsError(e.to_string()),
            });
        }

        let config = git2::Config::open(&path).map_err(|e| Error::ConfigUnreadable {
            config: config_name.clone(),
            source: VcsError::from(e),
        })?;

        let lookup = |key: &str| -> Option<String> {
            config.get_string(key).ok().filter(|value| !value.trim().is_empty())
        };

        let user_name = lookup(USER_NAME_KEY)
            .ok_or_else(|| Error::MissingAuthorName { config: config_name.clone() })?;
        let user_email = lookup(USER_EMAIL_KEY)
            .ok_or_else(|| Error::MissingAuthorEmail { config: config_name.clone() })?;
        let github_user = lookup(GITHUB_USER_KEY)
            .ok_or_else(|| Error::MissingRemoteUsername { config: config_name.clone() })?;
        let github_token = lookup(GITHUB_TOKEN_KEY)
            .ok_or_else(|| Error::MissingRemoteToken { config: config_name.clone() })?;

        Ok(Identity { user_name, user_email, github_user, github_token })
    }
}
