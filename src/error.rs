//! Error handling for Jeweler.
//! Every stage of the generation pipeline fails with its own variant, so the
//! operator can tell which step stopped the run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error raised by a [`VersionControlClient`](crate::vcs::VersionControlClient) backend.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct VcsError(pub String);

impl From<git2::Error> for VcsError {
    fn from(err: git2::Error) -> Self {
        VcsError(err.message().to_string())
    }
}

/// Error raised by a [`RemoteHostingClient`](crate::remote::RemoteHostingClient) backend.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct HostingError(pub String);

impl From<reqwest::Error> for HostingError {
    fn from(err: reqwest::Error) -> Self {
        HostingError(err.to_string())
    }
}

/// Custom error types for Jeweler operations.
///
/// Variants are grouped by pipeline stage: identity configuration, project
/// naming, layout, templates, local repository and remote hosting.
#[derive(Error, Debug)]
pub enum Error {
    #[error("No user.name found in {config}. Please tell git about yourself (see http://help.github.com/git-email-settings/ for details). For example: git config --global user.name \"mad voo\"")]
    MissingAuthorName { config: String },

    #[error("No user.email found in {config}. Please tell git about yourself (see http://help.github.com/git-email-settings/ for details). For example: git config --global user.email mad.vooo@gmail.com")]
    MissingAuthorEmail { config: String },

    #[error("No github.user found in {config}. Please tell git about your GitHub account (see http://github.com/blog/180-local-github-config for details). For example: git config --global github.user defunkt")]
    MissingRemoteUsername { config: String },

    #[error("No github.token found in {config}. Please tell git about your GitHub account (see http://github.com/blog/180-local-github-config for details). For example: git config --global github.token 6ef8395fecf207165f1a82178ae1b984")]
    MissingRemoteToken { config: String },

    #[error("Unable to read git configuration '{config}': {source}.")]
    ConfigUnreadable {
        config: String,
        #[source]
        source: VcsError,
    },

    #[error("No project name given.")]
    MissingProjectName,

    #[error("Invalid project name '{name}': only letters, digits, '-' and '_' are allowed.")]
    InvalidProjectName { name: String },

    /// Refuses to clobber anything already present at the target path
    #[error("The directory {target_dir} already exists, aborting. Maybe move it out of the way before continuing?")]
    TargetExists { target_dir: String },

    #[error("Template '{name}' does not exist.")]
    TemplateNotFound { name: String },

    #[error("Failed to render template '{name}': {source}.")]
    TemplateRender {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// The repository already exists or the backend could not create it
    #[error("Encountered an error during gitification of '{path}'. Maybe the repo already exists, or has already been pushed to? ({source})")]
    RepoInitFailed {
        path: String,
        #[source]
        source: VcsError,
    },

    #[error("There was some problem adding this directory to the git changeset: {0}.")]
    StageFailed(#[source] VcsError),

    #[error("Failed to commit the initial tree: {0}.")]
    CommitFailed(#[source] VcsError),

    #[error("Failed to add remote '{name}': {source}.")]
    RemoteAddFailed {
        name: String,
        #[source]
        source: VcsError,
    },

    /// Transport-level failure talking to the hosting service, or a failed push
    #[error("Remote call '{operation}' failed: {reason}.")]
    RemoteCallFailed { operation: String, reason: String },

    #[error("IO error at '{}': {source}.", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Wraps an IO error with the path it happened on.
    pub fn io<P: Into<PathBuf>>(path: P) -> impl FnOnce(io::Error) -> Error {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
