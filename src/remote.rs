//! Remote repository provisioning on the hosting service.

use crate::config::Identity;
use crate::constants::{GITHUB_API_BASE, HTTP_TIMEOUT, PACKAGING_FIELD, PUSH_DELAY, REMOTE_NAME};
use crate::error::{Error, HostingError, Result};
use crate::project::ProjectSpec;
use crate::vcs::VersionControlClient;
use log::{debug, warn};
use std::path::Path;
use std::time::Duration;
use url::Url;

pub type HostingResult<T> = std::result::Result<T, HostingError>;

/// Hosting service operations used after the local repository exists.
///
/// Calls are fire-and-forget: only transport failures are reported.
pub trait RemoteHostingClient {
    /// Creates an empty repository owned by `identity`.
    fn create_repository(
        &self,
        identity: &Identity,
        name: &str,
        description: &str,
    ) -> HostingResult<()>;

    /// Turns on gem building for an existing repository.
    fn enable_packaging(&self, identity: &Identity, name: &str) -> HostingResult<()>;
}

/// [`RemoteHostingClient`] that posts form data over HTTP.
pub struct HttpHostingClient {
    base: Url,
    client: reqwest::blocking::Client,
}

impl HttpHostingClient {
    /// Client for the public hosting endpoints.
    ///
    /// # Errors
    /// * `HostingError` if the HTTP client cannot be built
    pub fn new() -> HostingResult<Self> {
        let base = Url::parse(GITHUB_API_BASE).map_err(|e| HostingError(e.to_string()))?;
        Self::with_base_url(base)
    }

    /// Client for a custom endpoint root, such as a test server.
    ///
    /// # Errors
    /// * `HostingError` if the HTTP client cannot be built
    pub fn with_base_url(base: Url) -> HostingResult<Self> {
        let client = reqwest::blocking::Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(Self { base, client })
    }

    /// Endpoint that creates repositories.
    pub fn create_url(&self) -> HostingResult<Url> {
        self.join("repositories")
    }

    /// Endpoint that updates settings of `user`'s repository `name`.
    pub fn update_url(&self, user: &str, name: &str) -> HostingResult<Url> {
        self.join(&format!("{user}/{name}/update"))
    }

    fn join(&self, path: &str) -> HostingResult<Url> {
        self.base.join(path).map_err(|e| HostingError(e.to_string()))
    }

    fn post_form(&self, url: Url, form: &[(&str, &str)]) -> HostingResult<()> {
        debug!("POST {url}");
        let response = self.client.post(url.clone()).form(form).send()?;
        let status = response.status();
        if !status.is_success() {
            warn!("{url} answered with {status}.");
        }
        Ok(())
    }
}

impl RemoteHostingClient for HttpHostingClient {
    fn create_repository(
        &self,
        identity: &Identity,
        name: &str,
        description: &str,
    ) -> HostingResult<()> {
        let url = self.create_url()?;
        self.post_form(
            url,
            &[
                ("login", identity.github_user.as_str()),
                ("token", identity.github_token.as_str()),
                ("repository[description]", description),
                ("repository[name]", name),
            ],
        )
    }

    fn enable_packaging(&self, identity: &Identity, name: &str) -> HostingResult<()> {
        let url = self.update_url(&identity.github_user, name)?;
        self.post_form(
            url,
            &[
                ("login", identity.github_user.as_str()),
                ("token", identity.github_token.as_str()),
                ("field", PACKAGING_FIELD),
                ("value", "1"),
            ],
        )
    }
}

/// [`RemoteHostingClient`] for local-only runs; every call fails.
#[derive(Debug, Default)]
pub struct DisabledHosting;

impl RemoteHostingClient for DisabledHosting {
    fn create_repository(
        &self,
        _identity: &Identity,
        _name: &str,
        _description: &str,
    ) -> HostingResult<()> {
        Err(HostingError("remote hosting is disabled for this run".to_string()))
    }

    fn enable_packaging(&self, _identity: &Identity, _name: &str) -> HostingResult<()> {
        Err(HostingError("remote hosting is disabled for this run".to_string()))
    }
}

/// Creates the hosted repository, pushes to it and enables packaging.
pub struct RemoteProvisioner<'a> {
    hosting: &'a dyn RemoteHostingClient,
    vcs: &'a dyn VersionControlClient,
    push_delay: Duration,
}

impl<'a> RemoteProvisioner<'a> {
    pub fn new(hosting: &'a dyn RemoteHostingClient, vcs: &'a dyn VersionControlClient) -> Self {
        Self { hosting, vcs, push_delay: PUSH_DELAY }
    }

    /// Overrides the pause between repository creation and the push.
    pub fn with_push_delay(mut self, push_delay: Duration) -> Self {
        self.push_delay = push_delay;
        self
    }

    /// Creates the remote repository and pushes `origin` to it.
    ///
    /// The hosting service gets a fixed delay to set the repository up; there is no
    /// readiness polling and no retry.
    ///
    /// # Errors
    /// * `Error::RemoteCallFailed` if the create call or the push fails
    pub fn create_and_push(&self, identity: &Identity, spec: &ProjectSpec) -> Result<()> {
        self.hosting
            .create_repository(identity, spec.name(), spec.summary())
            .map_err(|e| remote_call_failed("create repository", e))?;

        debug!("Waiting {:?} before pushing.", self.push_delay);
        std::thread::sleep(self.push_delay);

        self.push(spec.target_dir())
    }

    /// Enables gem building on the remote repository.
    ///
    /// # Errors
    /// * `Error::RemoteCallFailed` if the call fails
    pub fn enable_packaging(&self, identity: &Identity, spec: &ProjectSpec) -> Result<()> {
        self.hosting
            .enable_packaging(identity, spec.name())
            .map_err(|e| remote_call_failed("enable packaging", e))
    }

    /// Runs [`create_and_push`](Self::create_and_push) then
    /// [`enable_packaging`](Self::enable_packaging).
    pub fn create_push_and_enable(&self, identity: &Identity, spec: &ProjectSpec) -> Result<()> {
        self.create_and_push(identity, spec)?;
        self.enable_packaging(identity, spec)
    }

    fn push(&self, root: &Path) -> Result<()> {
        let root = root.canonicalize().map_err(Error::io(root))?;
        self.vcs
            .push(&root, REMOTE_NAME)
            .map_err(|e| remote_call_failed("push", e))
    }
}

fn remote_call_failed<E: std::fmt::Display>(operation: &str, err: E) -> Error {
    Error::RemoteCallFailed { operation: operation.to_string(), reason: err.to_string() }
}
