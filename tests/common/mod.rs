#![allow(dead_code)]

use jeweler::config::Identity;
use jeweler::error::{HostingError, VcsError};
use jeweler::remote::RemoteHostingClient;
use jeweler::vcs::{Git2Client, VersionControlClient};
use std::cell::RefCell;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

static CWD_LOCK: Mutex<()> = Mutex::new(());

/// Serializes tests that switch the process working directory.
pub fn cwd_lock() -> MutexGuard<'static, ()> {
    CWD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn identity() -> Identity {
    Identity {
        user_name: "Ada Lovelace".to_string(),
        user_email: "ada@example.com".to_string(),
        github_user: "ada".to_string(),
        github_token: "0123456789abcdef".to_string(),
    }
}

/// Version control client that records calls and delegates to libgit2.
///
/// `fail_on` makes the named operation fail without touching the repository.
#[derive(Default)]
pub struct RecordingVcs {
    pub calls: RefCell<Vec<String>>,
    pub cwd_seen: RefCell<Vec<std::path::PathBuf>>,
    pub fail_on: Option<&'static str>,
    inner: Git2Client,
}

impl RecordingVcs {
    pub fn failing_on(operation: &'static str) -> Self {
        Self { fail_on: Some(operation), ..Default::default() }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, operation: &'static str) -> Result<(), VcsError> {
        self.calls.borrow_mut().push(operation.to_string());
        if let Ok(cwd) = std::env::current_dir() {
            self.cwd_seen.borrow_mut().push(cwd);
        }
        if self.fail_on == Some(operation) {
            return Err(VcsError(format!("{operation} refused")));
        }
        Ok(())
    }
}

impl VersionControlClient for RecordingVcs {
    fn init(&self, root: &Path) -> Result<(), VcsError> {
        self.record("init")?;
        self.inner.init(root)
    }

    fn add_all(&self, root: &Path) -> Result<(), VcsError> {
        self.record("add_all")?;
        self.inner.add_all(root)
    }

    fn commit(&self, root: &Path, message: &str, author: &Identity) -> Result<(), VcsError> {
        self.record("commit")?;
        self.inner.commit(root, message, author)
    }

    fn add_remote(&self, root: &Path, name: &str, url: &str) -> Result<(), VcsError> {
        self.record("add_remote")?;
        self.inner.add_remote(root, name, url)
    }

    fn push(&self, _root: &Path, remote: &str) -> Result<(), VcsError> {
        self.calls.borrow_mut().push(format!("push {remote}"));
        if self.fail_on == Some("push") {
            return Err(VcsError("push refused".to_string()));
        }
        Ok(())
    }
}

/// Hosting client that only records what it was asked to do.
#[derive(Default)]
pub struct RecordingHosting {
    pub calls: RefCell<Vec<String>>,
    pub fail_on: Option<&'static str>,
}

impl RecordingHosting {
    pub fn failing_on(operation: &'static str) -> Self {
        Self { fail_on: Some(operation), ..Default::default() }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, operation: &'static str, call: String) -> Result<(), HostingError> {
        self.calls.borrow_mut().push(call);
        if self.fail_on == Some(operation) {
            return Err(HostingError("connection refused".to_string()));
        }
        Ok(())
    }
}

impl RemoteHostingClient for RecordingHosting {
    fn create_repository(
        &self,
        identity: &Identity,
        name: &str,
        description: &str,
    ) -> Result<(), HostingError> {
        self.record(
            "create",
            format!("create {} {} {}", identity.github_user, name, description),
        )
    }

    fn enable_packaging(&self, identity: &Identity, name: &str) -> Result<(), HostingError> {
        self.record("enable", format!("enable {} {}", identity.github_user, name))
    }
}
