//! Local repository setup for Jeweler.
//! [`RepoInitializer`] drives a [`VersionControlClient`] through init, stage, commit
//! and remote registration; [`Git2Client`] is the libgit2-backed client.

use crate::config::Identity;
use crate::constants::REMOTE_NAME;
use crate::error::{Error, Result, VcsError};
use log::{debug, warn};
use std::cell::Cell;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

pub type VcsResult<T> = std::result::Result<T, VcsError>;

/// Version control operations needed to set up and publish a new repository.
pub trait VersionControlClient {
    /// Creates a repository at `root`. Fails if one already exists there.
    fn init(&self, root: &Path) -> VcsResult<()>;

    /// Stages every non-ignored file under `root`.
    fn add_all(&self, root: &Path) -> VcsResult<()>;

    /// Commits the staged tree as `author`.
    fn commit(&self, root: &Path, message: &str, author: &Identity) -> VcsResult<()>;

    /// Registers a named remote without contacting it.
    fn add_remote(&self, root: &Path, name: &str, url: &str) -> VcsResult<()>;

    /// Pushes the current branch to the named remote.
    fn push(&self, root: &Path, remote: &str) -> VcsResult<()>;
}

/// Steps of local repository setup, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoState {
    Uninitialized,
    Initialized,
    Staged,
    Committed,
    RemoteAdded,
}

/// Switches the process working directory and restores it when dropped.
pub struct WorkingDirGuard {
    previous: PathBuf,
}

impl WorkingDirGuard {
    /// Changes into `dir`, remembering the current working directory.
    pub fn enter<P: AsRef<Path>>(dir: P) -> io::Result<Self> {
        let previous = std::env::current_dir()?;
        std::env::set_current_dir(dir.as_ref())?;
        debug!("Entered '{}'.", dir.as_ref().display());
        Ok(Self { previous })
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            warn!("Could not return to '{}': {}", self.previous.display(), e);
        }
    }
}

/// Turns a freshly generated tree into a committed repository.
pub struct RepoInitializer<'a> {
    client: &'a dyn VersionControlClient,
    identity: &'a Identity,
}

impl<'a> RepoInitializer<'a> {
    pub fn new(client: &'a dyn VersionControlClient, identity: &'a Identity) -> Self {
        Self { client, identity }
    }

    /// Initializes, stages everything, commits and adds `origin`, without pushing.
    ///
    /// Runs with the working directory switched to `root`; the previous working
    /// directory is restored on every exit path.
    ///
    /// # Errors
    /// * `Error::RepoInitFailed` if a repository already exists or init fails
    /// * `Error::StageFailed`, `Error::CommitFailed`, `Error::RemoteAddFailed` for later steps
    /// * `Error::Io` if `root` cannot be resolved or entered
    pub fn initialize_and_commit(
        &self,
        root: &Path,
        remote_url: &str,
        commit_message: &str,
    ) -> Result<RepoState> {
        let root = root.canonicalize().map_err(Error::io(root))?;
        let _guard = WorkingDirGuard::enter(&root).map_err(Error::io(&root))?;

        let mut state = RepoState::Uninitialized;
        debug!("Repository state: {state:?}.");

        self.client.init(&root).map_err(|source| Error::RepoInitFailed {
            path: root.display().to_string(),
            source,
        })?;
        state = advance(state, RepoState::Initialized);

        self.client.add_all(&root).map_err(Error::StageFailed)?;
        state = advance(state, RepoState::Staged);

        self.client
            .commit(&root, commit_message, self.identity)
            .map_err(Error::CommitFailed)?;
        state = advance(state, RepoState::Committed);

        if let Err(source) = self.client.add_remote(&root, REMOTE_NAME, remote_url) {
            warn!("Encountered an error while adding {REMOTE_NAME} remote. Maybe you have some weird settings in ~/.gitconfig?");
            return Err(Error::RemoteAddFailed { name: REMOTE_NAME.to_string(), source });
        }
        state = advance(state, RepoState::RemoteAdded);

        Ok(state)
    }
}

fn advance(from: RepoState, to: RepoState) -> RepoState {
    debug!("Repository state: {from:?} -> {to:?}.");
    to
}

/// [`VersionControlClient`] backed by libgit2.
#[derive(Debug, Default)]
pub struct Git2Client;

impl Git2Client {
    pub fn new() -> Self {
        Self
    }

    fn open(root: &Path) -> VcsResult<git2::Repository> {
        Ok(git2::Repository::open(root)?)
    }

    /// Offers the SSH agent once, then `~/.ssh/id_rsa` once, then gives up.
    ///
    /// libgit2 calls back again after every rejected credential, so the callback
    /// keeps count to stop the push from looping.
    fn remote_callbacks<'cb>() -> git2::RemoteCallbacks<'cb> {
        let mut callbacks = git2::RemoteCallbacks::new();
        let attempts = Cell::new(0u8);
        callbacks.credentials(move |_url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");
            let attempt = attempts.get();
            attempts.set(attempt.saturating_add(1));
            next_credential(attempt, username, allowed_types, std::env::var_os("HOME"))
        });
        callbacks
    }
}

/// Credential to offer on the given (zero-based) attempt.
fn next_credential(
    attempt: u8,
    username: &str,
    allowed_types: git2::CredentialType,
    home: Option<OsString>,
) -> std::result::Result<git2::Cred, git2::Error> {
    if !allowed_types.contains(git2::CredentialType::SSH_KEY) {
        return match attempt {
            0 => git2::Cred::default(),
            _ => Err(git2::Error::from_str("authentication failed")),
        };
    }
    match (attempt, home) {
        (0, _) => git2::Cred::ssh_key_from_agent(username),
        (1, Some(home)) => git2::Cred::ssh_key(
            username,
            None,
            &Path::new(&home).join(".ssh").join("id_rsa"),
            None,
        ),
        _ => Err(git2::Error::from_str("authentication failed")),
    }
}

impl VersionControlClient for Git2Client {
    fn init(&self, root: &Path) -> VcsResult<()> {
        if git2::Repository::open(root).is_ok() {
            return Err(VcsError(format!(
                "a git repository already exists at '{}'",
                root.display()
            )));
        }
        debug!("Initializing repository at '{}'.", root.display());
        git2::Repository::init(root)?;
        Ok(())
    }

    fn add_all(&self, root: &Path) -> VcsResult<()> {
        let repo = Self::open(root)?;
        let mut index = repo.index()?;
        index.add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)?;
        index.write()?;
        debug!("Staged {} entries.", index.len());
        Ok(())
    }

    fn commit(&self, root: &Path, message: &str, author: &Identity) -> VcsResult<()> {
        let repo = Self::open(root)?;
        let mut index = repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;
        let signature = git2::Signature::now(&author.user_name, &author.user_email)?;
        let oid = repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &[])?;
        debug!("Created commit {oid}.");
        Ok(())
    }

    fn add_remote(&self, root: &Path, name: &str, url: &str) -> VcsResult<()> {
        let repo = Self::open(root)?;
        repo.remote(name, url)?;
        debug!("Added remote '{name}' -> '{url}'.");
        Ok(())
    }

    fn push(&self, root: &Path, remote: &str) -> VcsResult<()> {
        let repo = Self::open(root)?;
        let head = repo.head()?;
        let refname = head
            .name()
            .ok_or_else(|| VcsError("HEAD is not a valid UTF-8 reference".to_string()))?
            .to_string();

        let mut push_opts = git2::PushOptions::new();
        push_opts.remote_callbacks(Self::remote_callbacks());

        debug!("Pushing '{refname}' to '{remote}'.");
        let mut remote = repo.find_remote(remote)?;
        remote.push(&[format!("{refname}:{refname}")], Some(&mut push_opts))?;
        Ok(())
    }
}
