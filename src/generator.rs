//! Generation pipeline orchestration.
//! Runs layout, repository setup and the optional remote steps in a fixed order,
//! stopping at the first failure.

use crate::config::Identity;
use crate::error::{Error, Result};
use crate::layout::LayoutBuilder;
use crate::project::{ProjectOptions, ProjectSpec};
use crate::remote::{RemoteHostingClient, RemoteProvisioner};
use crate::renderer::{Bindings, TemplateRenderer};
use crate::vcs::{RepoInitializer, VersionControlClient};
use log::debug;
use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

/// Owns the identity and project for a single run.
pub struct Generator<'a> {
    identity: Identity,
    spec: ProjectSpec,
    renderer: &'a dyn TemplateRenderer,
    vcs: &'a dyn VersionControlClient,
    hosting: &'a dyn RemoteHostingClient,
    push_delay: Option<Duration>,
}

impl<'a> Generator<'a> {
    /// Validates `options` against an already loaded identity.
    ///
    /// # Errors
    /// * `Error::MissingProjectName` / `Error::InvalidProjectName` for unusable names
    pub fn new(
        identity: Identity,
        options: ProjectOptions,
        renderer: &'a dyn TemplateRenderer,
        vcs: &'a dyn VersionControlClient,
        hosting: &'a dyn RemoteHostingClient,
    ) -> Result<Self> {
        let spec = ProjectSpec::new(options, &identity)?;
        Ok(Self { identity, spec, renderer, vcs, hosting, push_delay: None })
    }

    /// Overrides the pause before pushing to a newly created remote.
    pub fn with_push_delay(mut self, push_delay: Duration) -> Self {
        self.push_delay = Some(push_delay);
        self
    }

    pub fn spec(&self) -> &ProjectSpec {
        &self.spec
    }

    /// Runs the pipeline, printing confirmations to stdout.
    ///
    /// # Errors
    /// Whatever the failing stage reports; later stages are not attempted.
    pub fn run(&self) -> Result<()> {
        self.run_with(&mut io::stdout().lock())
    }

    /// Runs the pipeline, writing a confirmation to `out` after each completed stage.
    ///
    /// Files already written when a later step fails are left in place.
    ///
    /// # Errors
    /// Whatever the failing stage reports; later stages are not attempted.
    pub fn run_with<W: Write>(&self, out: &mut W) -> Result<()> {
        let spec = &self.spec;
        let bindings = Bindings::for_project(&self.identity, spec);

        debug!("Generating '{}' in '{}'.", spec.name(), spec.target_dir().display());
        LayoutBuilder::new(self.renderer).build(spec, &bindings)?;

        RepoInitializer::new(self.vcs, &self.identity).initialize_and_commit(
            spec.target_dir(),
            spec.remote_url(),
            &spec.commit_message(),
        )?;
        confirm(
            out,
            format_args!("Jeweler has prepared your gem in {}", spec.target_dir().display()),
        )?;

        if spec.create_remote() {
            let mut provisioner = RemoteProvisioner::new(self.hosting, self.vcs);
            if let Some(delay) = self.push_delay {
                provisioner = provisioner.with_push_delay(delay);
            }

            provisioner.create_and_push(&self.identity, spec)?;
            confirm(out, format_args!("Jeweler has pushed your repo to {}", spec.web_url()))?;

            provisioner.enable_packaging(&self.identity, spec)?;
            confirm(out, format_args!("Jeweler has enabled gem building for your repo"))?;
        }

        Ok(())
    }
}

fn confirm<W: Write>(out: &mut W, message: fmt::Arguments<'_>) -> Result<()> {
    writeln!(out, "{message}").map_err(Error::io("<stdout>"))
}
