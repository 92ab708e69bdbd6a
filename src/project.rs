//! Project description: what the operator asked for plus everything derived from it.

use crate::config::Identity;
use crate::constants::{DEFAULT_SUMMARY, GITHUB_HOST, SOURCE_EXT};
use crate::error::Result;
use crate::naming::{constant_name, file_name_prefix, validate_project_name};
use clap::ValueEnum;
use std::fmt;
use std::path::{Path, PathBuf};

/// Test framework the generated gem is set up for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TestStyle {
    /// Test::Unit with shoulda, tests under `test/`
    #[default]
    Shoulda,
    /// Bacon specs under `spec/`
    Bacon,
}

impl TestStyle {
    /// Directory (and file suffix) used for tests of this style.
    pub fn test_dir_name(self) -> &'static str {
        match self {
            TestStyle::Shoulda => "test",
            TestStyle::Bacon => "spec",
        }
    }

    /// Directory holding this style's templates.
    pub fn template_dir_name(self) -> &'static str {
        match self {
            TestStyle::Shoulda => "shoulda",
            TestStyle::Bacon => "bacon",
        }
    }
}

impl fmt::Display for TestStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template_dir_name())
    }
}

/// Options as given by the operator, before validation.
#[derive(Debug, Clone, Default)]
pub struct ProjectOptions {
    pub name: String,
    pub directory: Option<PathBuf>,
    pub summary: Option<String>,
    pub test_style: TestStyle,
    pub create_remote: bool,
}

impl ProjectOptions {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into(), ..Default::default() }
    }
}

/// Validated project description with all derived names and paths.
#[derive(Debug, Clone)]
pub struct ProjectSpec {
    name: String,
    target_dir: PathBuf,
    summary: String,
    test_style: TestStyle,
    create_remote: bool,
    constant_name: String,
    file_name_prefix: String,
    lib_dir: PathBuf,
    test_dir: PathBuf,
    remote_url: String,
    web_url: String,
}

impl ProjectSpec {
    /// Validates the options and computes every derived field.
    ///
    /// # Errors
    /// * `Error::MissingProjectName` / `Error::InvalidProjectName` for unusable names
    pub fn new(options: ProjectOptions, identity: &Identity) -> Result<Self> {
        validate_project_name(&options.name)?;

        let name = options.name;
        let target_dir = options.directory.unwrap_or_else(|| PathBuf::from(&name));
        let test_style = options.test_style;
        let user = &identity.github_user;

        Ok(Self {
            lib_dir: target_dir.join("lib"),
            test_dir: target_dir.join(test_style.test_dir_name()),
            constant_name: constant_name(&name),
            file_name_prefix: file_name_prefix(&name),
            remote_url: format!("git@{GITHUB_HOST}:{user}/{name}.git"),
            web_url: format!("https://{GITHUB_HOST}/{user}/{name}"),
            summary: options.summary.unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
            create_remote: options.create_remote,
            test_style,
            target_dir,
            name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn test_style(&self) -> TestStyle {
        self.test_style
    }

    pub fn create_remote(&self) -> bool {
        self.create_remote
    }

    pub fn constant_name(&self) -> &str {
        &self.constant_name
    }

    pub fn file_name_prefix(&self) -> &str {
        &self.file_name_prefix
    }

    pub fn lib_dir(&self) -> &Path {
        &self.lib_dir
    }

    pub fn test_dir(&self) -> &Path {
        &self.test_dir
    }

    /// SSH URL registered as `origin`.
    pub fn remote_url(&self) -> &str {
        &self.remote_url
    }

    /// Browser URL of the hosted repository.
    pub fn web_url(&self) -> &str {
        &self.web_url
    }

    /// Empty library entry point, `lib/<prefix>.rb`.
    pub fn lib_file(&self) -> PathBuf {
        self.lib_dir.join(format!("{}.{SOURCE_EXT}", self.file_name_prefix))
    }

    /// Message of the initial commit.
    pub fn commit_message(&self) -> String {
        format!("Initial commit to {}.", self.name)
    }
}
