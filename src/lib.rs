//! Jeweler scaffolds a new gem: it checks the operator's git identity, writes the
//! project skeleton from bundled templates, commits it to a fresh git repository and
//! can publish it to GitHub.

/// Command-line interface module for the Jeweler application
pub mod cli;

/// Operator identity read from git configuration
pub mod config;

pub mod constants;

/// Error types and handling for the Jeweler application
pub mod error;

/// Pipeline orchestration
pub mod generator;

/// Directory tree creation
pub mod layout;

pub mod logger;

/// Constant and file name derivation
pub mod naming;

/// Project options and derived description
pub mod project;

/// Hosted repository creation, push and settings
pub mod remote;

/// Bundled templates and their rendering
pub mod renderer;

/// Local git repository setup
pub mod vcs;
