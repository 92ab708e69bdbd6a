//! Name derivations used for generated constants and file names.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

fn project_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_-]*[A-Za-z0-9][A-Za-z0-9_-]*$").expect("valid regex")
    })
}

/// Checks that a project name can be turned into a constant and file names.
///
/// # Errors
/// * `Error::MissingProjectName` if the name is empty
/// * `Error::InvalidProjectName` if it holds anything outside `[A-Za-z0-9_-]`
///   or has no letter or digit at all
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::MissingProjectName);
    }
    if !project_name_pattern().is_match(name) {
        return Err(Error::InvalidProjectName { name: name.to_string() });
    }
    Ok(())
}

/// Derives the Ruby constant name: `my-cool-gem` becomes `MyCoolGem`.
pub fn constant_name(name: &str) -> String {
    name.split(['-', '_']).map(capitalize).collect()
}

/// Derives the file name prefix: `my-cool-gem` becomes `my_cool_gem`.
pub fn file_name_prefix(name: &str) -> String {
    name.replace('-', "_")
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
