//! Common constants used throughout the Jeweler application.

use std::time::Duration;

/// Host that generated remotes point at
pub const GITHUB_HOST: &str = "github.com";

/// Base URL of the hosting API used for repository creation and settings
pub const GITHUB_API_BASE: &str = "https://github.com/";

/// Git config keys holding the operator identity, in validation order
pub const USER_NAME_KEY: &str = "user.name";
pub const USER_EMAIL_KEY: &str = "user.email";
pub const GITHUB_USER_KEY: &str = "github.user";
pub const GITHUB_TOKEN_KEY: &str = "github.token";

/// Summary used when the operator gives none
pub const DEFAULT_SUMMARY: &str = "TODO";

/// Name of the remote registered in the new repository
pub const REMOTE_NAME: &str = "origin";

/// Time given to the hosting service to set up a new repository before pushing
pub const PUSH_DELAY: Duration = Duration::from_secs(2);

/// Network timeout for hosting API calls
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Repository setting flipped on to enable gem building
pub const PACKAGING_FIELD: &str = "repository_rubygem";

/// Extension of generated library and test sources
pub const SOURCE_EXT: &str = "rb";
