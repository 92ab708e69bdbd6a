//! Template renderer and rendering functionality for Jeweler.
//! Templates are bundled into the binary and looked up by name; values are passed in
//! through an explicit [`Bindings`] map rather than picked up from the caller's scope.
use crate::config::Identity;
use crate::error::{Error, Result};
use crate::project::ProjectSpec;
use indexmap::IndexMap;
use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use serde::Serialize;

/// Templates shipped with Jeweler, keyed by logical name.
const BUNDLED_TEMPLATES: [(&str, &str); 8] = [
    (".gitignore", include_str!("../templates/.gitignore.j2")),
    ("Rakefile", include_str!("../templates/Rakefile.j2")),
    ("LICENSE", include_str!("../templates/LICENSE.j2")),
    ("README", include_str!("../templates/README.j2")),
    ("shoulda/test_helper.rb", include_str!("../templates/shoulda/test_helper.rb.j2")),
    ("shoulda/flunking_test.rb", include_str!("../templates/shoulda/flunking_test.rb.j2")),
    ("bacon/spec_helper.rb", include_str!("../templates/bacon/spec_helper.rb.j2")),
    ("bacon/flunking_spec.rb", include_str!("../templates/bacon/flunking_spec.rb.j2")),
];

/// Field name to value map handed to templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Bindings(IndexMap<String, String>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every value the bundled templates reference.
    pub fn for_project(identity: &Identity, spec: &ProjectSpec) -> Self {
        Self::new()
            .with("user_name", &identity.user_name)
            .with("user_email", &identity.user_email)
            .with("github_username", &identity.github_user)
            .with("github_repo_name", spec.name())
            .with("github_remote", spec.remote_url())
            .with("github_url", spec.web_url())
            .with("summary", spec.summary())
            .with("constant_name", spec.constant_name())
            .with("file_name_prefix", spec.file_name_prefix())
            .with("test_style", spec.test_style().to_string())
            .with("test_dir", spec.test_style().test_dir_name())
    }

    pub fn with<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders the named template with the given bindings.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if no template has that name
    /// * `Error::TemplateRender` if evaluation fails, e.g. on an unbound field
    fn render(&self, name: &str, bindings: &Bindings) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer preloaded with the bundled templates.
    ///
    /// # Panics
    /// If a bundled template does not parse; `test_bundled_templates_parse` guards this.
    pub fn new() -> Self {
        let mut env = Self::empty_env();
        for (name, source) in BUNDLED_TEMPLATES {
            env.add_template(name, source)
                .unwrap_or_else(|e| panic!("bundled template '{name}' does not parse: {e}"));
        }
        Self { env }
    }

    /// Creates a renderer without any templates.
    pub fn empty() -> Self {
        Self { env: Self::empty_env() }
    }

    /// Registers an extra template, replacing a bundled one of the same name.
    ///
    /// # Errors
    /// * `Error::TemplateRender` if the source does not parse
    pub fn with_template<N, S>(mut self, name: N, source: S) -> Result<Self>
    where
        N: Into<String>,
        S: Into<String>,
    {
        let name = name.into();
        self.env
            .add_template_owned(name.clone(), source.into())
            .map_err(|source| Error::TemplateRender { name, source })?;
        Ok(self)
    }

    fn empty_env() -> Environment<'static> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, name: &str, bindings: &Bindings) -> Result<String> {
        let tmpl = self.env.get_template(name).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => Error::TemplateNotFound { name: name.to_string() },
            _ => Error::TemplateRender { name: name.to_string(), source: e },
        })?;

        tmpl.render(bindings)
            .map_err(|source| Error::TemplateRender { name: name.to_string(), source })
    }
}
