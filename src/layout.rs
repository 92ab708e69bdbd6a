//! Creates the on-disk skeleton of a new gem.

use crate::error::{Error, Result};
use crate::project::ProjectSpec;
use crate::renderer::{Bindings, TemplateRenderer};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// A template rendered into the target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOutput {
    /// Logical template name
    pub source: String,
    /// Path relative to the target directory
    pub destination: PathBuf,
}

impl TemplateOutput {
    fn same(name: &str) -> Self {
        Self { source: name.to_string(), destination: PathBuf::from(name) }
    }
}

/// Templates written for a project, in write order.
pub fn template_outputs(spec: &ProjectSpec) -> Vec<TemplateOutput> {
    let style = spec.test_style().template_dir_name();
    let testspec = spec.test_style().test_dir_name();
    let prefix = spec.file_name_prefix();

    vec![
        TemplateOutput::same(".gitignore"),
        TemplateOutput::same("Rakefile"),
        TemplateOutput::same("LICENSE"),
        TemplateOutput::same("README"),
        TemplateOutput {
            source: format!("{style}/{testspec}_helper.rb"),
            destination: Path::new(testspec).join(format!("{testspec}_helper.rb")),
        },
        TemplateOutput {
            source: format!("{style}/flunking_{testspec}.rb"),
            destination: Path::new(testspec).join(format!("{prefix}_{testspec}.rb")),
        },
    ]
}

/// Builds the directory tree and fills it from templates.
pub struct LayoutBuilder<'a> {
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> LayoutBuilder<'a> {
    pub fn new(renderer: &'a dyn TemplateRenderer) -> Self {
        Self { renderer }
    }

    /// Creates the target tree for `spec`.
    ///
    /// Nothing is written if the target already exists. A failure after that point
    /// leaves the partially written tree behind.
    ///
    /// # Errors
    /// * `Error::TargetExists` if anything is already at the target path
    /// * `Error::TemplateNotFound` / `Error::TemplateRender` from rendering
    /// * `Error::Io` if a directory or file cannot be written
    pub fn build(&self, spec: &ProjectSpec, bindings: &Bindings) -> Result<()> {
        let target_dir = spec.target_dir();
        ensure_target_free(target_dir)?;

        create_dir(target_dir)?;
        create_dir(spec.lib_dir())?;
        create_dir(spec.test_dir())?;

        for output in template_outputs(spec) {
            let content = self.renderer.render(&output.source, bindings)?;
            let dest = target_dir.join(&output.destination);
            debug!("Writing '{}' from template '{}'.", dest.display(), output.source);
            fs::write(&dest, content).map_err(Error::io(&dest))?;
        }

        let lib_file = spec.lib_file();
        debug!("Touching '{}'.", lib_file.display());
        fs::File::create(&lib_file).map_err(Error::io(&lib_file))?;

        Ok(())
    }
}

/// Fails if the target path is taken, whether by a file or a directory.
pub fn ensure_target_free<P: AsRef<Path>>(target_dir: P) -> Result<()> {
    let target_dir = target_dir.as_ref();
    if target_dir.exists() || target_dir.is_symlink() {
        return Err(Error::TargetExists { target_dir: target_dir.display().to_string() });
    }
    Ok(())
}

fn create_dir(path: &Path) -> Result<()> {
    debug!("Creating directory '{}'.", path.display());
    fs::create_dir(path).map_err(Error::io(path))
}
