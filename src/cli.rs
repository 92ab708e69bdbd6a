//! Command-line interface implementation for Jeweler.
//! Provides argument parsing and help text formatting using clap.

use crate::project::{ProjectOptions, TestStyle};
use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for Jeweler.
#[derive(Parser, Debug)]
#[command(author, version, about = "Jeweler: craft a new gem with git and GitHub set up", long_about = None)]
pub struct Args {
    /// Name of the gem and of its GitHub repository
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Directory to create the gem in (defaults to NAME)
    #[arg(short, long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// One-line description of the gem
    #[arg(long)]
    pub summary: Option<String>,

    /// Test framework to generate a skeleton for
    #[arg(long, value_enum, default_value_t = TestStyle::Shoulda)]
    pub test_style: TestStyle,

    /// Create the repository on GitHub and push to it
    #[arg(long)]
    pub create_repo: bool,

    /// Git configuration file to read the identity from (defaults to ~/.gitconfig)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Options for the generator, without the process-level flags.
    pub fn project_options(&self) -> ProjectOptions {
        ProjectOptions {
            name: self.name.clone(),
            directory: self.directory.clone(),
            summary: self.summary.clone(),
            test_style: self.test_style,
            create_remote: self.create_repo,
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
