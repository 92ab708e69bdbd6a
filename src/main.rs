//! Jeweler's main application entry point.
//! Parses arguments, reads the operator identity and hands both to the generator.

use jeweler::{
    cli::{get_args, Args},
    config::ConfigReader,
    error::{default_error_handler, Error, Result},
    generator::Generator,
    logger::init_logger,
    remote::{DisabledHosting, HttpHostingClient, RemoteHostingClient},
    renderer::MiniJinjaRenderer,
    vcs::Git2Client,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Reads the identity, before anything is written
/// 2. Validates the project name and derives names and paths
/// 3. Generates the tree, commits it and optionally publishes it
fn run(args: Args) -> Result<()> {
    let reader = match &args.config {
        Some(path) => ConfigReader::from_path(path),
        None => ConfigReader::global(),
    };
    let identity = reader.read()?;

    let renderer = MiniJinjaRenderer::new();
    let vcs = Git2Client::new();
    let options = args.project_options();
    let hosting: Box<dyn RemoteHostingClient> = if options.create_remote {
        Box::new(HttpHostingClient::new().map_err(|e| Error::RemoteCallFailed {
            operation: "configure http client".to_string(),
            reason: e.to_string(),
        })?)
    } else {
        Box::new(DisabledHosting)
    };

    Generator::new(identity, options, &renderer, &vcs, &*hosting)?.run()
}
