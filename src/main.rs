use std::process::ExitCode;
use std::sync::Arc;

use clap::{CommandFactory, Parser};

use git_sweep::report;
use git_sweep::{Cli, GitClient, ProcessCommandExecutor, SweepConfig, Sweeper, TerminalPrompt};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return handle_parse_error(err),
    };

    init_tracing();

    let config = SweepConfig::from(cli);
    let git = GitClient::new(Arc::new(ProcessCommandExecutor));
    let mut prompt = TerminalPrompt::new();

    match Sweeper::new(&config, &git, &mut prompt).run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            report::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

/// Help requests and unrecognized flags both print usage and exit 0; exit 1
/// is reserved for fatal repository conditions.
fn handle_parse_error(err: clap::Error) -> ExitCode {
    use clap::error::ErrorKind;

    let _ = err.print();
    if !matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    ) {
        let _ = Cli::command().print_help();
    }
    ExitCode::SUCCESS
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    // Silent unless RUST_LOG asks for diagnostics; stdout stays reserved
    // for the [LEVEL] report lines and git passthrough output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
