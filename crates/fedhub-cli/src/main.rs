//! `fedhub`: the federation's collections from a terminal.
//!
//! Reads and writes go through the same [`DataFacade`] the site uses, backed
//! here by a directory of JSON tables. When a table cannot be read the
//! built-in placeholder rows are shown instead, exactly as the site does.
//!
//! Exit codes: 0 success, 1 remote or internal failure, 2 bad input or a
//! rejected record, 3 no such record, 4 configuration error.
//!
//! [`DataFacade`]: fedhub_core::prelude::DataFacade

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, instrument};

use crate::{
    cli::{Cli, Commands},
    commands::build_facade,
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // A missing .env is the normal case.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version come through here too and exit 0.
            let _ = e.print();
            return ExitCode::from(if e.use_stderr() { 2 } else { 0 });
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("{e}");
        return ExitCode::from(1);
    }
    let verbose = cli.global.verbose > 0;
    let colored = !cli.global.no_color && std::io::IsTerminal::is_terminal(&std::io::stderr());
    debug!(args = ?cli.global, "starting");

    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            let err = CliError::Config {
                message: format!("{e:#}"),
                source: Some(e.into()),
            };
            return report(err, verbose, colored);
        }
    };
    let output = OutputManager::new(&cli.global, &config);

    match dispatch(cli, config, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(err, verbose, colored),
    }
}

#[instrument(skip_all)]
fn dispatch(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let data_dir = config.data_dir(cli.global.data_dir.as_deref()).to_path_buf();

    // Config and completions never touch data.
    let command = match cli.command {
        Commands::Config(cmd) => return commands::config::execute(cmd, &config, &output),
        Commands::Completions(cmd) => return commands::completions::execute(cmd),
        data_command => data_command,
    };

    let facade = build_facade(&data_dir, &config, &output);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        match command {
            Commands::List(args) => commands::list::execute(args, &facade, &output).await,
            Commands::Create(args) => commands::mutate::create(args, &facade, &output).await,
            Commands::Update(args) => commands::mutate::update(args, &facade, &output).await,
            Commands::Delete(args) => commands::mutate::delete(args, &facade, &output).await,
            Commands::Status(args) => commands::status::execute(args, &facade, &output).await,
            Commands::Config(_) | Commands::Completions(_) => Ok(()),
        }
    })
}

/// Log the error, print it for the user and pick the exit code.
fn report(err: CliError, verbose: bool, colored: bool) -> ExitCode {
    err.log();
    eprint!("{}", err.render(verbose, colored));
    ExitCode::from(err.exit_code())
}
