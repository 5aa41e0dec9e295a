//! CLI module graph.

pub mod command;
pub mod output;
pub mod run;
pub mod serve;
pub mod synth;
pub mod validate;

use command::{Cli, Commands};

use crate::error::Result;
use crate::infrastructure::config::logging::LoggingConfig;

/// Apply global flags and run the selected subcommand.
///
/// Commands that read a configuration file initialize logging from it;
/// the others use the default `[logging]` section. `-v` raises either.
///
/// # Errors
///
/// Returns whatever error the subcommand handler produced.
pub async fn dispatch(cli: Cli) -> Result<()> {
    output::configure(output::OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    match &cli.command {
        Commands::Synth(args) => {
            LoggingConfig::default().with_verbosity(cli.verbose).init();
            synth::execute(args)
        }
        Commands::Validate(args) => {
            LoggingConfig::default().with_verbosity(cli.verbose).init();
            validate::execute(args)
        }
        Commands::Run(args) => run::execute_run(args).await,
        Commands::Send(args) => run::execute_send(args).await,
        Commands::Serve(args) => serve::execute(args).await,
    }
}
