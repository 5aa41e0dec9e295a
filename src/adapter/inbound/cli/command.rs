//! Command-line interface definitions.
//!
//! Defines the CLI structure for bulkpay using `clap`. Subcommands cover
//! fixture synthesis, payment list validation, bulk and single runs against
//! the SDK (or a simulation), and the mock backend server.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Mobile-money bulk payment test harness
#[derive(Parser, Debug)]
#[command(name = "bulkpay")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate synthetic bulk results for a request body
    Synth(SynthArgs),

    /// Validate a payment list without sending anything
    Validate(ValidateArgs),

    /// Send a payment list as bulk quotes and bulk transfers
    Run(RunArgs),

    /// Send one payment as a bulk of one
    Send(SendArgs),

    /// Serve the mock bulk backend over HTTP
    Serve(ServeArgs),
}

/// Which bulk operation to synthesize results for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SynthKind {
    /// Individual quote results for `individualQuotes`
    Quotes,
    /// Individual transfer results for `individualTransfers`
    Transfers,
}

/// Arguments for `bulkpay synth`.
#[derive(Parser, Debug)]
pub struct SynthArgs {
    /// Bulk operation to answer.
    #[arg(value_enum)]
    pub kind: SynthKind,

    /// Request body file; `-` or omitted reads stdin.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for `bulkpay validate`.
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Payment list CSV.
    #[arg(short, long)]
    pub file: PathBuf,
}

/// Gateway selection shared by commands that send payments.
#[derive(Parser, Debug)]
pub struct GatewayArgs {
    /// Path to the configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Answer in-process with synthetic results instead of calling the SDK.
    #[arg(long)]
    pub simulate: bool,

    /// Seed for the simulation.
    #[arg(long, requires = "simulate")]
    pub seed: Option<u64>,
}

/// Arguments for `bulkpay run`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Payment list CSV.
    #[arg(short, long)]
    pub file: PathBuf,

    /// Override `processing.transfers_per_bulk`.
    #[arg(long)]
    pub batch_size: Option<usize>,

    #[command(flatten)]
    pub gateway: GatewayArgs,
}

/// Arguments for `bulkpay send`.
#[derive(Parser, Debug)]
pub struct SendArgs {
    /// Payee identifier.
    #[arg(long)]
    pub id: String,

    /// Amount in XOF.
    #[arg(long)]
    pub amount: String,

    #[command(flatten)]
    pub gateway: GatewayArgs,
}

/// Arguments for `bulkpay serve`.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Path to the configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override `mock.bind`.
    #[arg(long)]
    pub bind: Option<String>,

    /// Override `mock.seed`.
    #[arg(long)]
    pub seed: Option<u64>,
}
