use bulkpay::adapter::inbound::cli::command::Cli;
use bulkpay::adapter::inbound::cli::{dispatch, output};
use clap::Parser;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // No subscriber is installed yet when config loading fails.
    if let Err(e) = dispatch(cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
