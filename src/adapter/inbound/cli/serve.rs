//! Handler for the `serve` command.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::adapter::inbound::cli::command::ServeArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::inbound::http::{self, MockState};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Execute the serve command.
pub async fn execute(args: &ServeArgs) -> Result<()> {
    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(bind) = &args.bind {
        config.mock.bind = bind.clone();
    }
    if args.seed.is_some() {
        config.mock.seed = args.seed;
    }
    config.init_logging(output::verbosity());

    let addr: SocketAddr = config.mock.bind.parse().map_err(|e: std::net::AddrParseError| {
        ConfigError::InvalidValue {
            field: "mock.bind",
            reason: e.to_string(),
        }
    })?;

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Listening", format!("http://{addr}"));
    if let Some(seed) = config.mock.seed {
        output::field("Seed", seed);
    }

    http::serve(addr, Arc::new(MockState::new(config.mock.seed))).await
}
