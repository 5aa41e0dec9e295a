//! Handlers for the `run` and `send` commands.

use std::net::SocketAddr;
use std::sync::Arc;

use serde::Serialize;

use crate::adapter::inbound::cli::command::{GatewayArgs, RunArgs, SendArgs};
use crate::adapter::inbound::cli::{output, validate};
use crate::adapter::inbound::http::spawn_callback_listener;
use crate::adapter::inbound::payment_list::read_payment_file;
use crate::adapter::outbound::{SdkGateway, SimulatedGateway};
use crate::application::callback::CallbackInbox;
use crate::application::processor::BulkProcessor;
use crate::domain::outcome::{BulkSummary, TransferOutcome};
use crate::domain::payment::{parse_amount, validate_rows, Payment};
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::gateway::BulkGateway;

/// Single transfer result, as reported by `send`.
#[derive(Debug, Serialize)]
struct SingleTransferReport<'a> {
    status: &'static str,
    mode: &'static str,
    details: &'a TransferOutcome,
}

/// Execute the run command.
pub async fn execute_run(args: &RunArgs) -> Result<()> {
    let mut config = Config::load_or_default(args.gateway.config.as_deref())?;
    if let Some(size) = args.batch_size {
        config.processing.transfers_per_bulk = size.max(1);
    }
    config.init_logging(output::verbosity());

    let filename = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| args.file.display().to_string());
    let rows = read_payment_file(&args.file)?;
    let validated = validate_rows(&rows);

    output::header(env!("CARGO_PKG_VERSION"));
    validate::print_report(&filename, &validated);

    if validated.accepted.is_empty() {
        output::warning("No valid payments to send");
    }

    output::section("Processing");
    output::field("Gateway", gateway_label(&args.gateway, &config));
    output::field("Batch size", config.processing.transfers_per_bulk);

    let outcomes = dispatch(&args.gateway, &config, &validated.accepted).await?;
    let summary = BulkSummary::from_outcomes(
        filename,
        validated.total(),
        validated.rejected.len(),
        &outcomes,
    );

    print_summary(&summary, &outcomes);
    if output::is_json() {
        output::result("outcomes", &outcomes)?;
        output::result("summary", &summary)?;
    }
    Ok(())
}

/// Execute the send command.
pub async fn execute_send(args: &SendArgs) -> Result<()> {
    let mut config = Config::load_or_default(args.gateway.config.as_deref())?;
    config.processing.transfers_per_bulk = 1;
    config.init_logging(output::verbosity());

    let amount = parse_amount(&args.amount)?;
    let payment = Payment::single(&args.id, amount)?;

    let outcomes = dispatch(&args.gateway, &config, std::slice::from_ref(&payment)).await?;
    let outcome = outcomes
        .first()
        .ok_or_else(|| Error::Gateway("no outcome for single transfer".into()))?;

    output::result(
        "transfer",
        &SingleTransferReport {
            status: "PROCESSED",
            mode: "single_via_bulk",
            details: outcome,
        },
    )?;

    match &outcome.error {
        Some(reason) if !outcome.is_success() => Err(Error::Gateway(reason.clone())),
        _ => Ok(()),
    }
}

async fn dispatch(
    args: &GatewayArgs,
    config: &Config,
    payments: &[Payment],
) -> Result<Vec<TransferOutcome>> {
    if args.simulate {
        let gateway = match args.seed {
            Some(seed) => SimulatedGateway::seeded(seed),
            None => SimulatedGateway::new(),
        };
        return Ok(process(gateway, config, payments, None).await);
    }

    let listener = match &config.processing.callback_bind {
        Some(bind) => {
            let addr: SocketAddr = bind.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidValue {
                    field: "processing.callback_bind",
                    reason: e.to_string(),
                }
            })?;
            let inbox = Arc::new(CallbackInbox::new());
            let (local, handle) = spawn_callback_listener(addr, Arc::clone(&inbox)).await?;
            output::field("Callbacks", format!("http://{local}"));
            Some((inbox, handle))
        }
        None => None,
    };

    let inbox = listener.as_ref().map(|(inbox, _)| Arc::clone(inbox));
    let outcomes = process(SdkGateway::from_config(&config.sdk), config, payments, inbox).await;
    if let Some((_, handle)) = listener {
        handle.abort();
    }
    Ok(outcomes)
}

async fn process<G: BulkGateway>(
    gateway: G,
    config: &Config,
    payments: &[Payment],
    callbacks: Option<Arc<CallbackInbox>>,
) -> Vec<TransferOutcome> {
    let size = config.processing.transfers_per_bulk.max(1);
    let batches = payments.len().div_ceil(size) as u64;
    let progress = output::progress(batches, "Batches");

    let mut processor = BulkProcessor::new(
        gateway,
        config.processing.clone(),
        config.sdk.parties.clone(),
    );
    if let Some(inbox) = callbacks {
        processor = processor.with_callbacks(inbox);
    }
    let outcomes = processor
        .process_with_progress(payments, |batch, _| {
            progress.set_message(format!("bulk {}", batch.bulk_transfer_id.short()));
            progress.inc(1);
        })
        .await;

    progress.finish_and_clear();
    outcomes
}

fn gateway_label(args: &GatewayArgs, config: &Config) -> String {
    if args.simulate {
        "simulated".to_string()
    } else {
        config.sdk.url.clone()
    }
}

fn print_summary(summary: &BulkSummary, outcomes: &[TransferOutcome]) {
    output::section("Summary");
    output::field("Bulk id", output::muted(summary.bulk_id));
    output::field("Succeeded", output::positive(summary.succeeded));
    if summary.technical_failures > 0 {
        output::field("Failed", output::negative(summary.technical_failures));
    } else {
        output::field("Failed", 0);
    }
    output::field("Invalid rows", summary.invalid_rows);

    let failed: Vec<&TransferOutcome> = outcomes.iter().filter(|o| !o.is_success()).collect();
    for outcome in failed.iter().take(10) {
        output::warning(&format!(
            "{} {}: {}",
            outcome.id_value,
            outcome.transfer_id,
            outcome.error.as_deref().unwrap_or("failed")
        ));
    }
    if failed.len() > 10 {
        output::warning(&format!("... and {} more failures", failed.len() - 10));
    }
    if failed.is_empty() && !outcomes.is_empty() {
        output::success("All payments transferred");
    }
}
