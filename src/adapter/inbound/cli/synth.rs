//! Handler for the `synth` command.

use std::io::Read;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

use crate::adapter::inbound::cli::command::{SynthArgs, SynthKind};
use crate::adapter::inbound::cli::output;
use crate::application::synth::{
    build_individual_quote_results, build_individual_transfer_results, RequestContext,
};
use crate::error::Result;

/// Execute the synth command.
pub fn execute(args: &SynthArgs) -> Result<()> {
    let body = read_body(args.input.as_deref())?;
    let context = RequestContext::with_body(body);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match args.kind {
        SynthKind::Quotes => {
            let results = build_individual_quote_results(&context, &mut rng);
            output::result("individual_quote_results", &results)
        }
        SynthKind::Transfers => {
            let results = build_individual_transfer_results(&context, &mut rng);
            output::result("individual_transfer_results", &results)
        }
    }
}

fn read_body(input: Option<&Path>) -> Result<Value> {
    let text = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)?,
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    Ok(serde_json::from_str(&text)?)
}
