use std::{fmt::Write as _, io::Read, path::PathBuf, sync::Once};

use clap::Parser;

use cepcheck_core::{
    transport::http::{DEFAULT_BASE_URL, HttpLookup},
    validation::{
        init_validator_with_lookup,
        outcome::{BatchReport, Outcome},
    },
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "cepcheck")]
#[command(about = "Batch CEP validation against the ViaCEP lookup service")]
struct CepcheckArgs {
    /// Inline batch of codes separated by newlines, commas or semicolons
    text: Option<String>,

    /// Read the batch from a file instead of the command line
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Base URL of the lookup service
    #[arg(long, env = "CEPCHECK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Maximum number of in-flight lookups (unbounded when omitted)
    #[arg(short, long)]
    concurrency: Option<usize>,

    /// Emit the report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("cepcheck=warn"))
            .unwrap_or_default();
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(true).compact().with_target(true))
            .init();

        tracing::info!("logging initialized");
    });
}

fn read_input(args: &CepcheckArgs) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

fn describe(outcome: &Outcome) -> String {
    let Some(record) = &outcome.record else {
        return outcome.input.clone();
    };
    // display the code as echoed by the service, not the raw input
    let cep = record.cep.as_deref().unwrap_or(outcome.input.as_str());
    let mut parts: Vec<String> = Vec::new();
    if let Some(street) = &record.logradouro {
        parts.push(street.clone());
    }
    if let Some(neighborhood) = &record.bairro {
        parts.push(neighborhood.clone());
    }
    match (&record.localidade, &record.uf) {
        (Some(city), Some(uf)) => parts.push(format!("{city} - {uf}")),
        (Some(city), None) => parts.push(city.clone()),
        (None, Some(uf)) => parts.push(uf.clone()),
        (None, None) => {}
    }
    if parts.is_empty() { cep.to_string() } else { format!("{cep}  {}", parts.join(", ")) }
}

fn render_report(report: &BatchReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Found ({})", report.valid_count());
    for outcome in report.valid() {
        let _ = writeln!(out, "  {}", describe(outcome));
    }
    let _ = writeln!(out, "Not found ({})", report.invalid_count());
    for outcome in report.invalid() {
        let _ = writeln!(out, "  {}", outcome.input);
    }
    out
}

#[cfg(not(tarpaulin_include))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = CepcheckArgs::parse();

    let input = read_input(&args)?;
    if input.trim().is_empty() {
        anyhow::bail!("no codes provided");
    }

    let lookup = HttpLookup::default().with_base_url(args.base_url.clone());
    let mut validator = init_validator_with_lookup(lookup);
    if let Some(limit) = args.concurrency {
        validator = validator.with_concurrency_limit(limit);
    }

    let report = validator.run(&input).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }

    Ok(())
}
