use anyhow::Result;
use clap::Parser;
use policysheets::{convert, ConvertOptions, JoinMode};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "policysheets",
    about = "Convert a Project/Distribution workbook into nested policy JSON",
    version
)]
struct Cli {
    /// Input workbook
    #[arg(long = "in", default_value = "raw_data.xlsx")]
    input: PathBuf,

    /// Output JSON file
    #[arg(long = "out", default_value = "policies.json")]
    output: PathBuf,

    /// Emit one entry per project id instead of one per project row
    #[arg(long)]
    group_by_id: bool,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) options ──────────────────────────────────────────────────
    let cli = Cli::parse();
    let options = ConvertOptions {
        mode: if cli.group_by_id {
            JoinMode::GroupById
        } else {
            JoinMode::PerRow
        },
    };
    info!(input = %cli.input.display(), output = %cli.output.display(), "startup");

    // ─── 3) convert ──────────────────────────────────────────────────
    let entries = convert(&cli.input, &cli.output, &options)?;

    println!("Wrote {} entries to {}", entries.len(), cli.output.display());
    Ok(())
}
