use anyhow::Context;
use clap::Parser;
use product_plan::cli;
use product_plan::config::{PlanConfig, DEFAULT_ALLOWED_ROWS, DEFAULT_INPUT, DEFAULT_OUTPUT};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "product-plan")]
#[command(about = "Generate the Mapping / Product Plan / Custom Device workbook from Mapping.json")]
#[command(long_about = "Product Plan - device mapping workbook generator

Reads a JSON device mapping and writes a workbook with three sheets:
  Mapping        - one row per device, with a CONCATENATE key per row
  Product Plan   - pre-allocated entry rows; key and sip_device_id are
                   computed by CONCATENATE / VLOOKUP into Mapping
  Custom Device  - dropdown sources for the Product Plan machine and
                   engine columns

INPUT FORMAT:
  { \"data\": [ { \"client_name\": \"Line 1\", \"engine\": \"E1\",
                \"sip_device_id\": \"...\", \"mac_address\": \"...\",
                \"device_local_id\": \"...\" } ] }

EXAMPLES:
  product-plan                                  # Mapping.json → hieu.xlsx
  product-plan -i devices.json -o plan.xlsx -r 500")]
#[command(version)]
struct Cli {
    /// Path to the JSON mapping file
    #[arg(short, long, env = "PRODUCT_PLAN_INPUT", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output Excel file path (.xlsx)
    #[arg(short, long, env = "PRODUCT_PLAN_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Number of pre-allocated Product Plan rows
    #[arg(short, long, env = "PRODUCT_PLAN_ROWS", default_value_t = DEFAULT_ALLOWED_ROWS)]
    rows: u32,

    /// Show verbose build steps
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_filter = if args.verbose {
        "product_plan=info"
    } else {
        "product_plan=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = PlanConfig {
        input: args.input,
        output: args.output,
        allowed_rows: args.rows,
        ..PlanConfig::default()
    };

    cli::generate(&config, args.verbose)
        .with_context(|| format!("failed to generate {}", config.output.display()))
}
