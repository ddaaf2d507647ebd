//! Command-line tool converting the NIST CSF core workbook to YAML.
//!
//! # Usage
//!
//! ```sh
//! csf-yaml framework-core.xlsx > csf.yaml
//! csf-yaml framework-core.xlsx -o csf.yaml --log-level info
//! ```

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use csf_yaml::{ConvertOptions, DEFAULT_INPUT, convert_file, write_yaml};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Convert the NIST Cybersecurity Framework core spreadsheet to YAML
#[derive(Parser, Debug)]
#[command(
    name = "csf-yaml",
    about = "Convert the NIST Cybersecurity Framework core spreadsheet to YAML",
    version
)]
struct Args {
    /// Input .xlsx file
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Write the document here instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Worksheet to read (0-based, tab order)
    #[arg(long, default_value_t = 0)]
    sheet: usize,

    /// Leading rows to skip
    #[arg(long, default_value_t = 1)]
    header_rows: usize,

    /// Log filter (e.g. warn, info, csf_yaml=debug); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries only the document.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let options = ConvertOptions::new()
        .with_sheet_index(args.sheet)
        .with_header_rows(args.header_rows);

    let tree = convert_file(&args.input, &options)
        .with_context(|| format!("Failed to convert {}", args.input.display()))?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_yaml(&tree, BufWriter::new(file))
                .with_context(|| format!("Failed to write {}", path.display()))?;
        },
        None => {
            write_yaml(&tree, io::stdout().lock()).context("Failed to write to stdout")?;
        },
    }

    Ok(())
}
