//! Process command - extract a report from a single log photo.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use preplog_core::{report, AggregatedRow, LogExtractor, OcrSource, Record};

use crate::ocr_client::{RemoteOcr, WordFileSource};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input image (or word-box JSON with --words)
    #[arg(required = true)]
    input: PathBuf,

    /// Treat the input as pre-recognized word-box JSON instead of an image
    #[arg(long)]
    words: bool,

    /// Emit raw records instead of the aggregated summary
    #[arg(long)]
    all_entries: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// CSV output
    Csv,
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Reading input...");
    pb.set_position(10);
    let bytes = fs::read(&args.input)?;

    pb.set_message("Recognizing text...");
    pb.set_position(30);
    let boxes = recognize(&bytes, args.words)?;
    debug!("OCR produced {} word boxes", boxes.len());

    pb.set_message("Extracting records...");
    pb.set_position(70);
    let extractor = LogExtractor::from_config(&config);
    let records = extractor.extract(boxes);

    let output = if args.all_entries {
        format_entries(&records, args.format)?
    } else {
        let rows = extractor.summarize(&records);
        format_summary(&rows, args.format)?
    };

    pb.finish_with_message("Done");

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Report written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn recognize(bytes: &[u8], words: bool) -> anyhow::Result<Vec<preplog_core::WordBox>> {
    if words {
        Ok(WordFileSource.recognize(bytes)?)
    } else {
        let ocr = RemoteOcr::from_env()?;
        Ok(ocr.recognize(bytes)?)
    }
}

fn format_summary(rows: &[AggregatedRow], format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Csv => String::from_utf8(report::summary_to_csv(rows)?)?,
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(rows)?;
            out.push('\n');
            out
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for row in rows {
                out.push_str(&format!("{:<30} {}\n", row.item, row.total_quantity));
            }
            out
        }
    })
}

fn format_entries(records: &[Record], format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Csv => String::from_utf8(report::entries_to_csv(records)?)?,
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(records)?;
            out.push('\n');
            out
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for record in records {
                let quantity = record
                    .quantity
                    .map(|q| q.to_string())
                    .unwrap_or_else(|| "-".to_string());
                out.push_str(&format!(
                    "{:<30} {}\n",
                    record.item.as_deref().unwrap_or("-"),
                    quantity
                ));
            }
            out
        }
    })
}
