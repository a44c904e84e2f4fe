//! Batch command - process multiple log photos into one shared report.
//!
//! Each image is processed independently; an acquisition failure is fatal
//! only for its own image and the rest continue. Records from all images
//! are concatenated before one aggregation pass (order across images does
//! not affect the result beyond the documented stable tie-break).

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use preplog_core::{report, LogExtractor, OcrSource, Record};

use crate::ocr_client::{RemoteOcr, WordFileSource};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Treat inputs as pre-recognized word-box JSON instead of images
    #[arg(long)]
    words: bool,

    /// Output file for the combined summary CSV (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for per-image raw entry CSVs
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

struct FileResult {
    path: PathBuf,
    records: Vec<Record>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;

    let wanted_exts: &[&str] = if args.words {
        &["json"]
    } else {
        &["png", "jpg", "jpeg"]
    };
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            wanted_exts.contains(&ext.to_lowercase().as_str())
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let extractor = LogExtractor::from_config(&config);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let result = process_one(&path, &extractor, args.words);
        match result {
            Ok(records) => {
                debug!("{}: {} records", path.display(), records.len());
                results.push(FileResult {
                    path,
                    records,
                    error: None,
                });
            }
            Err(e) => {
                // Fatal for this image only; the rest keep going.
                warn!("Failed to process {}: {}", path.display(), e);
                results.push(FileResult {
                    path,
                    records: Vec::new(),
                    error: Some(e.to_string()),
                });
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    if let Some(ref output_dir) = args.output_dir {
        // Inputs from different directories can share a file stem; suffix
        // repeats so no per-image CSV overwrites another.
        let mut used_names: HashSet<String> = HashSet::new();
        for result in results.iter().filter(|r| r.error.is_none()) {
            let stem = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("log");
            let mut name = format!("{}.csv", stem);
            let mut suffix = 1;
            while !used_names.insert(name.clone()) {
                suffix += 1;
                name = format!("{}-{}.csv", stem, suffix);
            }
            let entries_path = output_dir.join(&name);
            fs::write(&entries_path, report::entries_to_csv(&result.records)?)?;
            debug!("Wrote entries to {}", entries_path.display());
        }
    }

    let all_records: Vec<Record> = results
        .iter()
        .flat_map(|r| r.records.iter().cloned())
        .collect();
    let rows = extractor.summarize(&all_records);
    let summary = report::summary_to_csv(&rows)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &summary)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", String::from_utf8(summary)?);
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_one(
    path: &PathBuf,
    extractor: &LogExtractor,
    words: bool,
) -> anyhow::Result<Vec<Record>> {
    let bytes = fs::read(path)?;
    let boxes = if words {
        WordFileSource.recognize(&bytes)?
    } else {
        RemoteOcr::from_env()?.recognize(&bytes)?
    };
    Ok(extractor.extract(boxes))
}
