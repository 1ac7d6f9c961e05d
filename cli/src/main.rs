//! pdfoutline CLI - batch PDF outline extraction

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::error;
use rayon::prelude::*;

use pdfoutline::batch::{self, BatchOutcome, BatchSummary};
use pdfoutline::{extract_outline_with_options, ClassifierKind, ExtractOptions};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(about = "Extract title and heading outlines from PDFs as JSON", long_about = None)]
struct Cli {
    /// Input PDF file or directory of PDFs
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output directory for JSON files (single-file input prints to
    /// stdout when omitted)
    #[arg(short, long, value_name = "DIR", env = "PDFOUTLINE_OUTPUT")]
    output: Option<PathBuf>,

    /// Outlier threshold: multiplier on the font size standard deviation
    #[arg(long, default_value_t = 1.0)]
    threshold: f32,

    /// Number of leading pages searched for the title
    #[arg(long, default_value_t = 2)]
    title_pages: u32,

    /// Top page margin excluded from headings (fraction of page height)
    #[arg(long, default_value_t = 0.10)]
    top_margin: f32,

    /// Bottom boundary for headings (fraction of page height)
    #[arg(long, default_value_t = 0.95)]
    bottom_margin: f32,

    /// Heading classification policy
    #[arg(long, value_enum, default_value = "outlier")]
    policy: Policy,

    /// Skip documents whose outline comes out empty
    #[arg(long)]
    skip_empty: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Policy {
    /// Statistical outlier against document-wide size distribution
    Outlier,
    /// Fixed multipliers of the page average size
    FixedRatio,
}

impl From<Policy> for ClassifierKind {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Outlier => ClassifierKind::Outlier,
            Policy::FixedRatio => ClassifierKind::FixedRatio,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let mut options = ExtractOptions::new()
        .with_threshold_factor(cli.threshold)
        .with_title_pages(cli.title_pages)
        .with_top_margin(cli.top_margin)
        .with_bottom_margin(cli.bottom_margin)
        .with_classifier(cli.policy.into());
    if cli.skip_empty {
        options = options.skip_empty();
    }

    let result = if cli.input.is_dir() {
        run_batch(&cli.input, cli.output.as_deref(), &options)
    } else {
        run_single(&cli.input, cli.output.as_deref(), &options)
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_single(
    input: &Path,
    output: Option<&Path>,
    options: &ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            match batch::process_file(input, dir, options)? {
                BatchOutcome::Written(path) => {
                    println!("{} {}", "Saved to".green(), path.display());
                }
                BatchOutcome::SkippedEmpty => {
                    println!("{} {}", "Skipped (empty outline)".yellow(), input.display());
                }
            }
        }
        None => {
            let outline = extract_outline_with_options(input, options)?;
            println!("{}", outline.to_json_pretty()?);
        }
    }
    Ok(())
}

fn run_batch(
    input: &Path,
    output: Option<&Path>,
    options: &ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("output"));
    fs::create_dir_all(&output_dir)?;

    let files = batch::collect_pdf_files(input)?;
    if files.is_empty() {
        println!("{}", "No PDF files found".yellow());
        return Ok(());
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let outcomes: Vec<_> = files
        .par_iter()
        .map(|path| {
            let outcome = batch::process_file(path, &output_dir, options);
            pb.inc(1);
            (path, outcome)
        })
        .collect();
    pb.finish_with_message("Done!");

    let mut summary = BatchSummary::default();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(BatchOutcome::Written(_)) => summary.written += 1,
            Ok(BatchOutcome::SkippedEmpty) => summary.skipped_empty += 1,
            Err(e) => {
                error!("{} failed: {}", path.display(), e);
                summary.failed += 1;
            }
        }
    }

    println!();
    println!("{}", "Batch summary".green().bold());
    println!("  {} {} written", "├─".dimmed(), summary.written);
    println!("  {} {} skipped (empty)", "├─".dimmed(), summary.skipped_empty);
    println!("  {} {} failed", "└─".dimmed(), summary.failed);

    if summary.written + summary.skipped_empty > 0 || summary.failed == 0 {
        Ok(())
    } else {
        Err("all documents failed".into())
    }
}
