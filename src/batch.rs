//! Directory batch processing: every `.pdf` in, one `.json` out.

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};
use rayon::prelude::*;

use crate::config::{EmptyOutlinePolicy, ExtractOptions};
use crate::error::{Error, Result};

/// The result of processing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Outline written to the given path.
    Written(PathBuf),
    /// Outline was empty and the options say to skip such documents.
    SkippedEmpty,
}

/// Counts for a whole directory run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub written: usize,
    pub skipped_empty: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn processed(&self) -> usize {
        self.written + self.skipped_empty + self.failed
    }
}

/// All `.pdf` files directly inside `dir`, sorted by name.
pub fn collect_pdf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Extracts one document's outline and writes `<stem>.json` into
/// `output_dir`. Honors the empty-outline policy.
pub fn process_file(
    input: &Path,
    output_dir: &Path,
    options: &ExtractOptions,
) -> Result<BatchOutcome> {
    let outline = crate::extract_outline_with_options(input, options)
        .map_err(|err| err.for_document(input))?;

    if outline.is_empty() && options.empty_outline == EmptyOutlinePolicy::Skip {
        info!("{}: no headings found, skipping", input.display());
        return Ok(BatchOutcome::SkippedEmpty);
    }

    let stem = input
        .file_stem()
        .ok_or_else(|| Error::Other(format!("not a file path: {}", input.display())))?;
    let out_path = output_dir.join(stem).with_extension("json");
    let json = outline
        .to_json_pretty()
        .map_err(|err| err.for_document(input))?;
    fs::write(&out_path, json)?;

    info!(
        "{}: {} headings -> {}",
        input.display(),
        outline.outline.len(),
        out_path.display()
    );
    Ok(BatchOutcome::Written(out_path))
}

/// Processes every `.pdf` in `input_dir` in parallel. A document that
/// fails is logged and counted; it never stops the rest of the batch.
pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    options: &ExtractOptions,
) -> Result<BatchSummary> {
    fs::create_dir_all(output_dir)?;
    let files = collect_pdf_files(input_dir)?;

    let outcomes: Vec<Result<BatchOutcome>> = files
        .par_iter()
        .map(|path| process_file(path, output_dir, options))
        .collect();

    let mut summary = BatchSummary::default();
    for outcome in outcomes {
        match outcome {
            Ok(BatchOutcome::Written(_)) => summary.written += 1,
            Ok(BatchOutcome::SkippedEmpty) => summary.skipped_empty += 1,
            Err(err) => {
                error!("{}", err);
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}
