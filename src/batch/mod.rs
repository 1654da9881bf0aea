// src/batch/mod.rs

//! Runs every input file through its transform and records which files made
//! it. A failing file is logged and reported; it never stops the batch.

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::{debug, error, info, instrument};

use crate::{config::Config, dispatch, dispatch::ContentType, files};

/// What happened to one input file that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Output written, with its data-record count.
    Written { path: PathBuf, records: usize },
    /// Transform produced no data rows; nothing was written.
    NoData,
}

#[derive(Debug, Clone, Serialize)]
pub struct Processed {
    pub file: String,
    pub content_type: ContentType,
    pub output: PathBuf,
    pub records: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub file: String,
    pub reason: String,
}

/// Result of a batch run, files listed in input order.
#[derive(Debug, Default, Clone, Serialize)]
pub struct BatchReport {
    pub input_files: usize,
    pub processed: Vec<Processed>,
    pub no_data: Vec<String>,
    pub failed: Vec<Failure>,
}

impl BatchReport {
    /// Files that were handled without error, whether or not they produced output.
    pub fn successes(&self) -> usize {
        self.processed.len() + self.no_data.len()
    }

    pub fn success_names(&self) -> impl Iterator<Item = &str> {
        self.processed
            .iter()
            .map(|p| p.file.as_str())
            .chain(self.no_data.iter().map(String::as_str))
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("creating report {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("writing report {}", path.display()))?;
        Ok(())
    }
}

/// Load, transform and save one input file.
#[instrument(level = "debug", skip(path, config), fields(file = %path.display()))]
pub fn process_file(path: &Path, config: &Config) -> Result<(ContentType, FileOutcome)> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("unusable file name {}", path.display()))?;
    let input = dispatch::parse_file_name(name)?;

    let rows = files::load_csv(path)?;
    debug!(rows = rows.len(), content_type = %input.content_type, "loaded");

    let outcome = match input.content_type.apply(name, &rows, &config.transform)? {
        Some(table) => {
            let out = config.output_dir.join(input.market).join(name);
            files::save_csv(&out, &table)?;
            FileOutcome::Written {
                path: out,
                records: table.len(),
            }
        }
        None => {
            info!(file = name, "no data rows, skipping write");
            FileOutcome::NoData
        }
    };
    Ok((input.content_type, outcome))
}

/// Process every CSV file in the configured input directory.
///
/// Only listing the directory or building the thread pool can fail the
/// whole call; per-file problems end up in `BatchReport::failed`.
pub fn process_data_files(config: &Config) -> Result<BatchReport> {
    let start = Instant::now();
    let inputs = files::list_csv_files(&config.input_dir)?;
    info!(
        dir = %config.input_dir.display(),
        files = inputs.len(),
        "starting batch"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs.unwrap_or(0))
        .build()
        .context("building worker pool")?;

    let results: Vec<(String, Result<(ContentType, FileOutcome)>)> = pool.install(|| {
        inputs
            .par_iter()
            .map(|path| {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                (name, process_file(path, config))
            })
            .collect()
    });

    let mut report = BatchReport {
        input_files: inputs.len(),
        ..BatchReport::default()
    };
    for (file, result) in results {
        match result {
            Ok((content_type, FileOutcome::Written { path, records })) => {
                report.processed.push(Processed {
                    file,
                    content_type,
                    output: path,
                    records,
                });
            }
            Ok((_, FileOutcome::NoData)) => report.no_data.push(file),
            Err(e) => {
                error!(file = %file, "failed: {:#}", e);
                report.failed.push(Failure {
                    file,
                    reason: format!("{:#}", e),
                });
            }
        }
    }

    info!(
        processed = report.processed.len(),
        no_data = report.no_data.len(),
        failed = report.failed.len(),
        elapsed = ?start.elapsed(),
        "batch complete"
    );
    Ok(report)
}
