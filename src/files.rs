// src/files.rs

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use glob::{glob_with, MatchOptions, Pattern};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::transform::{RawRow, Table};

/// Expand a leading `~` and make the path absolute.
pub fn expand_path(path: &str) -> Result<PathBuf> {
    let expanded = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => {
            let home = env::var_os("HOME").context("HOME is not set, cannot expand '~'")?;
            PathBuf::from(home).join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(path),
    };
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(env::current_dir()
            .context("resolving current directory")?
            .join(expanded))
    }
}

/// Regular `*.csv` files directly under `dir` (extension in any case), sorted.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.csv", Pattern::escape(&dir.to_string_lossy()));
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let mut files: Vec<PathBuf> = glob_with(&pattern, options)
        .with_context(|| format!("bad glob pattern {pattern}"))?
        .filter_map(|entry| entry.ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "listed input files");
    Ok(files)
}

/// Read every record of a CSV file, skipping its header line.
pub fn load_csv(path: &Path) -> Result<Vec<RawRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    rdr.records()
        .enumerate()
        .map(|(idx, record)| {
            record
                .map(|r| r.iter().map(str::to_string).collect::<RawRow>())
                .with_context(|| format!("CSV parse error in {} at record {}", path.display(), idx + 1))
        })
        .collect()
}

/// Write a table (header first) to `path`, creating parent directories.
pub fn save_csv(path: &Path, table: &Table) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
            info!("created directories for {}", parent.display());
        }
    }

    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for line in table.lines() {
        wtr.write_record(&line)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    wtr.flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}
