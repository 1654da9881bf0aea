// src/config.rs

use std::path::PathBuf;

use crate::transform::TransformOptions;

/// Where raw research extracts are read from when no input path is given.
pub const DEFAULT_INPUT_FOLDER: &str = "~/Github/consumer-credit-trends-data/data";
/// Root of the per-market output directories when no output path is given.
pub const DEFAULT_OUTPUT_FOLDER: &str = "~/Github/consumer-credit-trends-data/processed_data/";

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub transform: TransformOptions,
    /// Worker threads; `None` lets rayon pick.
    pub jobs: Option<usize>,
}

impl Config {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            transform: TransformOptions::default(),
            jobs: None,
        }
    }
}
