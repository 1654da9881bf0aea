use anyhow::{bail, Result};
use clap::Parser;
use credit_trends::{
    batch::process_data_files,
    config::{Config, DEFAULT_INPUT_FOLDER, DEFAULT_OUTPUT_FOLDER},
    files::expand_path,
    transform::{TransformOptions, BASE_YEAR},
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Processes data files from the Office of Research"
)]
struct Cli {
    /// Folder containing the input data files
    #[arg(short = 'i', long = "input-path", value_name = "INPUTDIR", default_value = DEFAULT_INPUT_FOLDER)]
    input: String,

    /// Root folder for the processed data files
    #[arg(short = 'o', long = "output-path", value_name = "OUTPUTDIR", default_value = DEFAULT_OUTPUT_FOLDER)]
    output: String,

    /// Calendar year of month index 0
    #[arg(long, default_value_t = BASE_YEAR)]
    base_year: i32,

    /// Fail a file when two rows fill the same value instead of keeping the last
    #[arg(long)]
    strict: bool,

    /// Worker threads (defaults to one per CPU)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Also write the run report as JSON
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Do not list successfully processed files
    #[arg(long)]
    quiet_success: bool,

    /// Do not list failed files
    #[arg(long)]
    quiet_failure: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let default_level = if cli.verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) configure dirs ───────────────────────────────────────────
    let config = Config {
        input_dir: expand_path(&cli.input)?,
        output_dir: expand_path(&cli.output)?,
        transform: TransformOptions {
            base_year: cli.base_year,
            strict: cli.strict,
        },
        jobs: cli.jobs,
    };
    info!(
        input = %config.input_dir.display(),
        output = %config.output_dir.display(),
        "startup"
    );

    // ─── 3) process every file ───────────────────────────────────────
    let report = process_data_files(&config)?;

    // ─── 4) report ───────────────────────────────────────────────────
    if report.successes() > 0 && !cli.quiet_success {
        let names: Vec<&str> = report.success_names().collect();
        println!("** Successfully processed files:\n{}\n", names.join("\n"));
    }
    if !report.failed.is_empty() && !cli.quiet_failure {
        let names: Vec<&str> = report.failed.iter().map(|f| f.file.as_str()).collect();
        println!("** Failed to process files:\n{}\n", names.join("\n"));
    }
    println!(
        "** Processed {} of {} input data files successfully",
        report.successes(),
        report.input_files
    );

    if let Some(path) = &cli.report {
        report.write_json(path)?;
        info!("wrote report to {}", path.display());
    }

    if !report.failed.is_empty() {
        bail!("{} of {} files failed", report.failed.len(), report.input_files);
    }
    Ok(())
}
