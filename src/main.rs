//! Command line front end for pages-fix.

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

use pages_fix::{
    fix, CompressionMode, DirectoryTrash, EventSink, FailurePolicy, FixConfig, FixError,
    FixStatus, PipelineEvent, Remover, SystemTrash, DEFAULT_SUFFIX,
};

/// Exit codes
const SUCCESS: u8 = 0;
/// Some folders failed, the rest were packed
const PARTIAL: u8 = 1;
/// Path rejected before anything was touched
const BAD_PATH: u8 = 2;
/// A phase failed with --fail-fast
const PIPELINE_ERROR: u8 = 3;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Pack every *.pages folder in a directory into a zip wearing the folder's name
#[derive(Debug, Parser)]
#[command(name = "pages-fix", version, about, long_about = None)]
struct Cli {
    /// Directory holding the folders (prompted for when omitted)
    path: Option<String>,

    /// Suffix of the folders to pack
    #[arg(long, env = "PAGES_FIX_SUFFIX", default_value = DEFAULT_SUFFIX, value_parser = parse_suffix)]
    suffix: String,

    /// Store files without compression
    #[arg(long)]
    store: bool,

    /// Stop at the first failing folder instead of skipping it
    #[arg(long)]
    fail_fast: bool,

    /// Move originals into this directory instead of the system trash
    #[arg(long, value_name = "DIR")]
    trash_dir: Option<PathBuf>,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

    /// Logging level (RUST_LOG overrides)
    #[arg(long, value_enum, default_value_t = LogLevel::Warning)]
    log_level: LogLevel,
}

fn parse_suffix(raw: &str) -> Result<String, String> {
    FixConfig::validate_suffix(raw).map_err(|e| e.to_string())?;
    Ok(raw.to_string())
}

/// Prints one status line per phase, like the status label of the original window
struct StatusLine;

impl EventSink for StatusLine {
    fn emit(&self, event: PipelineEvent) {
        match &event {
            PipelineEvent::Status { .. } | PipelineEvent::Complete { .. } => {
                println!("{}", event.message())
            }
            PipelineEvent::FolderFailed { .. } | PipelineEvent::Error { .. } => {
                eprintln!("{}", event.message())
            }
            PipelineEvent::FolderDone { .. } => log::debug!("{}", event.message()),
        }
    }
}

fn init_logging(level: LogLevel) {
    env_logger::Builder::new()
        .filter_level(level.into())
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn prompt_path() -> Result<String, dialoguer::Error> {
    dialoguer::Input::<String>::new()
        .with_prompt("Directory")
        .allow_empty(true)
        .interact_text()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let raw_path = match cli.path {
        Some(path) => path,
        None => match prompt_path() {
            Ok(path) => path,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(BAD_PATH);
            }
        },
    };

    let config = FixConfig::new(cli.suffix)
        .with_compression(if cli.store { CompressionMode::Stored } else { CompressionMode::Deflated })
        .with_failure_policy(if cli.fail_fast { FailurePolicy::FailFast } else { FailurePolicy::Isolate });

    let remover: Box<dyn Remover> = match cli.trash_dir {
        Some(dir) => Box::new(DirectoryTrash::new(dir)),
        None => Box::new(SystemTrash),
    };

    log::debug!("running with {:?}", config);
    match fix(&raw_path, &config, remover.as_ref(), &StatusLine) {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => log::error!("failed to serialize report: {}", e),
                }
            }
            match report.status() {
                FixStatus::Completed => ExitCode::from(SUCCESS),
                FixStatus::Partial { .. } => ExitCode::from(PARTIAL),
            }
        }
        Err(e) => exit_code_for(&e),
    }
}

fn exit_code_for(err: &FixError) -> ExitCode {
    log::debug!("{:?}", err);
    if err.is_validation() {
        ExitCode::from(BAD_PATH)
    } else {
        ExitCode::from(PIPELINE_ERROR)
    }
}
