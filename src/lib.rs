// Module declarations
pub mod models;
pub mod core;
pub mod commands;
pub mod utils;

pub use crate::commands::fix::{fix, fix_path};
pub use crate::core::file_ops::remover::{DirectoryTrash, Remover, SystemTrash};
pub use crate::models::{
    CompressionMode, FailurePolicy, FixConfig, FixError, FixReport, FixStatus, FolderOutcome,
    FolderStatus, Phase, DEFAULT_SUFFIX,
};
pub use crate::utils::progress::{EventSink, LogSink, PipelineEvent};
