pub mod error;
pub mod task;
pub mod config;

// Re-export commonly used types
pub use error::FixError;
pub use task::{CandidateFolder, FixReport, FixStatus, FolderOutcome, FolderStatus, Phase, TargetDir};
pub use config::{CompressionMode, FailurePolicy, FixConfig, DEFAULT_SUFFIX};
