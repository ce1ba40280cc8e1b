use std::path::PathBuf;
use thiserror::Error;

use super::task::Phase;

/// Error kinds for a pages-fix run
///
/// The first three variants are validation errors and are raised before
/// anything on disk is touched. The rest come from the pipeline phases.
#[derive(Error, Debug)]
pub enum FixError {
    #[error("Directory path is empty")]
    EmptyPath,

    #[error("Folder suffix '{suffix}' is empty or contains a path separator")]
    InvalidSuffix { suffix: String },

    #[error("Directory name '{name}' contains whitespace")]
    InvalidNameHasSpace { name: String },

    #[error("Directory {} does not exist or cannot be listed: {source}", .path.display())]
    PathNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write archive for {folder}: {message}")]
    ArchiveWrite { folder: String, message: String },

    #[error("Failed to move {} to trash: {message}", .path.display())]
    Trash { path: PathBuf, message: String },

    #[error("Failed to rename {} to {}: {message}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        message: String,
    },
}

impl FixError {
    /// True for errors raised before any filesystem mutation
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FixError::EmptyPath
                | FixError::InvalidSuffix { .. }
                | FixError::InvalidNameHasSpace { .. }
                | FixError::PathNotFound { .. }
        )
    }

    /// Pipeline phase that produced the error
    pub fn phase(&self) -> Phase {
        match self {
            FixError::EmptyPath
            | FixError::InvalidSuffix { .. }
            | FixError::InvalidNameHasSpace { .. }
            | FixError::PathNotFound { .. } => Phase::Scanning,
            FixError::ArchiveWrite { .. } => Phase::Archiving,
            FixError::Trash { .. } => Phase::Removing,
            FixError::Rename { .. } => Phase::Renaming,
        }
    }

    /// Fixed text shown to the user for this error kind
    pub fn user_message(&self) -> String {
        match self {
            FixError::InvalidNameHasSpace { .. } => {
                "Error: Current directory name should not contain spaces!".to_string()
            }
            FixError::PathNotFound { .. } => "Error: Directory does not exist!".to_string(),
            FixError::EmptyPath => "Error: Directory path is invalid!".to_string(),
            FixError::InvalidSuffix { .. } => "Error: Folder suffix is invalid!".to_string(),
            other => format!("Error: {}", other),
        }
    }
}

impl From<FixError> for String {
    fn from(err: FixError) -> String {
        err.user_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_fixed() {
        let err = FixError::InvalidNameHasSpace { name: "my work".into() };
        assert_eq!(err.user_message(), "Error: Current directory name should not contain spaces!");
        assert!(err.is_validation());

        let err = FixError::PathNotFound {
            path: PathBuf::from("/nope"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(err.user_message(), "Error: Directory does not exist!");

        assert_eq!(FixError::EmptyPath.user_message(), "Error: Directory path is invalid!");
    }

    #[test]
    fn test_phase_errors_carry_detail() {
        let err = FixError::Rename {
            from: PathBuf::from("Notes.zip"),
            to: PathBuf::from("Notes.pages"),
            message: "target already exists".into(),
        };
        assert!(!err.is_validation());
        assert_eq!(err.phase(), Phase::Renaming);
        let msg: String = err.into();
        assert!(msg.starts_with("Error: Failed to rename"));
        assert!(msg.contains("target already exists"));
    }
}
