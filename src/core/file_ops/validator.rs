use std::fs;
use std::path::PathBuf;
use crate::models::{FixError, TargetDir};

/// Strip a single trailing `/` or `\` from a user-typed path
pub fn strip_trailing_separator(raw: &str) -> &str {
    raw.strip_suffix('/')
        .or_else(|| raw.strip_suffix('\\'))
        .unwrap_or(raw)
}

/// Text after the last platform path separator
pub fn final_segment(path: &str) -> &str {
    path.rsplit(std::path::is_separator).next().unwrap_or(path)
}

/// Validate the directory the user asked to fix
///
/// Checks run in order and stop at the first failure:
/// 1. empty path -> `EmptyPath`
/// 2. whitespace in the final segment -> `InvalidNameHasSpace` (no filesystem access)
/// 3. not a listable directory -> `PathNotFound`
///
/// Missing, not-a-directory and permission failures all surface as `PathNotFound`.
pub fn validate_path(raw: &str) -> Result<TargetDir, FixError> {
    let trimmed = strip_trailing_separator(raw);
    if trimmed.is_empty() {
        return Err(FixError::EmptyPath);
    }

    let name = final_segment(trimmed);
    if name.chars().any(char::is_whitespace) {
        return Err(FixError::InvalidNameHasSpace { name: name.to_string() });
    }

    let path = PathBuf::from(trimmed);
    fs::read_dir(&path).map_err(|source| FixError::PathNotFound {
        path: path.clone(),
        source,
    })?;

    log::debug!("validated working directory {}", path.display());
    Ok(TargetDir::new(path, name.to_string()))
}
