use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use crate::models::{CandidateFolder, FixConfig, FixError};

/// Rename `<base>.zip` to `<base><suffix>` in the working directory
///
/// Fails when the archive is missing or when anything, file or folder,
/// already holds the target name. The existing target is never replaced.
pub fn rename_archive(
    working_dir: &Path,
    folder: &CandidateFolder,
    config: &FixConfig,
) -> Result<PathBuf, FixError> {
    let from = working_dir.join(folder.archive_name());
    let to = working_dir.join(format!("{}{}", folder.base_name, config.suffix));
    let rename_err = |message: String| FixError::Rename {
        from: from.clone(),
        to: to.clone(),
        message,
    };

    match fs::symlink_metadata(&from) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(rename_err("source archive is not a file".to_string())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(rename_err("source archive is missing".to_string()))
        }
        Err(e) => return Err(rename_err(e.to_string())),
    }

    if fs::symlink_metadata(&to).is_ok() {
        return Err(rename_err("target already exists".to_string()));
    }

    fs::rename(&from, &to).map_err(|e| rename_err(e.to_string()))?;
    log::info!("renamed {} to {}", from.display(), to.display());
    Ok(to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn notes() -> CandidateFolder {
        CandidateFolder::new("Notes.pages".into(), "Notes".into())
    }

    #[test]
    fn test_rename_takes_folder_name() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Notes.zip"), b"PK").unwrap();

        let renamed = rename_archive(temp.path(), &notes(), &FixConfig::default()).unwrap();
        assert_eq!(renamed, temp.path().join("Notes.pages"));
        assert!(renamed.is_file());
        assert!(!temp.path().join("Notes.zip").exists());
    }

    #[test]
    fn test_rename_refuses_existing_target() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Notes.zip"), b"PK").unwrap();
        fs::create_dir(temp.path().join("Notes.pages")).unwrap();

        let err = rename_archive(temp.path(), &notes(), &FixConfig::default()).unwrap_err();
        assert!(matches!(err, FixError::Rename { ref message, .. } if message.contains("already exists")));
        assert!(temp.path().join("Notes.zip").exists());
    }

    #[test]
    fn test_rename_missing_source() {
        let temp = TempDir::new().unwrap();
        let err = rename_archive(temp.path(), &notes(), &FixConfig::default()).unwrap_err();
        assert!(matches!(err, FixError::Rename { ref message, .. } if message.contains("missing")));
    }
}
