use std::fs;
use crate::models::{CandidateFolder, FixConfig, FixError, TargetDir};

/// Finds the top-level folders that the pipeline should pack
///
/// Only immediate children of the working directory are considered. A
/// child qualifies when it is a directory (symlinks are followed) and its
/// name ends with the configured suffix, compared case-sensitively.
pub struct FolderScanner<'a> {
    config: &'a FixConfig,
}

impl<'a> FolderScanner<'a> {
    pub fn new(config: &'a FixConfig) -> Self {
        Self { config }
    }

    /// List candidate folders in directory-listing order
    ///
    /// An empty result is not an error.
    pub fn scan(&self, target: &TargetDir) -> Result<Vec<CandidateFolder>, FixError> {
        let entries = fs::read_dir(target.path()).map_err(|source| FixError::PathNotFound {
            path: target.path().to_path_buf(),
            source,
        })?;

        let mut folders = Vec::new();
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                log::debug!("skipping non UTF-8 entry {}", path.display());
                continue;
            };

            if let Some(base) = self.config.base_name(name) {
                log::debug!("found candidate folder {}", name);
                folders.push(CandidateFolder::new(name.to_string(), base.to_string()));
            }
        }

        Ok(folders)
    }
}
