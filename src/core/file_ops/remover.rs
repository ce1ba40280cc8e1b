use std::fs;
use std::path::{Component, Path, PathBuf};
use crate::models::FixError;

/// Recoverable removal of a packed folder
pub trait Remover {
    /// Move `path` somewhere it can be restored from
    fn remove(&self, path: &Path) -> Result<(), FixError>;
}

/// Lexically normalize a path
///
/// Drops `.` segments and redundant separators and folds `..` into the
/// preceding segment. The filesystem is not consulted, so symlinks are
/// not resolved.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// The platform recycle bin
pub struct SystemTrash;

impl Remover for SystemTrash {
    fn remove(&self, path: &Path) -> Result<(), FixError> {
        let normalized = normalize_path(path);
        trash::delete(&normalized).map_err(|e| FixError::Trash {
            path: normalized.clone(),
            message: e.to_string(),
        })?;
        log::info!("moved {} to trash", normalized.display());
        Ok(())
    }
}

/// An app-level trash: folders are moved into a chosen directory
///
/// Name clashes inside the trash directory get a ` (n)` suffix.
pub struct DirectoryTrash {
    dir: PathBuf,
}

impl DirectoryTrash {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn free_slot(&self, name: &str) -> PathBuf {
        let first = self.dir.join(name);
        if fs::symlink_metadata(&first).is_err() {
            return first;
        }
        let mut n = 1usize;
        loop {
            let candidate = self.dir.join(format!("{} ({})", name, n));
            if fs::symlink_metadata(&candidate).is_err() {
                return candidate;
            }
            n += 1;
        }
    }
}

impl Remover for DirectoryTrash {
    fn remove(&self, path: &Path) -> Result<(), FixError> {
        let normalized = normalize_path(path);
        let trash_err = |message: String| FixError::Trash {
            path: normalized.clone(),
            message,
        };

        let name = normalized
            .file_name()
            .ok_or_else(|| trash_err("path has no final segment".to_string()))?
            .to_string_lossy()
            .to_string();

        fs::create_dir_all(&self.dir).map_err(|e| {
            trash_err(format!("Failed to create trash directory {}: {}", self.dir.display(), e))
        })?;

        let slot = self.free_slot(&name);
        fs::rename(&normalized, &slot).map_err(|e| trash_err(e.to_string()))?;

        log::info!("moved {} to {}", normalized.display(), slot.display());
        Ok(())
    }
}
