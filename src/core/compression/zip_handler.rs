use std::fmt::Display;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::{write::SimpleFileOptions, CompressionMethod, ZipArchive, ZipWriter};
use crate::models::{CandidateFolder, CompressionMode, FixError};

/// Result of packing one folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// `<base>.zip` in the working directory
    pub path: PathBuf,
    /// Number of file entries written
    pub entries: usize,
}

/// A file found under a candidate folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path on disk
    pub source: PathBuf,
    /// Entry name, relative to the working directory and `/`-separated
    pub name: String,
}

/// ZIP writer for candidate folders
///
/// Entry names keep the folder name as their first component, so
/// `Notes.pages/img/b.png` on disk becomes the entry `Notes.pages/img/b.png`.
/// Directories are never written as entries; a folder holding no files
/// at any depth yields an empty archive.
pub struct ZipHandler {
    compression: CompressionMode,
}

impl ZipHandler {
    pub fn new(compression: CompressionMode) -> Self {
        Self { compression }
    }

    /// Enumerate every file below `working_dir/folder_name`, at any depth
    ///
    /// Symlinked files are followed, symlinked directories are not descended into.
    pub fn collect_files(working_dir: &Path, folder_name: &str) -> Result<Vec<ArchiveEntry>, FixError> {
        let root = working_dir.join(folder_name);
        let mut files = Vec::new();

        for entry in WalkDir::new(&root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| archive_err(folder_name, format!("Failed to walk folder: {}", e)))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(working_dir).map_err(|e| {
                archive_err(folder_name, format!("Failed to calculate relative path: {}", e))
            })?;
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            files.push(ArchiveEntry { source: path.to_path_buf(), name });
        }

        Ok(files)
    }

    /// Pack a candidate folder into `<base>.zip` inside `working_dir`
    ///
    /// The archive is first written to an exclusively created temporary
    /// file next to the target and only moved into place once the central
    /// directory is written and the entry count has been checked. On any
    /// failure the temporary file is removed and no `<base>.zip` is left.
    pub fn create(&self, working_dir: &Path, folder: &CandidateFolder) -> Result<ArchiveSummary, FixError> {
        let files = Self::collect_files(working_dir, &folder.name)?;
        let output_path = working_dir.join(folder.archive_name());

        let temp = tempfile::Builder::new()
            .prefix(&format!(".{}_", folder.base_name))
            .suffix(".zip.part")
            .tempfile_in(working_dir)
            .map_err(|e| archive_err(&folder.name, format!("Failed to create temporary archive: {}", e)))?;

        let mut zip = ZipWriter::new(temp);
        for file in &files {
            self.write_entry(&mut zip, file)
                .map_err(|e| archive_err(&folder.name, e))?;
        }

        let temp = zip
            .finish()
            .map_err(|e| archive_err(&folder.name, format!("Failed to finalize ZIP archive: {}", e)))?;

        let written = Self::entry_names(temp.path())
            .map_err(|e| archive_err(&folder.name, format!("Archive does not read back: {}", e)))?;
        if written.len() != files.len() {
            return Err(archive_err(
                &folder.name,
                format!("Archive holds {} entries, expected {}", written.len(), files.len()),
            ));
        }

        // Never replace a file the user already has under this name
        temp.persist_noclobber(&output_path).map_err(|e| {
            archive_err(
                &folder.name,
                format!("Failed to move archive into place at {}: {}", output_path.display(), e.error),
            )
        })?;

        log::info!("archived {} ({} files) into {}", folder.name, files.len(), output_path.display());
        Ok(ArchiveSummary { path: output_path, entries: files.len() })
    }

    fn write_entry<W: io::Write + io::Seek>(&self, zip: &mut ZipWriter<W>, file: &ArchiveEntry) -> Result<(), String> {
        let mut source = File::open(&file.source)
            .map_err(|e| format!("Failed to read file {}: {}", file.source.display(), e))?;
        let metadata = source
            .metadata()
            .map_err(|e| format!("Failed to read metadata of {}: {}", file.source.display(), e))?;

        let method = match self.compression {
            CompressionMode::Deflated => CompressionMethod::Deflated,
            CompressionMode::Stored => CompressionMethod::Stored,
        };
        let options = SimpleFileOptions::default()
            .compression_method(method)
            .large_file(metadata.len() >= u32::MAX as u64);

        #[cfg(unix)]
        let options = {
            use std::os::unix::fs::PermissionsExt;
            options.unix_permissions(metadata.permissions().mode())
        };

        zip.start_file(file.name.as_str(), options)
            .map_err(|e| format!("Failed to start file {} in archive: {}", file.name, e))?;
        io::copy(&mut source, zip)
            .map_err(|e| format!("Failed to write file {} to archive: {}", file.name, e))?;

        log::debug!("added {}", file.name);
        Ok(())
    }

    /// Entry names of an existing archive, in central directory order
    pub fn entry_names(archive_path: &Path) -> Result<Vec<String>, zip::result::ZipError> {
        let file = File::open(archive_path)?;
        let archive = ZipArchive::new(file)?;
        Ok(archive.file_names().map(str::to_string).collect())
    }

    /// Remove an archive left behind by a folder that could not be finished
    pub fn discard(archive_path: &Path) {
        match fs::remove_file(archive_path) {
            Ok(()) => log::info!("discarded {}", archive_path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("could not discard {}: {}", archive_path.display(), e),
        }
    }
}

impl Default for ZipHandler {
    fn default() -> Self {
        Self::new(CompressionMode::default())
    }
}

fn archive_err(folder: &str, message: impl Display) -> FixError {
    FixError::ArchiveWrite {
        folder: folder.to_string(),
        message: message.to_string(),
    }
}
