use crate::core::compression::zip_handler::ZipHandler;
use crate::core::file_ops::{
    remover::{Remover, SystemTrash},
    renamer::rename_archive,
    scanner::FolderScanner,
    validator::validate_path,
};
use crate::models::{
    CandidateFolder, FailurePolicy, FixConfig, FixError, FixReport, FolderOutcome, FolderStatus,
    Phase,
};
use crate::utils::progress::{EventSink, LogSink, ProgressEmitter};

/// One folder's progress through the run
struct FolderSlot {
    folder: CandidateFolder,
    entries: usize,
    failure: Option<(Phase, String)>,
}

impl FolderSlot {
    fn alive(&self) -> bool {
        self.failure.is_none()
    }
}

/// Pack every candidate folder under `raw_path`
///
/// Runs validation, then scanning, then three phases over the whole
/// folder set: all folders are archived before any is removed, and all
/// are removed before any archive is renamed.
///
/// Validation errors are returned before anything on disk changes. What
/// happens on a phase error depends on `config.failure_policy`: with
/// `Isolate` the folder is recorded as failed and skipped by the later
/// phases, with `FailFast` the error is returned immediately and whatever
/// the earlier phases did stays on disk.
pub fn fix(
    raw_path: &str,
    config: &FixConfig,
    remover: &dyn Remover,
    sink: &dyn EventSink,
) -> Result<FixReport, FixError> {
    let emitter = ProgressEmitter::new(sink);

    if let Err(e) = config.validate() {
        emitter.emit_error(e.user_message());
        return Err(e);
    }

    emitter.emit_status(Phase::Scanning, format!("Getting all {} folders...", config.suffix));
    let (target, folders) = match validate_path(raw_path)
        .and_then(|target| FolderScanner::new(config).scan(&target).map(|f| (target, f)))
    {
        Ok(found) => found,
        Err(e) => {
            emitter.emit_error(e.user_message());
            return Err(e);
        }
    };
    log::info!("{} candidate folders in {}", folders.len(), target.path().display());

    let working_dir = target.path();
    let mut slots: Vec<FolderSlot> = folders
        .into_iter()
        .map(|folder| FolderSlot { folder, entries: 0, failure: None })
        .collect();

    // === Phase 1: archive everything ===
    emitter.emit_status(Phase::Archiving, "Creating zip archives of folders...");
    let handler = ZipHandler::new(config.compression);
    for slot in slots.iter_mut() {
        match handler.create(working_dir, &slot.folder) {
            Ok(summary) => {
                slot.entries = summary.entries;
                emitter.emit_folder_done(&slot.folder.name, Phase::Archiving);
            }
            Err(e) => record_failure(config.failure_policy, &emitter, slot, e)?,
        }
    }

    // === Phase 2: trash the originals ===
    emitter.emit_status(Phase::Removing, "Deleting original folders...");
    for slot in slots.iter_mut().filter(|s| s.alive()) {
        match remover.remove(&working_dir.join(&slot.folder.name)) {
            Ok(()) => emitter.emit_folder_done(&slot.folder.name, Phase::Removing),
            Err(e) => {
                // Folder is still in place, so its archive is only clutter
                if config.failure_policy == FailurePolicy::Isolate {
                    ZipHandler::discard(&working_dir.join(slot.folder.archive_name()));
                }
                record_failure(config.failure_policy, &emitter, slot, e)?;
            }
        }
    }

    // === Phase 3: archives take over the folder names ===
    emitter.emit_status(
        Phase::Renaming,
        format!("Renaming from zip to {}...", config.suffix.trim_start_matches('.')),
    );
    for slot in slots.iter_mut().filter(|s| s.alive()) {
        match rename_archive(working_dir, &slot.folder, config) {
            Ok(_) => emitter.emit_folder_done(&slot.folder.name, Phase::Renaming),
            Err(e) => record_failure(config.failure_policy, &emitter, slot, e)?,
        }
    }

    let report = FixReport {
        directory: working_dir.to_path_buf(),
        folders: slots
            .into_iter()
            .map(|slot| FolderOutcome {
                name: slot.folder.name,
                entries: slot.entries,
                status: match slot.failure {
                    None => FolderStatus::Fixed,
                    Some((phase, message)) => FolderStatus::Failed { phase, message },
                },
            })
            .collect(),
    };

    emitter.emit_complete(report.summary());
    Ok(report)
}

/// `fix` with the default configuration, the system trash and log output
pub fn fix_path(raw_path: &str) -> Result<FixReport, FixError> {
    fix(raw_path, &FixConfig::default(), &SystemTrash, &LogSink)
}

fn record_failure(
    policy: FailurePolicy,
    emitter: &ProgressEmitter<'_>,
    slot: &mut FolderSlot,
    err: FixError,
) -> Result<(), FixError> {
    match policy {
        FailurePolicy::FailFast => {
            emitter.emit_error(err.user_message());
            Err(err)
        }
        FailurePolicy::Isolate => {
            let phase = err.phase();
            let message = err.to_string();
            emitter.emit_folder_failed(&slot.folder.name, phase, message.clone());
            slot.failure = Some((phase, message));
            Ok(())
        }
    }
}
