use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Pipeline phase, in execution order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Scanning,
    Archiving,
    Removing,
    Renaming,
}

/// A validated working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDir {
    path: PathBuf,
    name: String,
}

impl TargetDir {
    pub(crate) fn new(path: PathBuf, name: String) -> Self {
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path segment as typed by the user
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A top-level folder whose name ends with the configured suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFolder {
    /// Folder name, suffix included
    pub name: String,
    /// Name with the suffix removed
    pub base_name: String,
}

impl CandidateFolder {
    pub fn new(name: String, base_name: String) -> Self {
        Self { name, base_name }
    }

    /// `<base>.zip`, the intermediate archive name
    pub fn archive_name(&self) -> String {
        format!("{}.zip", self.base_name)
    }
}

/// Final state of one folder after a run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum FolderStatus {
    Fixed,
    Failed { phase: Phase, message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FolderOutcome {
    pub name: String,
    /// Files written into the archive, 0 if archiving never finished
    pub entries: usize,
    pub status: FolderStatus,
}

impl FolderOutcome {
    pub fn is_fixed(&self) -> bool {
        self.status == FolderStatus::Fixed
    }
}

/// Overall result of a run that got past validation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum FixStatus {
    Completed,
    Partial { failed: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FixReport {
    pub directory: PathBuf,
    pub folders: Vec<FolderOutcome>,
}

impl FixReport {
    pub fn status(&self) -> FixStatus {
        match self.folders.iter().filter(|f| !f.is_fixed()).count() {
            0 => FixStatus::Completed,
            failed => FixStatus::Partial { failed },
        }
    }

    pub fn fixed(&self) -> impl Iterator<Item = &FolderOutcome> {
        self.folders.iter().filter(|f| f.is_fixed())
    }

    pub fn failed(&self) -> impl Iterator<Item = &FolderOutcome> {
        self.folders.iter().filter(|f| !f.is_fixed())
    }

    /// One-line summary for the status display
    pub fn summary(&self) -> String {
        match self.status() {
            FixStatus::Completed => "Completed.".to_string(),
            FixStatus::Partial { failed } => format!(
                "Completed with errors: {} of {} folders failed.",
                failed,
                self.folders.len()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(name: &str, status: FolderStatus) -> FolderOutcome {
        FolderOutcome { name: name.to_string(), entries: 1, status }
    }

    #[test]
    fn test_empty_report_is_completed() {
        let report = FixReport { directory: PathBuf::from("/tmp/work"), folders: vec![] };
        assert_eq!(report.status(), FixStatus::Completed);
        assert_eq!(report.summary(), "Completed.");
    }

    #[test]
    fn test_partial_report() {
        let report = FixReport {
            directory: PathBuf::from("/tmp/work"),
            folders: vec![
                outcome("A.pages", FolderStatus::Fixed),
                outcome(
                    "B.pages",
                    FolderStatus::Failed { phase: Phase::Removing, message: "busy".into() },
                ),
            ],
        };
        assert_eq!(report.status(), FixStatus::Partial { failed: 1 });
        assert_eq!(report.fixed().count(), 1);
        assert_eq!(report.failed().next().unwrap().name, "B.pages");
        assert!(report.summary().contains("1 of 2"));
    }

    #[test]
    fn test_archive_name() {
        let folder = CandidateFolder::new("Notes.pages".into(), "Notes".into());
        assert_eq!(folder.archive_name(), "Notes.zip");
    }

    #[test]
    fn test_report_serializes() {
        let report = FixReport {
            directory: PathBuf::from("/tmp/work"),
            folders: vec![outcome(
                "B.pages",
                FolderStatus::Failed { phase: Phase::Archiving, message: "denied".into() },
            )],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["folders"][0]["status"]["state"], "failed");
        assert_eq!(json["folders"][0]["status"]["phase"], "archiving");
    }
}
