use serde::{Deserialize, Serialize};
use crate::models::FixError;

/// Suffix of the folders that get packed
pub const DEFAULT_SUFFIX: &str = ".pages";

/// How file data is stored inside the archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompressionMode {
    #[default]
    Deflated,
    Stored,
}

/// What the pipeline does when one folder fails a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailurePolicy {
    /// Drop the failing folder from later phases and keep going
    #[default]
    Isolate,
    /// Abort the whole run on the first error
    FailFast,
}

/// Per-invocation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixConfig {
    pub suffix: String,
    #[serde(default)]
    pub compression: CompressionMode,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl FixConfig {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            ..Self::default()
        }
    }

    pub fn with_compression(mut self, compression: CompressionMode) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Reject a suffix that would match every folder or reach outside the directory
    pub fn validate_suffix(suffix: &str) -> Result<(), FixError> {
        if suffix.is_empty() || suffix.contains(['/', '\\']) {
            return Err(FixError::InvalidSuffix { suffix: suffix.to_string() });
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), FixError> {
        Self::validate_suffix(&self.suffix)
    }

    /// Strip the suffix from a candidate folder name
    ///
    /// Returns `None` when `name` does not end with the suffix.
    pub fn base_name<'a>(&self, name: &'a str) -> Option<&'a str> {
        name.strip_suffix(self.suffix.as_str())
    }
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
            compression: CompressionMode::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FixConfig::default();
        assert_eq!(config.suffix, ".pages");
        assert_eq!(config.compression, CompressionMode::Deflated);
        assert_eq!(config.failure_policy, FailurePolicy::Isolate);
    }

    #[test]
    fn test_base_name() {
        let config = FixConfig::default();
        assert_eq!(config.base_name("Notes.pages"), Some("Notes"));
        assert_eq!(config.base_name("a.b.pages"), Some("a.b"));
        assert_eq!(config.base_name("Notes.PAGES"), None);
        assert_eq!(config.base_name("Notes"), None);

        let config = FixConfig::new(".key");
        assert_eq!(config.base_name("Talk.key"), Some("Talk"));
    }

    #[test]
    fn test_suffix_validation() {
        assert!(FixConfig::default().validate().is_ok());
        assert!(FixConfig::new(".key").validate().is_ok());

        for bad in ["", "/", "x/.pages", "x\\.pages"] {
            let err = FixConfig::new(bad).validate().unwrap_err();
            assert!(matches!(err, FixError::InvalidSuffix { ref suffix } if suffix == bad));
            assert!(err.is_validation());
        }
    }

    #[test]
    fn test_serde_camel_case() {
        let config = FixConfig::default().with_failure_policy(FailurePolicy::FailFast);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"failurePolicy\":\"failFast\""));

        let parsed: FixConfig = serde_json::from_str(r#"{"suffix":".numbers"}"#).unwrap();
        assert_eq!(parsed.suffix, ".numbers");
        assert_eq!(parsed.compression, CompressionMode::Deflated);
    }
}
