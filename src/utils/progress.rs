use serde::Serialize;
use crate::models::Phase;

/// Event emitted by the pipeline as it runs
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum PipelineEvent {
    /// A new phase has started
    Status { phase: Phase, message: String },
    /// One folder finished a phase
    FolderDone { name: String, phase: Phase },
    /// One folder failed a phase and was dropped from the rest of the run
    FolderFailed { name: String, phase: Phase, message: String },
    /// Terminal success (possibly partial)
    Complete { message: String },
    /// Terminal failure
    Error { message: String },
}

impl PipelineEvent {
    /// Text for a one-line status display
    pub fn message(&self) -> String {
        match self {
            PipelineEvent::Status { message, .. }
            | PipelineEvent::Complete { message }
            | PipelineEvent::Error { message } => message.clone(),
            PipelineEvent::FolderDone { name, phase } => format!("{}: {:?} done", name, phase),
            PipelineEvent::FolderFailed { name, message, .. } => format!("{}: {}", name, message),
        }
    }
}

/// Receiver of pipeline events, implemented by whatever displays status
pub trait EventSink {
    fn emit(&self, event: PipelineEvent);
}

impl<F: Fn(PipelineEvent)> EventSink for F {
    fn emit(&self, event: PipelineEvent) {
        self(event)
    }
}

/// Forwards every event to the `log` facade
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: PipelineEvent) {
        match &event {
            PipelineEvent::FolderFailed { .. } => log::warn!("{}", event.message()),
            PipelineEvent::Error { .. } => log::error!("{}", event.message()),
            PipelineEvent::FolderDone { .. } => log::debug!("{}", event.message()),
            _ => log::info!("{}", event.message()),
        }
    }
}

/// Typed helpers over an [`EventSink`]
pub struct ProgressEmitter<'a> {
    sink: &'a dyn EventSink,
}

impl<'a> ProgressEmitter<'a> {
    pub fn new(sink: &'a dyn EventSink) -> Self {
        Self { sink }
    }

    pub fn emit_status(&self, phase: Phase, message: impl Into<String>) {
        self.sink.emit(PipelineEvent::Status { phase, message: message.into() });
    }

    pub fn emit_folder_done(&self, name: &str, phase: Phase) {
        self.sink.emit(PipelineEvent::FolderDone { name: name.to_string(), phase });
    }

    pub fn emit_folder_failed(&self, name: &str, phase: Phase, message: impl Into<String>) {
        self.sink.emit(PipelineEvent::FolderFailed {
            name: name.to_string(),
            phase,
            message: message.into(),
        });
    }

    pub fn emit_complete(&self, message: impl Into<String>) {
        self.sink.emit(PipelineEvent::Complete { message: message.into() });
    }

    pub fn emit_error(&self, message: impl Into<String>) {
        self.sink.emit(PipelineEvent::Error { message: message.into() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_closure_sink_receives_events() {
        let seen = RefCell::new(Vec::new());
        let sink = |event: PipelineEvent| seen.borrow_mut().push(event);
        let emitter = ProgressEmitter::new(&sink);

        emitter.emit_status(Phase::Archiving, "Creating zip archives of folders...");
        emitter.emit_complete("Completed.");

        let seen = seen.into_inner();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].message(), "Creating zip archives of folders...");
        assert_eq!(seen[1], PipelineEvent::Complete { message: "Completed.".into() });
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let event = PipelineEvent::FolderFailed {
            name: "B.pages".into(),
            phase: Phase::Renaming,
            message: "target already exists".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "folderFailed");
        assert_eq!(json["phase"], "renaming");
    }
}
