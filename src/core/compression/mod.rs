// Archive compression modules
pub mod zip_handler;

pub use zip_handler::{ArchiveEntry, ArchiveSummary, ZipHandler};
