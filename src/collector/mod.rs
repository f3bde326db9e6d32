pub mod decoder;
pub mod file_collector;
pub mod record_writer;
pub mod summary;

pub use decoder::{read_text, DecodeOutcome};
pub use file_collector::FileCollector;
pub use record_writer::{RecordWriter, PATH_LABEL, SEPARATOR};
pub use summary::{CollectionProgress, CollectionSummary};
