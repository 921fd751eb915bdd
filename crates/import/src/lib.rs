//! Async import of presentation documents into a slide store.
//!
//! Decodes raw trees through a pluggable parser, converts them with
//! `deck-core`, rasterizes legacy metafile pictures and merges the result.

pub mod importer;
pub mod parser;
pub mod store;
pub mod transcode;

pub use importer::{ImportOptions, ImportReport, Importer};
pub use parser::{DocumentParser, InputVariant, JsonTreeParser};
pub use store::{MemoryStore, MergeStrategy, SlideStore};
pub use transcode::{ImageTranscoder, NoTranscoder, Notice, TranscodeError};
