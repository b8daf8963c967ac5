pub mod document;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod settings;
pub mod shard;

pub use document::{RawDocument, TitledSegment};
pub use error::{Error, Result, SegmentError};
pub use parser::{convert_document, Converter};
