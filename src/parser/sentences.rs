use unicode_segmentation::UnicodeSegmentation;

use crate::error::SegmentError;

/// Splits one normalized line into sentences.
pub trait SentenceSegmenter: Send + Sync {
    fn segment(&self, line: &str) -> Result<Vec<String>, SegmentError>;
}

/// UAX #29 sentence boundaries. Never fails and never drops text.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSentences;

impl SentenceSegmenter for UnicodeSentences {
    fn segment(&self, line: &str) -> Result<Vec<String>, SegmentError> {
        Ok(line
            .split_sentence_bounds()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect())
    }
}
