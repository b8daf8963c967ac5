pub mod blocks;
pub mod normalize;
pub mod sections;
pub mod sentences;

use tracing::debug;

use crate::document::{RawDocument, TitledSegment};
use blocks::{classify_line, Block, BlockContext};
use normalize::normalize;
use sections::SegmentBuilder;
use sentences::{SentenceSegmenter, UnicodeSentences};

/// Three-pass pipeline per line: classify → normalize → split sentences.
#[derive(Debug, Clone, Default)]
pub struct Converter<S = UnicodeSentences> {
    segmenter: S,
}

impl<S: SentenceSegmenter> Converter<S> {
    pub fn new(segmenter: S) -> Self {
        Converter { segmenter }
    }

    /// Convert one document into its titled segments, in document order.
    pub fn convert(&self, doc: &RawDocument) -> Vec<TitledSegment> {
        let mut segments = Vec::new();
        let mut ctx = BlockContext::None;
        let mut builder = SegmentBuilder::new(&doc.title);

        for line in doc.text.split('\n') {
            match classify_line(line, &mut ctx) {
                Block::Heading { level, text } => {
                    segments.extend(builder.on_heading(level, &text));
                }
                block => {
                    let Some(text) = block.body_text() else {
                        continue;
                    };
                    let clean = normalize(text);
                    if clean.is_empty() {
                        continue;
                    }
                    builder.push_sentences(&self.sentences(&clean));
                }
            }
        }

        if ctx != BlockContext::None {
            debug!(title = %doc.title, context = ?ctx, "document ended inside an open block");
        }
        segments.extend(builder.finish());
        segments
    }

    fn sentences(&self, line: &str) -> Vec<String> {
        match self.segmenter.segment(line) {
            Ok(sentences) if !sentences.is_empty() => sentences,
            Ok(_) => vec![line.to_string()],
            Err(e) => {
                debug!(error = %e, "segmenter failed, keeping line whole");
                vec![line.to_string()]
            }
        }
    }
}

/// Convert with the default sentence segmenter.
pub fn convert_document(doc: &RawDocument) -> Vec<TitledSegment> {
    Converter::<UnicodeSentences>::default().convert(doc)
}
