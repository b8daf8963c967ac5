use crate::document::TitledSegment;

const TITLE_SEPARATOR: &str = " - ";

/// Accumulates sentences under the current heading path and cuts a segment at
/// every heading.
#[derive(Debug, Clone)]
pub struct SegmentBuilder {
    titles: Vec<String>,
    body: String,
}

impl SegmentBuilder {
    pub fn new(doc_title: &str) -> Self {
        SegmentBuilder {
            titles: vec![doc_title.to_string()],
            body: String::new(),
        }
    }

    /// Heading path joined for display, e.g. `서울 - 역사 - 조선`.
    pub fn title(&self) -> String {
        self.titles.join(TITLE_SEPARATOR)
    }

    #[cfg(test)]
    fn depth(&self) -> usize {
        self.titles.len()
    }

    /// Append the sentences of one source line as a block.
    pub fn push_sentences(&mut self, sentences: &[String]) {
        if sentences.is_empty() {
            return;
        }
        self.body.push_str(&sentences.join("\n"));
        self.body.push('\n');
    }

    /// Close the running segment and move under a heading of `level` `=` marks.
    ///
    /// The path is cut to `level - 1` entries before the heading is appended, so
    /// skipped levels are not padded. The document title is never dropped.
    pub fn on_heading(&mut self, level: usize, text: &str) -> Option<TitledSegment> {
        let flushed = self.take_segment();
        self.titles.truncate(level.saturating_sub(1).max(1));
        self.titles.push(text.to_string());
        flushed
    }

    /// Flush whatever is left at end of document.
    pub fn finish(mut self) -> Option<TitledSegment> {
        self.take_segment()
    }

    fn take_segment(&mut self) -> Option<TitledSegment> {
        if self.body.is_empty() {
            return None;
        }
        Some(TitledSegment {
            title: self.title(),
            body: std::mem::take(&mut self.body),
        })
    }
}
