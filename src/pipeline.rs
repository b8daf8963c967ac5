use std::sync::mpsc;
use std::thread;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde_json::Value;
use tracing::warn;

use crate::document::{parse_record, TitledSegment};
use crate::error::Result;
use crate::parser::sentences::SentenceSegmenter;
use crate::parser::Converter;
use crate::shard::{ShardSummary, ShardWriter};

/// Counts reported after a dump has been processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub documents: usize,
    pub rejected: usize,
    pub output: ShardSummary,
}

pub fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Convert every dump record on a worker pool and stream the segments into `writer`.
///
/// Documents reach the writer in completion order; the segments of one
/// document always stay together and in order.
pub fn process_records<S: SentenceSegmenter>(
    records: Vec<Value>,
    converter: &Converter<S>,
    mut writer: ShardWriter,
    threads: Option<usize>,
    pb: &ProgressBar,
) -> Result<RunStats> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.unwrap_or(0))
        .build()?;
    let (tx, rx) = mpsc::channel::<(usize, Result<Vec<TitledSegment>>)>();

    let mut stats = RunStats::default();
    thread::scope(|scope| -> Result<()> {
        let pool = &pool;
        scope.spawn(move || {
            pool.install(|| {
                // a send error means the writer bailed out; stop converting
                let _ = records
                    .into_par_iter()
                    .enumerate()
                    .try_for_each_with(tx, |tx, (index, record)| {
                        let converted = parse_record(index, record).map(|doc| converter.convert(&doc));
                        tx.send((index, converted))
                    });
            })
        });

        for (index, converted) in rx {
            match converted {
                Ok(segments) => {
                    stats.documents += 1;
                    for segment in &segments {
                        writer.write(segment)?;
                    }
                }
                Err(e) => {
                    warn!(index, error = %e, "skipping dump record");
                    stats.rejected += 1;
                }
            }
            pb.inc(1);
        }
        Ok(())
    })?;

    stats.output = writer.finish()?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shard::OutputFormat;
    use serde_json::json;

    fn shard_text(summary: &ShardSummary) -> String {
        summary
            .shards
            .iter()
            .map(|p| std::fs::read_to_string(p).unwrap())
            .collect()
    }

    #[test]
    fn rejected_records_are_counted_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ShardWriter::create(dir.path(), "namu", 1_000, OutputFormat::Text).unwrap();
        let records = vec![
            json!({ "title": "서울", "text": "서울은 크다.\n== 역사 ==\n오래되었다." }),
            json!({ "title": "제목만" }),
            json!({ "text": "본문만" }),
        ];

        let converter: Converter = Converter::default();
        let stats = process_records(
            records,
            &converter,
            writer,
            Some(2),
            &ProgressBar::hidden(),
        )
        .unwrap();

        assert_eq!(stats.documents, 1);
        assert_eq!(stats.rejected, 2);
        assert_eq!(stats.output.segments, 2);
        assert_eq!(
            shard_text(&stats.output),
            "서울\n서울은 크다.\n\n서울 - 역사\n오래되었다.\n\n"
        );
    }

    #[test]
    fn document_segments_stay_contiguous() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ShardWriter::create(dir.path(), "namu", 1_000_000, OutputFormat::Text).unwrap();
        let records: Vec<_> = (0..50)
            .map(|i| {
                json!({
                    "title": format!("문서{i}"),
                    "text": "첫 문단.\n== 둘 ==\n둘째 문단.\n== 셋 ==\n셋째 문단.",
                })
            })
            .collect();

        let converter: Converter = Converter::default();
        let stats = process_records(
            records,
            &converter,
            writer,
            Some(4),
            &ProgressBar::hidden(),
        )
        .unwrap();

        assert_eq!(stats.documents, 50);
        assert_eq!(stats.output.segments, 150);
        let text = shard_text(&stats.output);
        let titles: Vec<_> = text
            .split("\n\n")
            .filter(|block| !block.is_empty())
            .map(|block| block.lines().next().unwrap().to_string())
            .collect();
        for chunk in titles.chunks(3) {
            let doc = chunk[0].clone();
            assert_eq!(chunk[1], format!("{doc} - 둘"));
            assert_eq!(chunk[2], format!("{doc} - 셋"));
        }
    }
}
