use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::document::TitledSegment;
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `title\nbody` blocks separated by a blank line
    #[default]
    Text,
    /// One `{"title", "body"}` object per line
    Jsonl,
}

/// Writes segments into `<dir>/<prefix>_000000`, `<prefix>_000001`, ...
/// rolling over once a file holds more than `chars_per_file` characters.
pub struct ShardWriter {
    dir: PathBuf,
    prefix: String,
    chars_per_file: usize,
    format: OutputFormat,
    index: usize,
    chars: usize,
    file: Option<BufWriter<File>>,
    shards: Vec<PathBuf>,
    segments: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShardSummary {
    pub shards: Vec<PathBuf>,
    pub segments: usize,
}

impl ShardWriter {
    pub fn create(
        dir: &Path,
        prefix: &str,
        chars_per_file: usize,
        format: OutputFormat,
    ) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(ShardWriter {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
            chars_per_file,
            format,
            index: 0,
            chars: 0,
            file: None,
            shards: Vec::new(),
            segments: 0,
        })
    }

    pub fn shard_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}_{:06}", self.prefix, index))
    }

    pub fn write(&mut self, segment: &TitledSegment) -> Result<()> {
        let rendered = match self.format {
            OutputFormat::Text => segment.to_string(),
            OutputFormat::Jsonl => serde_json::to_string(segment)?,
        };

        if self.file.is_none() {
            let path = self.shard_path(self.index);
            self.file = Some(BufWriter::new(File::create(&path)?));
            self.shards.push(path);
        }
        if let Some(file) = self.file.as_mut() {
            writeln!(file, "{}", rendered)?;
        }

        self.segments += 1;
        self.chars += rendered.chars().count();
        if self.chars > self.chars_per_file {
            self.rotate()?;
        }
        Ok(())
    }

    fn rotate(&mut self) -> Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
            info!(
                shard = %self.shard_path(self.index).display(),
                chars = self.chars,
                "shard complete"
            );
        }
        self.index += 1;
        self.chars = 0;
        Ok(())
    }

    /// Flush the open shard and report every file written.
    pub fn finish(mut self) -> Result<ShardSummary> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }
        Ok(ShardSummary {
            shards: self.shards,
            segments: self.segments,
        })
    }
}
