use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use namu_corpus::document;
use namu_corpus::parser::Converter;
use namu_corpus::pipeline;
use namu_corpus::settings::Settings;
use namu_corpus::shard::{OutputFormat, ShardWriter};

#[derive(Parser)]
#[command(name = "namu_corpus", about = "Convert a namu-wiki JSON dump into titled plain-text segments")]
struct Cli {
    /// Path to the JSON dump (a single array of {title, text} records)
    #[arg(long)]
    dump: PathBuf,
    /// Directory the output shards are written to
    #[arg(long)]
    output: PathBuf,
    /// Start a new shard once the current one exceeds this many characters
    #[arg(long)]
    chars_per_file: Option<usize>,
    /// Worker threads (default: one per core)
    #[arg(short = 'j', long)]
    threads: Option<usize>,
    /// Shard file name prefix
    #[arg(long)]
    prefix: Option<String>,
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load().context("invalid NAMU_* environment settings")?;

    let chars_per_file = cli.chars_per_file.unwrap_or(settings.chars_per_file);
    let prefix = cli.prefix.unwrap_or(settings.prefix);
    let threads = cli.threads.or(settings.threads);
    let format = cli.format.unwrap_or(settings.format);
    info!(dump = %cli.dump.display(), output = %cli.output.display(), chars_per_file, ?threads, ?format, "starting");

    let records = document::read_dump(&cli.dump)
        .with_context(|| format!("failed to read dump {:?}", cli.dump))?;
    println!("Loaded {} records", records.len());

    let writer = ShardWriter::create(&cli.output, &prefix, chars_per_file, format)
        .with_context(|| format!("failed to prepare output directory {:?}", cli.output))?;

    let converter: Converter = Converter::default();
    let pb = pipeline::progress_bar(records.len());
    let stats = pipeline::process_records(records, &converter, writer, threads, &pb)?;
    pb.finish_and_clear();

    println!(
        "Converted {} documents ({} rejected) into {} segments across {} files.",
        stats.documents,
        stats.rejected,
        stats.output.segments,
        stats.output.shards.len(),
    );
    println!("Done in {:.1}s", t0.elapsed().as_secs_f64());
    Ok(())
}
