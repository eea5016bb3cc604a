use anyhow::Result;
use clap::{Arg, Command};
use std::path::{Path, PathBuf};
use tracing::info;

use video_splitter::{ChapterList, Metadata, Segmenter, SplitConfig, TracingSink};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("video_splitter=info,warn")
        .init();

    let matches = Command::new("video-splitter")
        .version("0.1.0")
        .about("Lossless video segmentation with chapter timecode remapping")
        .arg(
            Arg::new("metadata")
                .short('m')
                .long("metadata")
                .value_name("FILE")
                .help("Metadata TOML describing the recording")
                .required(true),
        )
        .arg(
            Arg::new("limit")
                .short('l')
                .long("limit")
                .value_name("HH:MM:SS")
                .help("Maximum duration of a single part")
                .default_value("01:00:00"),
        )
        .arg(
            Arg::new("start-offset")
                .short('s')
                .long("start-offset")
                .value_name("HH:MM:SS")
                .help("Lead-in to discard from the start of the recording"),
        )
        .arg(
            Arg::new("postfix")
                .short('p')
                .long("postfix")
                .value_name("NAME")
                .help("Label inserted into part filenames")
                .default_value("split"),
        )
        .get_matches();

    let metadata_path = PathBuf::from(matches.get_one::<String>("metadata").unwrap());
    let limit = matches.get_one::<String>("limit").unwrap();
    let start_offset = matches.get_one::<String>("start-offset").map(|s| s.as_str());
    let postfix = matches.get_one::<String>("postfix").unwrap();

    let metadata = Metadata::load_record(&metadata_path).await?;
    info!("🎬 Splitting {} ({})", metadata.record.file, metadata.record.title);

    let config = SplitConfig::default();
    let segmenter = Segmenter::new(&config);
    let sink = TracingSink;

    let parts = segmenter
        .split_by_limit(
            Path::new(&metadata.record.file),
            limit,
            start_offset,
            postfix,
            &sink,
        )
        .await?;

    // Chapter text is optional; only parse when the author supplied some,
    // since parsing empty text is an error by contract.
    let chapters = match metadata.record.timecodes.as_deref() {
        Some(text) if !text.trim().is_empty() => Some(ChapterList::parse(text)?),
        _ => None,
    };

    let durations: Vec<u64> = parts.iter().map(|p| p.duration).collect();
    let buckets = match &chapters {
        Some(list) => list.split_and_shift(&durations, start_offset.unwrap_or("00:00:00"))?,
        None => Vec::new(),
    };

    for (i, part) in parts.iter().enumerate() {
        info!(
            "📼 part {}: {} ({}, starts at {}s in the original)",
            i,
            part.file.display(),
            part.time,
            part.offset_in_original
        );
        if let Some(bucket) = buckets.get(i) {
            for line in bucket.to_text().lines() {
                info!("   {}", line);
            }
        }
    }

    info!("✅ Produced {} part(s)", parts.len());
    Ok(())
}
