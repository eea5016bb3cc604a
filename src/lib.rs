/// Video Splitter
///
/// Lossless video segmentation with chapter timecode remapping. Given a
/// source recording, a per-part duration limit and optional author-supplied
/// chapter markers, decides how to cut the file into bounded-duration parts
/// via ffmpeg stream copy and re-times the markers so they stay correct
/// once the single timeline becomes several independent files.

pub mod chapters;
pub mod config;
pub mod cutter;
pub mod metadata;
pub mod probe;
pub mod progress;
pub mod segmenter;
pub mod timecode;

/// Result type for splitter operations
pub type Result<T> = std::result::Result<T, SplitError>;

/// Error types for splitter operations
#[derive(thiserror::Error, Debug)]
pub enum SplitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed time string: {0}")]
    Format(String),

    #[error("no timecodes found")]
    NoMarkersFound,

    #[error("unsupported OS to use ffprobe")]
    UnsupportedPlatform,

    #[error("probe failed: {0}")]
    Probe(String),

    #[error("cut failed: {0}")]
    Cut(String),

    #[error("metadata error: {0}")]
    Metadata(String),
}

// Re-export main types for easy access
pub use crate::chapters::{ChapterBucket, ChapterList, ChapterMarker};
pub use crate::config::SplitConfig;
pub use crate::cutter::Cutter;
pub use crate::metadata::{Metadata, RecordMetadata, ShortsMetadata};
pub use crate::probe::DurationProbe;
pub use crate::progress::{Event, ProgressSink, RecordingSink, TracingSink};
pub use crate::segmenter::{SegmentPart, Segmenter};
pub use crate::timecode::{format_offset, parse_offset};
