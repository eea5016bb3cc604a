//! Media duration probing via ffprobe.

use crate::timecode::parse_offset;
use crate::{Result, SplitError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// Stream list as printed by `ffprobe -print_format json -show_streams`.
#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<StreamInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct StreamInfo {
    codec_type: Option<String>,
    /// Duration in seconds, printed as a decimal string
    duration: Option<String>,
    #[serde(default)]
    tags: StreamTags,
}

#[derive(Debug, Default, Deserialize)]
struct StreamTags {
    /// Matroska-style duration tag, `HH:MM:SS.fraction`
    #[serde(rename = "DURATION")]
    duration: Option<String>,
}

/// Determines a media file's total duration through ffprobe.
#[derive(Debug, Clone)]
pub struct DurationProbe {
    ffprobe_path: PathBuf,
}

impl DurationProbe {
    pub fn new(ffprobe_path: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }

    /// Determine `file`'s duration in whole seconds.
    ///
    /// Prefers the first video stream's reported duration, falling back to
    /// its `DURATION` container tag, then tries the same two fields on the
    /// first audio stream. A file yielding no usable value reports `0`.
    /// Only runs on Linux and Windows, where the bundled ffprobe builds
    /// are trusted; anywhere else it fails fast.
    pub async fn probe(&self, file: &Path) -> Result<u64> {
        if !cfg!(any(target_os = "linux", target_os = "windows")) {
            return Err(SplitError::UnsupportedPlatform);
        }

        let output = Command::new(&self.ffprobe_path)
            .args([
                "-hide_banner",
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_streams",
            ])
            .arg(file)
            .output()
            .await?;

        if !output.status.success() {
            return Err(SplitError::Probe(format!(
                "ffprobe exited with {} for {}",
                output.status,
                file.display()
            )));
        }

        let info: ProbeOutput = serde_json::from_slice(&output.stdout)
            .map_err(|e| SplitError::Probe(format!("unparseable ffprobe output: {e}")))?;

        let length = duration_from_streams(&info)?;
        debug!("probed {} as {}s", file.display(), length);
        Ok(length)
    }
}

fn duration_from_streams(info: &ProbeOutput) -> Result<u64> {
    let video = first_stream(info, "video");
    let mut length = stream_length(video)?;
    if length == 0 {
        let audio = first_stream(info, "audio");
        length = stream_length(audio)?;
    }
    Ok(length)
}

/// Multiple streams of one kind are not reconciled; only the first counts.
fn first_stream<'a>(info: &'a ProbeOutput, kind: &str) -> Option<&'a StreamInfo> {
    info.streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some(kind))
}

fn stream_length(stream: Option<&StreamInfo>) -> Result<u64> {
    let Some(stream) = stream else {
        return Ok(0);
    };
    if let Some(duration) = &stream.duration {
        // "1800.043000" -> 1800
        let whole = duration.split('.').next().unwrap_or(duration);
        return Ok(whole.parse().unwrap_or(0));
    }
    if let Some(tag) = &stream.tags.duration {
        // "01:30:00.123000000" -> "01:30:00"
        let whole = tag.split('.').next().unwrap_or(tag);
        return parse_offset(whole);
    }
    Ok(0)
}
