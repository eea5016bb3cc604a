//! Tool locations and split parameters.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Environment variable marking a containerised run, where the ffmpeg
/// suite is on `PATH` instead of vendored under `./bin`.
pub const DOCKER_ENV: &str = "VIDEO_SPLITTER_DOCKER";

/// Where the ffmpeg binaries live and how to split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// ffmpeg binary used for stream-copy cuts
    pub ffmpeg_path: PathBuf,

    /// ffprobe binary used for duration probing
    pub ffprobe_path: PathBuf,

    /// Maximum duration of a single part, `HH:MM:SS`
    pub limit: String,

    /// Lead-in to discard before part 0, `HH:MM:SS`
    pub start_offset: Option<String>,

    /// Label inserted into every produced part's filename
    pub postfix: String,
}

impl Default for SplitConfig {
    fn default() -> Self {
        let (ffmpeg_path, ffprobe_path) = if env::var(DOCKER_ENV).is_ok() {
            (PathBuf::from("ffmpeg"), PathBuf::from("ffprobe"))
        } else if cfg!(target_os = "windows") {
            (
                PathBuf::from("./bin/ffmpeg.exe"),
                PathBuf::from("./bin/ffprobe.exe"),
            )
        } else {
            (PathBuf::from("./bin/ffmpeg"), PathBuf::from("./bin/ffprobe"))
        };

        Self {
            ffmpeg_path,
            ffprobe_path,
            limit: "01:00:00".to_string(),
            start_offset: None,
            postfix: "split".to_string(),
        }
    }
}

impl SplitConfig {
    pub fn with_limit(mut self, limit: impl Into<String>) -> Self {
        self.limit = limit.into();
        self
    }

    pub fn with_start_offset(mut self, start_offset: impl Into<String>) -> Self {
        self.start_offset = Some(start_offset.into());
        self
    }

    pub fn with_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = postfix.into();
        self
    }
}
