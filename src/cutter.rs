//! Lossless stream-copy trimming via ffmpeg.

use crate::progress::{Event, ProgressSink};
use crate::{Result, SplitError};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

/// Produces one output file covering a sub-range of an input file,
/// copying streams without re-encoding.
#[derive(Debug, Clone)]
pub struct Cutter {
    ffmpeg_path: PathBuf,
}

impl Cutter {
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    /// Extract `[start, end)` seconds of `source` into `dest`.
    ///
    /// `end` of `None` runs to end-of-file. A pre-existing `dest` is
    /// removed first, so re-running the same segmentation overwrites its
    /// previous output instead of erroring. ffmpeg's stderr is forwarded
    /// line-by-line to the progress sink as the process runs; a non-zero
    /// exit fails this cut and is never retried.
    pub async fn cut(
        &self,
        source: &Path,
        dest: &Path,
        start: u64,
        end: Option<u64>,
        sink: &dyn ProgressSink,
    ) -> Result<()> {
        if tokio::fs::try_exists(dest).await? {
            tokio::fs::remove_file(dest).await?;
        }

        let mut cmd = Command::new(&self.ffmpeg_path);
        cmd.args(["-hide_banner", "-loglevel", "quiet"])
            .arg("-i")
            .arg(source)
            .arg("-ss")
            .arg(start.to_string());
        if let Some(end) = end {
            cmd.arg("-to").arg(end.to_string());
        }
        cmd.arg("-c").arg("copy").arg(dest);
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn()?;
        if let Some(stderr) = child.stderr.take() {
            let mut lines = BufReader::new(stderr).lines();
            while let Some(line) = lines.next_line().await? {
                sink.emit(Event::Log, &format!("ffmpeg {line}"));
            }
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(SplitError::Cut(format!(
                "ffmpeg exited with {} producing {}",
                status,
                dest.display()
            )));
        }
        Ok(())
    }
}
