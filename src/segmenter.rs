//! Core segmentation: deciding part boundaries and driving the cutter.
//!
//! The split keeps cuts keyframe-bounded stream copies, so part boundaries
//! are planned in whole seconds. Rather than producing N-1 full-limit parts
//! plus a short remainder, the corrected duration is spread evenly across
//! the parts so no part is conspicuously shorter than the rest.

use crate::config::SplitConfig;
use crate::cutter::Cutter;
use crate::probe::DurationProbe;
use crate::progress::{Event, ProgressSink};
use crate::timecode::{format_offset, parse_offset};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One output media file produced from a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentPart {
    /// The part's media file; the original file itself when no cut was needed
    pub file: PathBuf,
    /// Length in whole seconds
    pub duration: u64,
    /// `duration` rendered as `HH:MM:SS`
    pub time: String,
    /// Start of this part on the original file's timeline
    pub offset_in_original: u64,
}

/// A planned cut, before any subprocess runs.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PartPlan {
    start: u64,
    /// `None` cuts to end-of-file, absorbing the floor-division remainder
    end: Option<u64>,
    duration: u64,
    /// `false` when the original file can be used as-is
    cut: bool,
}

/// Decide part boundaries for a file of `total` seconds, capped at `limit`
/// seconds per part, discarding the first `start` seconds.
fn plan_parts(total: u64, limit: u64, start: u64) -> Vec<PartPlan> {
    let corrected = total.saturating_sub(start);
    let target = if limit == 0 { 1 } else { corrected.div_ceil(limit) };

    if target <= 1 {
        if start == 0 {
            // nothing to do, the file fits as-is
            return vec![PartPlan {
                start: 0,
                end: None,
                duration: total,
                cut: false,
            }];
        }
        // one cut purely to drop the lead-in
        return vec![PartPlan {
            start,
            end: None,
            duration: corrected,
            cut: true,
        }];
    }

    let part_duration = corrected / target;
    (0..target)
        .map(|i| {
            let part_start = start + i * part_duration;
            if i == target - 1 {
                PartPlan {
                    start: part_start,
                    end: None,
                    duration: total - part_start,
                    cut: true,
                }
            } else {
                PartPlan {
                    start: part_start,
                    end: Some(part_start + part_duration),
                    duration: part_duration,
                    cut: true,
                }
            }
        })
        .collect()
}

/// `<dir>/<stem>_<postfix>_part<i>.<ext>` — deterministic, so repeated runs
/// land on the same names and overwrite rather than accumulate.
fn part_path(file: &Path, postfix: &str, index: usize) -> PathBuf {
    let stem = file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("part");
    let name = match file.extension().and_then(|s| s.to_str()) {
        Some(ext) => format!("{stem}_{postfix}_part{index}.{ext}"),
        None => format!("{stem}_{postfix}_part{index}"),
    };
    file.with_file_name(name)
}

/// Probes, plans and cuts one source file into bounded-duration parts.
#[derive(Debug, Clone)]
pub struct Segmenter {
    probe: DurationProbe,
    cutter: Cutter,
}

impl Segmenter {
    pub fn new(config: &SplitConfig) -> Self {
        Self {
            probe: DurationProbe::new(&config.ffprobe_path),
            cutter: Cutter::new(&config.ffmpeg_path),
        }
    }

    /// Split `file` into parts no longer than `limit_time`.
    ///
    /// `start_offset_time` trims a lead-in off the source before any
    /// segmentation logic runs; `postfix` goes into every produced part's
    /// filename. Cuts run strictly one at a time, each emitting a
    /// `Progress` event first. Any failure aborts the whole run; output
    /// files from cuts that already finished are left on disk for the
    /// caller to deal with.
    pub async fn split_by_limit(
        &self,
        file: &Path,
        limit_time: &str,
        start_offset_time: Option<&str>,
        postfix: &str,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<SegmentPart>> {
        sink.emit(Event::Progress, &format!("splitting file {}", file.display()));

        let limit = parse_offset(limit_time)?;
        let start = match start_offset_time {
            Some(time) => parse_offset(time)?,
            None => 0,
        };
        let total = self.probe.probe(file).await?;
        let plans = plan_parts(total, limit, start);

        if plans.len() == 1 && !plans[0].cut {
            sink.emit(Event::Progress, "no need to split");
            return Ok(vec![SegmentPart {
                file: file.to_path_buf(),
                duration: total,
                time: format_offset(total),
                offset_in_original: 0,
            }]);
        }

        if plans.len() == 1 {
            sink.emit(Event::Progress, &format!("remove start offset {start}"));
        } else {
            sink.emit(
                Event::Progress,
                &format!(
                    "splitting to {} parts, duration {}",
                    plans.len(),
                    plans[0].duration
                ),
            );
        }

        let mut parts = Vec::with_capacity(plans.len());
        for (i, plan) in plans.iter().enumerate() {
            let dest = part_path(file, postfix, i);
            if plans.len() > 1 {
                sink.emit(
                    Event::Progress,
                    &format!("splitting part {}/{}", i + 1, plans.len()),
                );
            }
            self.cutter.cut(file, &dest, plan.start, plan.end, sink).await?;
            parts.push(SegmentPart {
                file: dest,
                duration: plan.duration,
                time: format_offset(plan.duration),
                offset_in_original: plan.start,
            });
        }

        Ok(parts)
    }
}
