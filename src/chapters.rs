//! Chapter timecode parsing and remapping across split parts.
//!
//! Author-supplied chapter text annotates the original single timeline.
//! Once the recording is split into several files, every marker has to be
//! re-timed relative to the part it lands in; this module parses the text
//! and performs that redistribution.

use crate::timecode::{format_offset, parse_offset};
use crate::{Result, SplitError};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One author-supplied chapter annotation.
///
/// `time` is the canonical `HH:MM:SS` rendering of `offset_seconds`; the
/// two are derived from each other at construction and never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterMarker {
    /// Canonical `HH:MM:SS` form of the offset
    pub time: String,
    /// Chapter description as written by the author
    pub description: String,
    /// Seconds from the start of the timeline this marker belongs to
    pub offset_seconds: u64,
}

impl ChapterMarker {
    /// Build a marker at a second offset, deriving the `time` string.
    pub fn at_offset(offset_seconds: u64, description: impl Into<String>) -> Self {
        Self {
            time: format_offset(offset_seconds),
            description: description.into(),
            offset_seconds,
        }
    }

    fn from_time(time: &str, description: &str) -> Result<Self> {
        let offset_seconds = parse_offset(time)?;
        Ok(Self::at_offset(offset_seconds, description))
    }
}

/// Ordered chapter markers parsed from free-form description text.
#[derive(Debug, Clone)]
pub struct ChapterList {
    markers: Vec<ChapterMarker>,
}

/// Markers belonging to one output part, offsets re-zeroed to its start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterBucket {
    markers: Vec<ChapterMarker>,
}

impl ChapterBucket {
    /// Markers in timeline order, offsets relative to the part's start.
    pub fn markers(&self) -> &[ChapterMarker] {
        &self.markers
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Render as description text, one `HH:MM:SS – description` line per
    /// marker, ready to paste under the part's upload.
    pub fn to_text(&self) -> String {
        self.markers
            .iter()
            .map(|m| format!("{} – {}", m.time, m.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Accumulator for the single remapping pass over the marker list.
struct RemapState {
    buckets: Vec<ChapterBucket>,
    current: Vec<ChapterMarker>,
    /// Start of the current part within the corrected timeline
    base: u64,
    /// End of the current part, `None` once the part list is exhausted
    limit: Option<u64>,
    /// Index of the next part duration to consume
    next_index: usize,
    /// Description of the most recently seen marker, used to seed a new
    /// bucket so a viewer starting that part mid-chapter still gets context
    carry: Option<String>,
}

impl ChapterList {
    /// Extract markers from author text.
    ///
    /// Every occurrence of `HH:MM:SS <dash> description` (en-dash or
    /// hyphen, spaces around it) yields one marker, in order of
    /// appearance; anything else in the text is ignored. Text with no
    /// matching line at all is an error — callers holding optional chapter
    /// text must check for emptiness before parsing.
    pub fn parse(text: &str) -> Result<Self> {
        let re = Regex::new(r"(\d+:\d+:\d+) [–-] (.+)").expect("valid timecode pattern");
        let mut markers = Vec::new();
        for caps in re.captures_iter(text) {
            markers.push(ChapterMarker::from_time(&caps[1], &caps[2])?);
        }
        if markers.is_empty() {
            return Err(SplitError::NoMarkersFound);
        }
        Ok(Self { markers })
    }

    /// Markers in order of appearance in the source text.
    pub fn markers(&self) -> &[ChapterMarker] {
        &self.markers
    }

    /// Redistribute markers across the produced parts.
    ///
    /// `part_durations` are the produced parts' lengths in order;
    /// `start_offset` is the lead-in that was trimmed from the source
    /// before part 0. Markers falling inside the trimmed lead-in are
    /// dropped, but the last one seen is remembered so the first part can
    /// open with a synthetic `00:00:00` marker naming the chapter already
    /// in progress. Likewise every bucket opened by a boundary crossing is
    /// seeded with the previous marker's description.
    ///
    /// A marker exactly on a part boundary stays with the earlier part.
    /// Markers past the last part's end are absorbed into the final
    /// bucket rather than rejected.
    pub fn split_and_shift(
        &self,
        part_durations: &[u64],
        start_offset: &str,
    ) -> Result<Vec<ChapterBucket>> {
        if part_durations.is_empty() {
            return Ok(Vec::new());
        }
        let start = parse_offset(start_offset)?;

        let mut state = RemapState {
            buckets: Vec::new(),
            current: Vec::new(),
            base: 0,
            limit: Some(part_durations[0]),
            next_index: 1,
            carry: None,
        };

        for marker in &self.markers {
            let shifted = marker.offset_seconds as i64 - start as i64;
            if shifted < 0 {
                state.carry = Some(marker.description.clone());
                continue;
            }
            let shifted = shifted as u64;

            // strict > keeps a marker sitting exactly on the cut with the
            // earlier part
            if state.limit.is_some_and(|limit| shifted > limit) {
                state.open_next_bucket(part_durations);
            }

            // markers are assumed non-decreasing but not enforced; an
            // out-of-order one clamps to the current part's start
            state.current.push(ChapterMarker::at_offset(
                shifted.saturating_sub(state.base),
                &marker.description,
            ));
            state.carry = Some(marker.description.clone());
        }

        if !state.current.is_empty() {
            state.buckets.push(ChapterBucket {
                markers: state.current,
            });
        }

        Ok(state.buckets)
    }
}

impl RemapState {
    /// Close the current bucket and start the one for the next part,
    /// seeding it with the chapter already in progress (when known).
    fn open_next_bucket(&mut self, part_durations: &[u64]) {
        let closed_at = self.limit.unwrap_or(0);
        self.base = closed_at;
        self.limit = part_durations
            .get(self.next_index)
            .map(|d| closed_at + d);
        self.next_index += 1;

        self.buckets.push(ChapterBucket {
            markers: std::mem::take(&mut self.current),
        });
        if let Some(desc) = &self.carry {
            self.current.push(ChapterMarker::at_offset(0, desc.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(markers: &[(u64, &str)]) -> ChapterList {
        ChapterList {
            markers: markers
                .iter()
                .map(|(offset, desc)| ChapterMarker::at_offset(*offset, *desc))
                .collect(),
        }
    }

    #[test]
    fn test_parse_two_lines() {
        let parsed = ChapterList::parse("00:01:30 – Intro\n00:05:00 – Topic").unwrap();
        let markers = parsed.markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].offset_seconds, 90);
        assert_eq!(markers[0].description, "Intro");
        assert_eq!(markers[1].offset_seconds, 300);
        assert_eq!(markers[1].description, "Topic");
    }

    #[test]
    fn test_parse_accepts_hyphen_and_en_dash() {
        let parsed = ChapterList::parse("00:00:10 - Warmup\n00:00:20 – Main").unwrap();
        assert_eq!(parsed.markers().len(), 2);
    }

    #[test]
    fn test_parse_ignores_non_matching_lines() {
        let text = "Stream from last Friday\n00:02:00 – Agenda\nsee you next week";
        let parsed = ChapterList::parse(text).unwrap();
        assert_eq!(parsed.markers().len(), 1);
        assert_eq!(parsed.markers()[0].description, "Agenda");
    }

    #[test]
    fn test_parse_empty_is_an_error() {
        assert!(matches!(
            ChapterList::parse("no markers here"),
            Err(SplitError::NoMarkersFound)
        ));
    }

    #[test]
    fn test_parse_canonicalizes_time() {
        let parsed = ChapterList::parse("0:1:5 – Short form").unwrap();
        assert_eq!(parsed.markers()[0].time, "00:01:05");
        assert_eq!(parsed.markers()[0].offset_seconds, 65);
    }

    #[test]
    fn test_remap_single_part_passthrough() {
        let buckets = list(&[(10, "a"), (500, "b")])
            .split_and_shift(&[1800], "00:00:00")
            .unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].markers().len(), 2);
        assert_eq!(buckets[0].markers()[0].offset_seconds, 10);
        assert_eq!(buckets[0].markers()[1].offset_seconds, 500);
    }

    #[test]
    fn test_remap_crossing_reseeds_next_bucket() {
        let buckets = list(&[(100, "a"), (1700, "b"), (2000, "c")])
            .split_and_shift(&[1800, 1800], "00:00:00")
            .unwrap();
        assert_eq!(buckets.len(), 2);
        // bucket 0 unchanged
        assert_eq!(buckets[0].markers().len(), 2);
        // bucket 1 opens with a synthetic "b" marker at zero
        let second = buckets[1].markers();
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].offset_seconds, 0);
        assert_eq!(second[0].time, "00:00:00");
        assert_eq!(second[0].description, "b");
        assert_eq!(second[1].offset_seconds, 200);
        assert_eq!(second[1].description, "c");
    }

    #[test]
    fn test_remap_marker_on_boundary_stays_in_earlier_part() {
        let buckets = list(&[(100, "a"), (1800, "edge"), (1900, "c")])
            .split_and_shift(&[1800, 1800], "00:00:00")
            .unwrap();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].markers().len(), 2);
        assert_eq!(buckets[0].markers()[1].offset_seconds, 1800);
        assert_eq!(buckets[0].markers()[1].description, "edge");
        // synthetic seed plus the real marker
        assert_eq!(buckets[1].markers()[0].description, "edge");
        assert_eq!(buckets[1].markers()[1].offset_seconds, 100);
    }

    #[test]
    fn test_remap_start_offset_drops_and_carries() {
        // "pre" sits inside the trimmed lead-in; part 0 starts mid-"pre"
        let buckets = list(&[(60, "pre"), (400, "a")])
            .split_and_shift(&[1500], "00:05:00")
            .unwrap();
        assert_eq!(buckets.len(), 1);
        let markers = buckets[0].markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].offset_seconds, 100);
        assert_eq!(markers[0].description, "a");
    }

    #[test]
    fn test_remap_carry_seeds_first_crossing() {
        // the dropped "pre" description resurfaces when a crossing opens a
        // later bucket before any in-range marker preceded it
        let buckets = list(&[(60, "pre"), (2200, "late")])
            .split_and_shift(&[1800, 1800], "00:05:00")
            .unwrap();
        assert_eq!(buckets.len(), 2);
        assert!(buckets[0].is_empty());
        assert_eq!(buckets[1].markers()[0].description, "pre");
        assert_eq!(buckets[1].markers()[0].offset_seconds, 0);
        // 2200 - 300 shift - 1800 base
        assert_eq!(buckets[1].markers()[1].offset_seconds, 100);
    }

    #[test]
    fn test_remap_overflow_absorbed_into_final_bucket() {
        // crossing past the last part's end opens one final bucket whose
        // limit is unbounded; everything remaining lands there
        let buckets = list(&[(100, "a"), (2000, "b"), (9000, "late"), (20000, "later")])
            .split_and_shift(&[1800, 1800], "00:00:00")
            .unwrap();
        assert_eq!(buckets.len(), 3);
        let last = buckets[2].markers();
        assert_eq!(last[0].description, "b");
        assert_eq!(last[0].offset_seconds, 0);
        assert_eq!(last[1].description, "late");
        assert_eq!(last[1].offset_seconds, 9000 - 3600);
        assert_eq!(last[2].description, "later");
        assert_eq!(last[2].offset_seconds, 20000 - 3600);
    }

    #[test]
    fn test_remap_empty_part_list_yields_nothing() {
        let buckets = list(&[(100, "a")]).split_and_shift(&[], "00:00:00").unwrap();
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_remap_no_trailing_empty_bucket() {
        let buckets = list(&[(100, "a")])
            .split_and_shift(&[1800, 1800, 1800], "00:00:00")
            .unwrap();
        assert_eq!(buckets.len(), 1);
    }

    #[test]
    fn test_bucket_to_text() {
        let buckets = list(&[(90, "Intro"), (300, "Topic")])
            .split_and_shift(&[1800], "00:00:00")
            .unwrap();
        assert_eq!(buckets[0].to_text(), "00:01:30 – Intro\n00:05:00 – Topic");
    }
}
