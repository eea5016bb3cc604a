//! Conversion between `HH:MM:SS` timecode strings and second offsets.

use crate::{Result, SplitError};

/// Parse a colon-separated timecode into an offset in whole seconds.
///
/// Fields are weighted right-to-left by powers of 60, so `"01:02:03"` is
/// 3723 and a bare `"90"` is 90 seconds. More than three fields parse the
/// same way, though in practice input is always `HH:MM:SS`.
pub fn parse_offset(time: &str) -> Result<u64> {
    let mut offset = 0u64;
    let mut weight = 1u64;
    for field in time.split(':').rev() {
        let value: u64 = field
            .trim()
            .parse()
            .map_err(|_| SplitError::Format(time.to_string()))?;
        offset += value * weight;
        weight *= 60;
    }
    Ok(offset)
}

/// Format a second offset as zero-padded `HH:MM:SS`.
///
/// The hours field is not capped at 24; recordings longer than a day keep
/// widening it.
pub fn format_offset(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        assert_eq!(parse_offset("00:00:00").unwrap(), 0);
        assert_eq!(parse_offset("00:01:30").unwrap(), 90);
        assert_eq!(parse_offset("01:02:03").unwrap(), 3723);
        assert_eq!(parse_offset("10:00:00").unwrap(), 36000);
    }

    #[test]
    fn test_parse_short_forms() {
        assert_eq!(parse_offset("90").unwrap(), 90);
        assert_eq!(parse_offset("2:05").unwrap(), 125);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_offset("").is_err());
        assert!(parse_offset("abc").is_err());
        assert!(parse_offset("00:xx:00").is_err());
        assert!(parse_offset("00::00").is_err());
    }

    #[test]
    fn test_format_basic() {
        assert_eq!(format_offset(0), "00:00:00");
        assert_eq!(format_offset(90), "00:01:30");
        assert_eq!(format_offset(3723), "01:02:03");
    }

    #[test]
    fn test_format_hours_not_capped() {
        assert_eq!(format_offset(360000), "100:00:00");
    }

    #[test]
    fn test_round_trip() {
        for s in 0..360000u64 {
            assert_eq!(parse_offset(&format_offset(s)).unwrap(), s);
        }
    }

    #[test]
    fn test_canonicalization() {
        // zero-padding normalizes, value is preserved
        assert_eq!(format_offset(parse_offset("0:1:5").unwrap()), "00:01:05");
        assert_eq!(format_offset(parse_offset("01:02:03").unwrap()), "01:02:03");
    }
}
