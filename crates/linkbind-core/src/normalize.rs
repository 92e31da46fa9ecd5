//! Value Normalizer: extract a plain URL string from a heterogeneous cell.
//!
//! Pure functions, total over [`CellValue`]. Unexpected shapes degrade to
//! `None`; nothing here ever panics or errors.

use crate::models::{CellValue, Segment};

/// Extract the candidate URL string from a cell value, untrimmed.
///
/// Preference order inside a segment: `link` wins over `text`; empty strings
/// count as absent. For a segment list only the first element is consulted.
pub fn normalize(value: &CellValue) -> Option<String> {
    match value {
        CellValue::Empty => None,
        CellValue::Plain(s) => Some(s.clone()),
        CellValue::Segments(segments) => segments.first().and_then(from_segment),
        CellValue::SingleSegment(segment) => from_segment(segment),
    }
}

/// Normalize and trim; an all-whitespace result is treated as no URL.
pub fn normalize_trimmed(value: &CellValue) -> Option<String> {
    normalize(value)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn from_segment(segment: &Segment) -> Option<String> {
    let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());
    non_empty(&segment.link).or_else(|| non_empty(&segment.text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(link: Option<&str>, text: Option<&str>) -> Segment {
        Segment {
            link: link.map(str::to_owned),
            text: text.map(str::to_owned),
        }
    }

    #[test]
    fn test_empty_yields_none() {
        assert_eq!(normalize(&CellValue::Empty), None);
    }

    #[test]
    fn test_plain_string_passes_through_untrimmed() {
        let value = CellValue::Plain("  https://a.b/c  ".to_string());
        assert_eq!(normalize(&value), Some("  https://a.b/c  ".to_string()));
        assert_eq!(normalize_trimmed(&value), Some("https://a.b/c".to_string()));
    }

    #[test]
    fn test_link_wins_over_text() {
        let value = CellValue::Segments(vec![seg(Some("https://a.b"), Some("click here"))]);
        assert_eq!(normalize(&value), Some("https://a.b".to_string()));
    }

    #[test]
    fn test_text_used_when_link_absent() {
        let value = CellValue::SingleSegment(seg(None, Some("https://a.b")));
        assert_eq!(normalize(&value), Some("https://a.b".to_string()));
    }

    #[test]
    fn test_empty_link_falls_back_to_text() {
        let value = CellValue::SingleSegment(seg(Some(""), Some("https://a.b")));
        assert_eq!(normalize(&value), Some("https://a.b".to_string()));
    }

    #[test]
    fn test_empty_segment_list_yields_none() {
        assert_eq!(normalize(&CellValue::Segments(vec![])), None);
    }

    #[test]
    fn test_only_first_segment_is_consulted() {
        let value = CellValue::Segments(vec![
            seg(None, None),
            seg(Some("https://second.example"), None),
        ]);
        assert_eq!(normalize(&value), None);
    }

    #[test]
    fn test_whitespace_only_is_no_url() {
        let value = CellValue::Plain("   \t ".to_string());
        assert_eq!(normalize_trimmed(&value), None);
    }
}
