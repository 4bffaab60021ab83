//! Text rendering shared by recall, tools, and the CLI

use crate::client::Memory;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// `created_at` as a short local date (`M/D/YYYY`).
///
/// Accepts RFC 3339 (converted to local time), naive
/// `YYYY-MM-DDTHH:MM:SS[.f]` (already local), and bare dates (calendar dates,
/// never shifted). Anything else renders as `Invalid Date`.
pub fn format_date(created_at: &str) -> String {
    let local = if let Ok(dt) = DateTime::parse_from_rfc3339(created_at) {
        dt.with_timezone(&Local).date_naive()
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(created_at, "%Y-%m-%dT%H:%M:%S%.f") {
        naive.date()
    } else if let Ok(date) = NaiveDate::parse_from_str(created_at, "%Y-%m-%d") {
        date
    } else {
        return "Invalid Date".to_string();
    };
    local.format("%-m/%-d/%Y").to_string()
}

/// Confidence in `[0, 1]` as a rounded percentage
pub fn confidence_percent(confidence: f64) -> i64 {
    (confidence * 100.0).round() as i64
}

/// `N. content (temporal, date)`
pub fn recall_line(index: usize, memory: &Memory) -> String {
    format!(
        "{}. {} ({}, {})",
        index + 1,
        memory.content,
        memory.temporal_class,
        format_date(&memory.created_at)
    )
}

/// `N. content\n   (temporal, date, P% relevance)`
pub fn ranked_entry(index: usize, memory: &Memory) -> String {
    format!(
        "{}. {}\n   ({}, {}, {}% relevance)",
        index + 1,
        memory.content,
        memory.temporal_class,
        format_date(&memory.created_at),
        confidence_percent(memory.confidence)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory(content: &str, created_at: &str, confidence: f64) -> Memory {
        Memory {
            id: "m1".to_string(),
            content: content.to_string(),
            context_type: "user_fact".to_string(),
            temporal_class: "stable".to_string(),
            confidence,
            created_at: created_at.to_string(),
            message_id: None,
            space_id: None,
        }
    }

    #[test]
    fn test_format_date_bare_date() {
        assert_eq!(format_date("2024-03-05"), "3/5/2024");
    }

    #[test]
    fn test_format_date_midday_rfc3339() {
        let rendered = format_date("2024-11-20T12:00:00Z");
        assert!(
            rendered == "11/20/2024" || rendered == "11/21/2024",
            "rendered as {rendered}"
        );
    }

    #[test]
    fn test_format_date_naive_timestamp_is_local() {
        assert_eq!(format_date("2024-11-20T23:59:00.123456"), "11/20/2024");
        assert_eq!(format_date("2024-11-20T00:00:00"), "11/20/2024");
    }

    #[test]
    fn test_format_date_invalid() {
        assert_eq!(format_date("yesterday"), "Invalid Date");
        assert_eq!(format_date(""), "Invalid Date");
    }

    #[test]
    fn test_confidence_percent() {
        assert_eq!(confidence_percent(0.87), 87);
        assert_eq!(confidence_percent(0.875), 88);
        assert_eq!(confidence_percent(0.0), 0);
        assert_eq!(confidence_percent(1.0), 100);
    }

    #[test]
    fn test_recall_line() {
        let m = memory("Lives in Lisbon", "2024-03-05", 0.9);
        assert_eq!(recall_line(0, &m), "1. Lives in Lisbon (stable, 3/5/2024)");
    }

    #[test]
    fn test_ranked_entry() {
        let m = memory("Lives in Lisbon", "2024-03-05", 0.9);
        assert_eq!(
            ranked_entry(1, &m),
            "2. Lives in Lisbon\n   (stable, 3/5/2024, 90% relevance)"
        );
    }
}
