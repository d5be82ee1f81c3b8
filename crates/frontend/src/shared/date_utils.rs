/// Utilities for date formatting
///
/// The portal shows every date as `yyyy.mm.dd`.
use chrono::{DateTime, Local, NaiveDate};

/// Today's date in portal format
pub fn today() -> String {
    Local::now().format("%Y.%m.%d").to_string()
}

/// Convert the date layouts seen in upstream payloads to `yyyy.mm.dd`
///
/// Example: "Tue, 14 Oct 2025 09:30:00 +0900" -> "2025.10.14",
/// "20251014" -> "2025.10.14", "2025-10-14T09:30:00Z" -> "2025.10.14"
pub fn to_dotted_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.format("%Y.%m.%d").to_string());
    }
    let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);
    for layout in ["%Y-%m-%d", "%Y%m%d", "%Y.%m.%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, layout) {
            return Some(date.format("%Y.%m.%d").to_string());
        }
    }
    None
}

/// Portal date for an optional raw value; unknown layouts pass through, missing means today
pub fn display_date(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => to_dotted_date(value).unwrap_or_else(|| value.to_string()),
        None => today(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc2822() {
        assert_eq!(
            to_dotted_date("Tue, 14 Oct 2025 09:30:00 +0900"),
            Some("2025.10.14".to_string())
        );
    }

    #[test]
    fn test_compact_and_iso() {
        assert_eq!(to_dotted_date("20250815"), Some("2025.08.15".to_string()));
        assert_eq!(
            to_dotted_date("2025-08-15T14:02:26.123Z"),
            Some("2025.08.15".to_string())
        );
        assert_eq!(to_dotted_date("2025.07.31"), Some("2025.07.31".to_string()));
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(to_dotted_date("어제"), None);
        assert_eq!(display_date(Some("어제")), "어제");
        assert_eq!(display_date(Some("  ")), today());
        assert_eq!(display_date(None), today());
    }
}
