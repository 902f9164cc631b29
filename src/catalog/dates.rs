use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse the timestamp formats seen in catalog data: RFC 3339, a naive
/// datetime without offset, or a plain date.
pub fn parse_when(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?);
    }
    None
}

/// Render an ISO date string as "November 1, 2025". Empty input renders
/// empty; anything unparseable is echoed back trimmed. Never fails.
pub fn format_date(iso: &str) -> String {
    let trimmed = iso.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match parse_when(trimmed) {
        Some(dt) => dt.format("%B %-d, %Y").to_string(),
        None => trimmed.to_string(),
    }
}
