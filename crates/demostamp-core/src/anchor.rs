//! Anchor instant ("now") resolution.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};

/// Anchor used when `--now` is not given.
pub const DEFAULT_NOW: &str = "2026-01-12T12:00:00Z";

#[derive(Debug, thiserror::Error)]
pub enum AnchorError {
    #[error("invalid anchor instant `{input}`: expected an ISO-8601 date-time")]
    Invalid { input: String },
}

/// Resolve the anchor instant.
///
/// `None` or an empty string means the current instant. Otherwise the string
/// is trimmed, a trailing `Z` becomes `+00:00`, and the result is parsed as an
/// ISO-8601 date-time and converted to UTC. Naive date-times are taken as UTC;
/// a bare date is midnight UTC. Precision is truncated to microseconds.
pub fn resolve_anchor(now: Option<&str>) -> Result<DateTime<Utc>, AnchorError> {
    let raw = match now {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(Utc::now().trunc_subsecs(6)),
    };

    let mut s = raw.trim().to_string();
    if let Some(stripped) = s.strip_suffix('Z') {
        s = format!("{stripped}+00:00");
    }

    // chrono accepts `:60` and encodes it as a sub-second part >= 1s.
    parse_iso_instant(&s)
        .filter(|dt| dt.timestamp_subsec_nanos() < 1_000_000_000)
        .map(|dt| dt.trunc_subsecs(6))
        .ok_or_else(|| AnchorError::Invalid {
            input: raw.to_string(),
        })
}

fn parse_iso_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    const OFFSET_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f%:z",
        "%Y-%m-%d %H:%M:%S%.f%:z",
        "%Y-%m-%dT%H:%M:%S%.f%z",
        "%Y-%m-%dT%H:%M%:z",
    ];
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
