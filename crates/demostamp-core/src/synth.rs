//! Identifier-driven time synthesis.
//!
//! Ids follow a small naming convention in the demo fixtures:
//!
//! | shape             | example    | createTime              | updateTime                 |
//! |-------------------|------------|-------------------------|----------------------------|
//! | `c-s-<n>`         | `c-s-01`   | anchor - 4n days        | create + n hours           |
//! | `c-<code>-<n>`    | `c-wp-02`  | anchor - weeks(code)    | create + n hours + n days  |
//! | anything else     | `c-a1`     | anchor - 10 days        | create + 2 hours           |
//!
//! Shapes are tried in that order. `weeks(code)` is [`stable_code_to_weeks`],
//! a position-weighted character checksum folded into `[3, 30]`. Its exact
//! integer arithmetic is part of the output contract: changing it shifts every
//! project timestamp in every regenerated fixture.

use chrono::{DateTime, Datelike, TimeDelta, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static SINGLE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^c-s-([0-9]+)$").expect("valid single id regex"));
static PROJECT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^c-([a-z0-9-]+)-([0-9]+)$").expect("valid project id regex"));

const SINGLE_DAYS_PER_STEP: i64 = 4;
const FALLBACK_AGE_DAYS: i64 = 10;
const FALLBACK_SPAN_HOURS: i64 = 2;

#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    #[error("numeric suffix of id `{id}` is too large")]
    NumberOutOfRange { id: String },
    #[error("timestamps for id `{id}` fall outside years 1..=9999")]
    TimeOutOfRange { id: String },
}

/// Which naming rule an item id falls under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdShape<'a> {
    /// `c-s-<n>`
    Single { n: i64 },
    /// `c-<code>-<n>`, `code` in `[a-z0-9-]+`
    Project { code: &'a str, n: i64 },
    Fallback,
}

/// A synthesized `(createTime, updateTime)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemTimes {
    pub create: DateTime<Utc>,
    pub update: DateTime<Utc>,
}

impl ItemTimes {
    pub fn create_iso(&self) -> String {
        iso_z(self.create)
    }

    pub fn update_iso(&self) -> String {
        iso_z(self.update)
    }
}

impl<'a> IdShape<'a> {
    /// Classify an id. `Single` wins over `Project` (`c-s-01` would match both).
    pub fn classify(id: &'a str) -> Result<Self, SynthError> {
        if let Some(caps) = SINGLE_ID_RE.captures(id) {
            let n = parse_n(id, &caps[1])?;
            return Ok(IdShape::Single { n });
        }
        if let Some(caps) = PROJECT_ID_RE.captures(id) {
            let code = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let n = parse_n(id, &caps[2])?;
            return Ok(IdShape::Project { code, n });
        }
        Ok(IdShape::Fallback)
    }

    /// Derive create/update instants relative to `now`.
    pub fn times(&self, id: &str, now: DateTime<Utc>) -> Result<ItemTimes, SynthError> {
        let out_of_range = || SynthError::TimeOutOfRange { id: id.to_string() };

        let (age, span) = match *self {
            IdShape::Single { n } => {
                let age = n
                    .checked_mul(SINGLE_DAYS_PER_STEP)
                    .and_then(TimeDelta::try_days);
                (age, TimeDelta::try_hours(n))
            }
            IdShape::Project { code, n } => {
                let age = TimeDelta::try_weeks(stable_code_to_weeks(code));
                let span = TimeDelta::try_hours(n)
                    .zip(TimeDelta::try_days(n))
                    .and_then(|(h, d)| h.checked_add(&d));
                (age, span)
            }
            IdShape::Fallback => (
                TimeDelta::try_days(FALLBACK_AGE_DAYS),
                TimeDelta::try_hours(FALLBACK_SPAN_HOURS),
            ),
        };

        let create = age
            .and_then(|age| now.checked_sub_signed(age))
            .filter(in_calendar_range)
            .ok_or_else(out_of_range)?;
        let update = span
            .and_then(|span| create.checked_add_signed(span))
            .filter(in_calendar_range)
            .ok_or_else(out_of_range)?;

        Ok(ItemTimes { create, update })
    }
}

/// Map a project code to a week offset in `[3, 30]`.
///
/// `acc = sum(i * ord(ch)) mod 100000` over 1-based positions, folded
/// incrementally; result is `3 + acc mod 28`.
pub fn stable_code_to_weeks(code: &str) -> i64 {
    let mut acc: u64 = 0;
    for (i, ch) in code.chars().enumerate() {
        let pos = i as u64 + 1;
        acc = (acc + pos * u64::from(ch)) % 100_000;
    }
    3 + (acc % 28) as i64
}

/// Classify `id` and derive its times in one go.
pub fn compute_times_for_id(id: &str, now: DateTime<Utc>) -> Result<ItemTimes, SynthError> {
    IdShape::classify(id)?.times(id, now)
}

/// `YYYY-MM-DDTHH:MM:SS[.ffffff]Z`, microseconds only when non-zero.
pub fn iso_z(dt: DateTime<Utc>) -> String {
    let micros = dt.timestamp_subsec_micros();
    if micros == 0 {
        dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    } else {
        format!("{}.{micros:06}Z", dt.format("%Y-%m-%dT%H:%M:%S"))
    }
}

fn parse_n(id: &str, digits: &str) -> Result<i64, SynthError> {
    digits
        .parse::<i64>()
        .map_err(|_| SynthError::NumberOutOfRange { id: id.to_string() })
}

fn in_calendar_range(dt: &DateTime<Utc>) -> bool {
    (1..=9999).contains(&dt.year())
}
