//! Parsing of user-supplied times: due dates and reminder specs.

use anyhow::{Context as _, anyhow, bail};
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Parse a due date: `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 instant.
pub fn parse_due(input: &str) -> anyhow::Result<DateTime<Utc>> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| anyhow!("invalid date '{trimmed}'"))?;
        return Ok(midnight.and_utc());
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid due date '{trimmed}' (want YYYY-MM-DD or RFC 3339)"))
}

/// When a reminder should fire, before resolution against the clock and the
/// task's due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemindSpec {
    /// An offset from now, e.g. `30m`, `1h`, `1d`.
    In(Duration),
    /// Exactly at the task's due date.
    AtDue,
    /// An offset before the due date, e.g. `due-15m`.
    BeforeDue(Duration),
    /// An absolute RFC 3339 instant.
    At(DateTime<Utc>),
}

/// Parse a reminder spec: `30m` | `2h` | `1d` | `due` | `due-15m` | RFC 3339.
pub fn parse_remind_spec(input: &str) -> anyhow::Result<RemindSpec> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("due") {
        return Ok(RemindSpec::AtDue);
    }
    if let Some(offset) = trimmed
        .strip_prefix("due-")
        .or_else(|| trimmed.strip_prefix("DUE-"))
    {
        return Ok(RemindSpec::BeforeDue(parse_offset(offset)?));
    }
    if let Ok(offset) = parse_offset(trimmed) {
        return Ok(RemindSpec::In(offset));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| RemindSpec::At(dt.with_timezone(&Utc)))
        .with_context(|| {
            format!("invalid reminder '{trimmed}' (want 30m/2h/1d, due, due-15m, or RFC 3339)")
        })
}

/// Resolve a spec into an instant; due-relative specs need a due date.
pub fn resolve_remind(
    spec: RemindSpec,
    now: DateTime<Utc>,
    due: Option<DateTime<Utc>>,
) -> anyhow::Result<DateTime<Utc>> {
    match spec {
        RemindSpec::In(offset) => Ok(now + offset),
        RemindSpec::At(at) => Ok(at),
        RemindSpec::AtDue => due.ok_or_else(|| anyhow!("task has no due date to remind at")),
        RemindSpec::BeforeDue(offset) => due
            .map(|d| d - offset)
            .ok_or_else(|| anyhow!("task has no due date to remind before")),
    }
}

/// Parse `45s`, `30m`, `2h`, or `1d` into a duration.
fn parse_offset(input: &str) -> anyhow::Result<Duration> {
    let trimmed = input.trim();
    let Some(unit) = trimmed.chars().last() else {
        bail!("empty duration");
    };
    let amount: i64 = trimmed[..trimmed.len() - unit.len_utf8()]
        .parse()
        .with_context(|| format!("invalid duration '{trimmed}'"))?;
    if amount < 0 {
        bail!("negative duration '{trimmed}'");
    }
    match unit {
        's' => Ok(Duration::seconds(amount)),
        'm' => Ok(Duration::minutes(amount)),
        'h' => Ok(Duration::hours(amount)),
        'd' => Ok(Duration::days(amount)),
        _ => bail!("invalid duration unit in '{trimmed}' (want s/m/h/d)"),
    }
}
