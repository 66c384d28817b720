//! Time utilities: bank timestamps are wall-clock times in the bank's zone.

use anyhow::Result;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {name}"))
}

/// Parse an ISO-style local timestamp ("2024-06-25T14:30:00", "2024-06-25T14:30"
/// or a bare "2024-06-25" meaning midnight).
pub fn parse_local_naive(local: &str) -> Result<NaiveDateTime> {
    let local = local.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(local, fmt) {
            return Ok(ndt);
        }
    }

    NaiveDate::parse_from_str(local, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| anyhow::anyhow!("invalid local datetime '{local}'"))
}

/// Pin a wall-clock time to `tz`, keeping the resolved offset.
pub fn localize(ndt: NaiveDateTime, tz: Tz) -> Result<DateTime<FixedOffset>> {
    let local_dt = tz
        .from_local_datetime(&ndt)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous or invalid local time (DST?): {ndt} {tz}"))?;

    Ok(local_dt.fixed_offset())
}

/// Parse a local timestamp string in an IANA zone like "Africa/Johannesburg".
pub fn parse_local_datetime(local: &str, tz: Tz) -> Result<DateTime<FixedOffset>> {
    localize(parse_local_naive(local)?, tz)
}
