//! Relative timestamp labels for task rows.

use anyhow::Result;
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// Parse an IANA timezone name like "America/Chicago".
pub fn parse_tz(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// Format a creation time relative to `now`, compared by calendar date in `tz`:
/// "Hoy a las HH:MM", "Ayer a las HH:MM", or "D mmm".
pub fn relative_label(created_at: DateTime<Utc>, now: DateTime<Utc>, tz: Tz) -> String {
    let local = created_at.with_timezone(&tz);
    let today = now.with_timezone(&tz).date_naive();

    if local.date_naive() == today {
        return format!("Hoy a las {}", local.format("%H:%M"));
    }
    if Some(local.date_naive()) == today.pred_opt() {
        return format!("Ayer a las {}", local.format("%H:%M"));
    }
    format!("{} {}", local.day(), MONTHS_ES[local.month0() as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn chicago() -> Tz {
        parse_tz("America/Chicago").unwrap()
    }

    #[test]
    fn same_calendar_day_is_hoy() {
        // 2026-02-19 18:30 UTC = 12:30 CST, same day as noon CST.
        let now = Utc.with_ymd_and_hms(2026, 2, 19, 23, 0, 0).unwrap();
        let created = Utc.with_ymd_and_hms(2026, 2, 19, 18, 30, 0).unwrap();
        assert_eq!(relative_label(created, now, chicago()), "Hoy a las 12:30");
    }

    #[test]
    fn previous_calendar_day_is_ayer() {
        let now = Utc.with_ymd_and_hms(2026, 2, 20, 18, 0, 0).unwrap();
        let created = Utc.with_ymd_and_hms(2026, 2, 19, 15, 5, 0).unwrap();
        assert_eq!(relative_label(created, now, chicago()), "Ayer a las 09:05");
    }

    #[test]
    fn calendar_comparison_uses_the_display_timezone() {
        // 2026-02-20 02:00 UTC is still 2026-02-19 in Chicago (CST, UTC-6),
        // so relative to a "now" later that same Chicago day it is Hoy.
        let now = Utc.with_ymd_and_hms(2026, 2, 20, 5, 0, 0).unwrap();
        let created = Utc.with_ymd_and_hms(2026, 2, 20, 2, 0, 0).unwrap();
        assert_eq!(relative_label(created, now, chicago()), "Hoy a las 20:00");
    }

    #[test]
    fn older_dates_use_short_spanish_month() {
        let now = Utc.with_ymd_and_hms(2026, 2, 19, 12, 0, 0).unwrap();
        let created = Utc.with_ymd_and_hms(2026, 1, 3, 12, 0, 0).unwrap();
        assert_eq!(relative_label(created, now, chicago()), "3 ene");
    }

    #[test]
    fn rejects_bad_timezone_names() {
        assert!(parse_tz("America/Nowhere").is_err());
    }
}
