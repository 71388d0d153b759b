//! New Year countdown: calendar target math and the one-second tick state.
//!
//! The calendar arithmetic is pure so it can be tested with a fixed zone;
//! only the console's tick driver ever consults the real clock.

use std::time::{Duration, Instant};

use chrono::{DateTime, Datelike, TimeZone};

/// Tick cadence of the running countdown.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// The next January 1st 00:00:00 strictly after `now` — except on January
/// 1st itself, where the target is *this* year's Jan 1 (already reached, so
/// the countdown completes on its first tick).
pub fn next_new_year<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let year = if now.month() == 1 && now.day() == 1 {
        now.year()
    } else {
        now.year() + 1
    };
    now.timezone()
        .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .earliest()
        .unwrap_or_else(|| now.clone())
}

/// Render a remaining-seconds value as `"Nd Nh Nm Ns"`.
pub fn format_remaining(total_secs: i64) -> String {
    let secs = total_secs.max(0);
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;
    format!("{days}d {hours}h {minutes}m {seconds}s")
}

/// A running countdown: the wall-clock target plus the next tick deadline.
#[derive(Debug)]
pub struct Countdown {
    target: DateTime<chrono::Local>,
    next_tick: Instant,
    interval: Duration,
}

impl Countdown {
    pub fn new(target: DateTime<chrono::Local>, now: Instant, interval: Duration) -> Self {
        Self { target, next_tick: now + interval, interval }
    }

    pub fn target(&self) -> &DateTime<chrono::Local> {
        &self.target
    }

    pub fn next_tick(&self) -> Instant {
        self.next_tick
    }

    /// True when the tick deadline has elapsed.
    pub fn due(&self, now: Instant) -> bool {
        self.next_tick <= now
    }

    /// Advance the tick deadline by one interval.
    pub fn advance(&mut self) {
        self.next_tick += self.interval;
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn mid_year_targets_next_january_first() {
        let now = utc(2026, 8, 30, 12, 0, 0);
        assert_eq!(next_new_year(&now), utc(2027, 1, 1, 0, 0, 0));
    }

    #[test]
    fn december_31_targets_the_imminent_midnight() {
        let now = utc(2026, 12, 31, 23, 59, 59);
        assert_eq!(next_new_year(&now), utc(2027, 1, 1, 0, 0, 0));
    }

    #[test]
    fn january_first_targets_this_years_jan_first() {
        // Already-reached target: the countdown completes immediately.
        let now = utc(2026, 1, 1, 10, 30, 0);
        let target = next_new_year(&now);
        assert_eq!(target, utc(2026, 1, 1, 0, 0, 0));
        assert!(target <= now);
    }

    #[test]
    fn january_second_targets_next_year_again() {
        let now = utc(2026, 1, 2, 0, 0, 1);
        assert_eq!(next_new_year(&now), utc(2027, 1, 1, 0, 0, 0));
    }

    #[test]
    fn format_breaks_down_days_hours_minutes_seconds() {
        assert_eq!(format_remaining(0), "0d 0h 0m 0s");
        assert_eq!(format_remaining(59), "0d 0h 0m 59s");
        assert_eq!(format_remaining(3_661), "0d 1h 1m 1s");
        assert_eq!(format_remaining(90_061), "1d 1h 1m 1s");
        assert_eq!(format_remaining(31 * 86_400 + 2), "31d 0h 0m 2s");
    }

    #[test]
    fn format_clamps_negative_remainders_to_zero() {
        assert_eq!(format_remaining(-5), "0d 0h 0m 0s");
    }

    #[test]
    fn tick_deadline_advances_by_one_second() {
        let now = Instant::now();
        let target = chrono::Local::now();
        let mut c = Countdown::new(target, now, TICK_INTERVAL);
        assert!(!c.due(now));
        assert!(c.due(now + TICK_INTERVAL));
        c.advance();
        assert!(!c.due(now + TICK_INTERVAL));
        assert!(c.due(now + TICK_INTERVAL * 2));
    }
}
