//! Reporting period
//!
//! A symbolic token (`week`, `month`, `year`) resolved into a concrete
//! `[start, end]` window that always ends at "now".

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// Window length used when no known token is given
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Symbolic period token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodToken {
    Week,
    Month,
    Year,
    /// Anything unrecognised, including a missing token
    Default,
}

impl PeriodToken {
    /// Lenient parse: unknown or missing tokens fall back to `Default`.
    pub fn parse_lenient(token: Option<&str>) -> Self {
        match token.map(|t| t.trim().to_lowercase()).as_deref() {
            Some("week") => PeriodToken::Week,
            Some("month") => PeriodToken::Month,
            Some("year") => PeriodToken::Year,
            _ => PeriodToken::Default,
        }
    }
}

impl std::fmt::Display for PeriodToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodToken::Week => write!(f, "week"),
            PeriodToken::Month => write!(f, "month"),
            PeriodToken::Year => write!(f, "year"),
            PeriodToken::Default => write!(f, "default"),
        }
    }
}

impl std::str::FromStr for PeriodToken {
    type Err = String;

    /// Strict parse, used when reading stored ledger rows.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" => Ok(PeriodToken::Week),
            "month" => Ok(PeriodToken::Month),
            "year" => Ok(PeriodToken::Year),
            "default" => Ok(PeriodToken::Default),
            _ => Err(format!("Unknown period: {}", s)),
        }
    }
}

/// A resolved time window, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub token: PeriodToken,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    /// Resolve a raw token against an explicit `now`.
    pub fn resolve(token: Option<&str>, now: DateTime<Utc>) -> Self {
        Self::for_token(PeriodToken::parse_lenient(token), now)
    }

    /// Resolve a raw token against the current time.
    pub fn current(token: Option<&str>) -> Self {
        Self::resolve(token, Utc::now())
    }

    pub fn for_token(token: PeriodToken, now: DateTime<Utc>) -> Self {
        let default_start = now - Duration::days(DEFAULT_WINDOW_DAYS);
        let start = match token {
            PeriodToken::Week => now - Duration::days(7),
            PeriodToken::Month => now
                .checked_sub_months(Months::new(1))
                .unwrap_or(default_start),
            PeriodToken::Year => now
                .checked_sub_months(Months::new(12))
                .unwrap_or(default_start),
            PeriodToken::Default => default_start,
        };

        Self {
            token,
            start,
            end: now,
        }
    }

    pub fn length(&self) -> Duration {
        self.end - self.start
    }

    /// The window immediately preceding this one, ending just before `start`.
    ///
    /// Both windows are inclusive, so the previous one stops one microsecond
    /// (the store's timestamp resolution) short of `start`.
    pub fn previous(&self) -> Self {
        Self {
            token: self.token,
            start: self.start - self.length(),
            end: self.start - Duration::microseconds(1),
        }
    }

    /// Inclusive on both ends, matching SQL `BETWEEN`
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap()
    }

    #[test]
    fn week_is_exactly_seven_days() {
        let period = Period::resolve(Some("week"), now());
        assert_eq!(period.token, PeriodToken::Week);
        assert_eq!(period.end, now());
        assert_eq!(period.length(), Duration::days(7));
    }

    #[test]
    fn month_uses_calendar_offset() {
        let period = Period::resolve(Some("month"), now());
        // March 31st minus one month clamps to February 29th (leap year)
        assert_eq!(period.start, Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap());
        assert_eq!(
            period.start,
            now().checked_sub_months(Months::new(1)).unwrap()
        );
    }

    #[test]
    fn year_uses_calendar_offset() {
        let period = Period::resolve(Some("year"), now());
        assert_eq!(period.start, Utc.with_ymd_and_hms(2023, 3, 31, 12, 0, 0).unwrap());
    }

    #[test]
    fn unknown_tokens_fall_back_to_thirty_days() {
        for token in [None, Some(""), Some("fortnight"), Some("quarter"), Some("  ")] {
            let period = Period::resolve(token, now());
            assert_eq!(period.token, PeriodToken::Default);
            assert_eq!(period.length(), Duration::days(DEFAULT_WINDOW_DAYS));
            assert_eq!(period.end, now());
        }
    }

    #[test]
    fn tokens_are_trimmed_and_case_insensitive() {
        assert_eq!(PeriodToken::parse_lenient(Some(" WEEK ")), PeriodToken::Week);
        assert_eq!(PeriodToken::parse_lenient(Some("Month")), PeriodToken::Month);
    }

    #[test]
    fn start_never_after_end() {
        for token in ["week", "month", "year", "other"] {
            let period = Period::resolve(Some(token), now());
            assert!(period.start <= period.end);
        }
    }

    #[test]
    fn previous_window_abuts_current() {
        let period = Period::resolve(Some("week"), now());
        let previous = period.previous();
        assert_eq!(previous.start, period.start - period.length());
        assert_eq!(previous.end, period.start - Duration::microseconds(1));
    }

    #[test]
    fn windows_do_not_share_the_boundary_instant() {
        let period = Period::resolve(Some("month"), now());
        let previous = period.previous();
        assert!(period.contains(period.start));
        assert!(!previous.contains(period.start));
        assert!(previous.contains(period.start - Duration::microseconds(1)));
    }

    #[test]
    fn contains_is_inclusive() {
        let period = Period::resolve(Some("week"), now());
        assert!(period.contains(period.start));
        assert!(period.contains(period.end));
        assert!(!period.contains(period.start - Duration::seconds(1)));
    }

    #[test]
    fn strict_parse_round_trips_display() {
        for token in [
            PeriodToken::Week,
            PeriodToken::Month,
            PeriodToken::Year,
            PeriodToken::Default,
        ] {
            assert_eq!(token.to_string().parse::<PeriodToken>().unwrap(), token);
        }
        assert!("fortnight".parse::<PeriodToken>().is_err());
    }
}
