//! Due-date evaluation for periodic spot checks.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

const MS_PER_DAY: i64 = 86_400_000;

/// Inspection cadence. The "quarterly" cadence is 14 days in the field
/// procedures this client follows, and its medium-alert window is wider than
/// the weekly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Weekly,
    Quarterly,
}

impl Cadence {
    /// Days allowed between two checks.
    pub fn days(&self) -> i64 {
        match self {
            Cadence::Weekly => 7,
            Cadence::Quarterly => 14,
        }
    }

    /// Elapsed days from which the alert turns medium.
    pub fn medium_threshold(&self) -> i64 {
        match self {
            Cadence::Weekly => self.days() - 2,
            Cadence::Quarterly => self.days() - 7,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Cadence::Weekly => "weekly",
            Cadence::Quarterly => "quarterly",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Cadence::Weekly => "Weekly",
            Cadence::Quarterly => "Quarterly",
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Not evaluated (records unavailable).
    None,
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueStatus {
    pub kind: Cadence,
    pub due: bool,
    pub elapsed_days: Option<i64>,
    pub severity: Severity,
    pub message: String,
}

/// Whole days between two instants, rounded up, regardless of order.
pub fn elapsed_days(last: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (now - last).num_milliseconds().abs();
    (ms + MS_PER_DAY - 1) / MS_PER_DAY
}

/// Classify how stale the latest check of `cadence` is at `now`.
pub fn evaluate(last: Option<DateTime<Utc>>, now: DateTime<Utc>, cadence: Cadence) -> DueStatus {
    let Some(last) = last else {
        return DueStatus {
            kind: cadence,
            due: true,
            elapsed_days: Some(cadence.days()),
            severity: Severity::High,
            message: format!("No {} spot check recorded yet", cadence.label()),
        };
    };

    let days = elapsed_days(last, now);
    let cadence_days = cadence.days();

    if days >= cadence_days {
        DueStatus {
            kind: cadence,
            due: true,
            elapsed_days: Some(days),
            severity: Severity::High,
            message: format!(
                "{} spot check overdue by {} days! Please add new record.",
                cadence.title(),
                days - cadence_days
            ),
        }
    } else if days >= cadence.medium_threshold() {
        DueStatus {
            kind: cadence,
            due: false,
            elapsed_days: Some(days),
            severity: Severity::Medium,
            message: format!(
                "Last {} check was {} days ago. {} days remaining for next check.",
                cadence.label(),
                days,
                cadence_days - days
            ),
        }
    } else {
        DueStatus {
            kind: cadence,
            due: false,
            elapsed_days: Some(days),
            severity: Severity::Low,
            message: format!(
                "Last {} check was {} days ago. {} days remaining.",
                cadence.label(),
                days,
                cadence_days - days
            ),
        }
    }
}

/// Status used when the record list could not be loaded.
pub fn not_evaluated(cadence: Cadence, reason: &str) -> DueStatus {
    DueStatus {
        kind: cadence,
        due: false,
        elapsed_days: None,
        severity: Severity::None,
        message: format!("{} spot check status unavailable: {}", cadence.title(), reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn no_record_is_due_and_high() {
        let s = evaluate(None, day(2024, 3, 10), Cadence::Weekly);
        assert!(s.due);
        assert_eq!(s.severity, Severity::High);
        assert_eq!(s.elapsed_days, Some(7));
        assert_eq!(s.message, "No weekly spot check recorded yet");
    }

    #[test]
    fn eight_days_weekly_is_overdue() {
        let today = day(2024, 3, 10);
        let s = evaluate(Some(today - Duration::days(8)), today, Cadence::Weekly);
        assert!(s.due);
        assert_eq!(s.severity, Severity::High);
        assert_eq!(s.elapsed_days, Some(8));
        assert_eq!(s.message, "Weekly spot check overdue by 1 days! Please add new record.");
    }

    #[test]
    fn weekly_thresholds() {
        let today = day(2024, 3, 10);
        let at = |n: i64| evaluate(Some(today - Duration::days(n)), today, Cadence::Weekly);
        assert_eq!(at(4).severity, Severity::Low);
        assert_eq!(at(5).severity, Severity::Medium);
        assert_eq!(at(6).severity, Severity::Medium);
        assert!(!at(6).due);
        assert_eq!(at(7).severity, Severity::High);
        assert!(at(7).due);
        assert_eq!(
            at(5).message,
            "Last weekly check was 5 days ago. 2 days remaining for next check."
        );
        assert_eq!(at(0).message, "Last weekly check was 0 days ago. 7 days remaining.");
    }

    #[test]
    fn quarterly_uses_fourteen_days_and_wider_medium_window() {
        let today = day(2024, 3, 20);
        let at = |n: i64| evaluate(Some(today - Duration::days(n)), today, Cadence::Quarterly);
        assert_eq!(at(6).severity, Severity::Low);
        assert_eq!(at(7).severity, Severity::Medium);
        assert_eq!(at(13).severity, Severity::Medium);
        assert_eq!(at(14).severity, Severity::High);
        assert_eq!(
            at(20).message,
            "Quarterly spot check overdue by 6 days! Please add new record."
        );
    }

    #[test]
    fn no_quarterly_record_reports_full_cadence() {
        let s = evaluate(None, day(2024, 3, 10), Cadence::Quarterly);
        assert_eq!(s.elapsed_days, Some(14));
        assert_eq!(s.message, "No quarterly spot check recorded yet");
    }

    #[test]
    fn time_of_day_counts_towards_elapsed() {
        let now = Utc.with_ymd_and_hms(2024, 5, 20, 10, 0, 0).unwrap();
        let s = evaluate(Some(day(2024, 5, 14)), now, Cadence::Weekly);
        assert_eq!(s.elapsed_days, Some(7));
        assert_eq!(s.severity, Severity::High);
        assert!(s.due);
    }

    #[test]
    fn partial_days_round_up() {
        let last = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 9, 30, 0).unwrap();
        assert_eq!(elapsed_days(last, now), 5);
        assert_eq!(elapsed_days(now, last), 5);
        assert_eq!(elapsed_days(last, last), 0);
    }

    #[test]
    fn unavailable_list_is_severity_none() {
        let s = not_evaluated(Cadence::Quarterly, "network down");
        assert_eq!(s.severity, Severity::None);
        assert!(!s.due);
    }
}
