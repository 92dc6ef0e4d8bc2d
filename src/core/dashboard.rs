//! Today's overview for a warehouse user, built from already fetched lists.

use crate::core::calculator::staleness::{Cadence, DueStatus, evaluate, not_evaluated};
use crate::core::equipment::{EquipmentStatus, latest};
use crate::models::attendance::AttendanceRecord;
use crate::models::empty_bag::EmptyBagRecord;
use crate::models::safety_talk::SafetyTalkRecord;
use crate::models::spot_check::SpotCheckRecord;
use crate::models::stationary::PreNumberStationaryRecord;
use crate::utils::date::{iso_day, parse_api_instant};
use crate::utils::number::float_or_zero;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

pub fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        17..=20 => "Good evening",
        _ => "Good night",
    }
}

/// Lists fetched for the dashboard. `None` means the fetch failed.
#[derive(Debug, Default)]
pub struct DashboardData {
    pub attendance: Option<Vec<AttendanceRecord>>,
    pub safety_talks: Option<Vec<SafetyTalkRecord>>,
    pub empty_bags: Option<Vec<EmptyBagRecord>>,
    pub stationary: Option<Vec<PreNumberStationaryRecord>>,
    pub weekly: Option<Vec<SpotCheckRecord>>,
    pub quarterly: Option<Vec<SpotCheckRecord>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotCheckOverview {
    pub alert: DueStatus,
    /// Records inside the last cadence window.
    pub recent_count: usize,
    pub total: usize,
    pub equipment: EquipmentStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub date: NaiveDate,
    pub attendance_today: Option<AttendanceRecord>,
    pub safety_talks_today: usize,
    pub empty_bags_today: usize,
    pub total_balance_today: f64,
    pub stationary_started_today: usize,
    pub weekly: SpotCheckOverview,
    pub quarterly: SpotCheckOverview,
}

fn is_on(date: &str, day: &str) -> bool {
    iso_day(date) == Some(day)
}

fn overview(records: Option<&[SpotCheckRecord]>, cadence: Cadence, now: DateTime<Utc>) -> SpotCheckOverview {
    let Some(records) = records else {
        return SpotCheckOverview {
            alert: not_evaluated(cadence, "records could not be loaded"),
            recent_count: 0,
            total: 0,
            equipment: EquipmentStatus::no_data(),
        };
    };

    let newest = latest(records);
    let since = now - Duration::days(cadence.days());
    let recent_count = records
        .iter()
        .filter_map(|r| parse_api_instant(&r.date))
        .filter(|at| *at >= since)
        .count();

    SpotCheckOverview {
        alert: evaluate(newest.and_then(|r| parse_api_instant(&r.date)), now, cadence),
        recent_count,
        total: records.len(),
        equipment: newest
            .map(EquipmentStatus::from_record)
            .unwrap_or_else(EquipmentStatus::no_data),
    }
}

impl DashboardSummary {
    /// `today` selects the day's records; spot-check alerts are measured
    /// against the instant `now`.
    pub fn build(data: &DashboardData, today: NaiveDate, now: DateTime<Utc>) -> Self {
        let day = today.format("%Y-%m-%d").to_string();

        let attendance_today = data
            .attendance
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|r| is_on(&r.date, &day))
            .cloned();

        let safety_talks_today = data
            .safety_talks
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|r| is_on(&r.date, &day))
            .count();

        let bags_today: Vec<&EmptyBagRecord> = data
            .empty_bags
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|r| is_on(&r.date, &day))
            .collect();

        let stationary_started_today = data
            .stationary
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|r| is_on(&r.start_date, &day))
            .count();

        Self {
            date: today,
            attendance_today,
            safety_talks_today,
            empty_bags_today: bags_today.len(),
            total_balance_today: bags_today.iter().map(|r| float_or_zero(&r.balance_qty)).sum(),
            stationary_started_today,
            weekly: overview(data.weekly.as_deref(), Cadence::Weekly, now),
            quarterly: overview(data.quarterly.as_deref(), Cadence::Quarterly, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::staleness::Severity;
    use chrono::TimeZone;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    fn midnight() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 0, 0, 0).unwrap()
    }

    #[test]
    fn greeting_by_hour() {
        assert_eq!(greeting(5), "Good morning");
        assert_eq!(greeting(12), "Good afternoon");
        assert_eq!(greeting(20), "Good evening");
        assert_eq!(greeting(23), "Good night");
        assert_eq!(greeting(2), "Good night");
    }

    #[test]
    fn today_counts_and_balance() {
        let bag = |date: &str, bal: &str| EmptyBagRecord {
            date: date.into(),
            balance_qty: bal.into(),
            ..Default::default()
        };
        let data = DashboardData {
            attendance: Some(vec![AttendanceRecord {
                date: "2024-05-20T00:00:00.000Z".into(),
                time_in: "09:30".into(),
                ..Default::default()
            }]),
            empty_bags: Some(vec![
                bag("2024-05-20", "120"),
                bag("2024-05-20", "-5"),
                bag("2024-05-19", "1000"),
            ]),
            ..Default::default()
        };
        let s = DashboardSummary::build(&data, today(), midnight());
        assert_eq!(s.attendance_today.map(|a| a.time_in), Some("09:30".to_string()));
        assert_eq!(s.empty_bags_today, 2);
        assert_eq!(s.total_balance_today, 115.0);
        assert_eq!(s.safety_talks_today, 0);
    }

    #[test]
    fn spot_check_alerts() {
        let data = DashboardData {
            weekly: Some(vec![
                SpotCheckRecord::template("2024-05-12", "A"),
                SpotCheckRecord::template("2024-04-01", "B"),
            ]),
            quarterly: None,
            ..Default::default()
        };
        let s = DashboardSummary::build(&data, today(), midnight());
        assert!(s.weekly.alert.due);
        assert_eq!(s.weekly.alert.elapsed_days, Some(8));
        assert_eq!(s.weekly.recent_count, 0);
        assert_eq!(s.weekly.equipment.fire_extinguishers, 4);
        assert_eq!(s.quarterly.alert.severity, Severity::None);
        assert_eq!(s.quarterly.equipment.stitching_machine, "No Data");

        let empty = DashboardData {
            quarterly: Some(vec![]),
            ..Default::default()
        };
        let s = DashboardSummary::build(&empty, today(), midnight());
        assert!(s.quarterly.alert.due);
        assert_eq!(s.quarterly.alert.severity, Severity::High);
    }

    #[test]
    fn alert_counts_time_of_day() {
        let data = DashboardData {
            weekly: Some(vec![SpotCheckRecord::template("2024-05-14", "A")]),
            ..Default::default()
        };
        let now = Utc.with_ymd_and_hms(2024, 5, 20, 10, 0, 0).unwrap();
        let s = DashboardSummary::build(&data, today(), now);
        assert_eq!(s.weekly.alert.elapsed_days, Some(7));
        assert_eq!(s.weekly.alert.severity, Severity::High);
        assert!(s.weekly.alert.due);
        assert_eq!(s.weekly.recent_count, 1);
    }
}
