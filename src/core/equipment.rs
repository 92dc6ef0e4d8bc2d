use crate::models::spot_check::SpotCheckRecord;
use crate::models::verification::{NOT_VERIFIED, VerificationStatus};
use crate::utils::date::parse_api_instant;
use serde::Serialize;

/// Equipment summary taken from one spot-check record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentStatus {
    pub date: String,
    pub stitching_machine: String,
    pub weighing_scale: String,
    pub ups_battery: String,
    pub fire_extinguishers: usize,
    pub good_ramps: usize,
    pub total_ramps: usize,
    pub good_harnesses: usize,
    pub total_harnesses: usize,
    pub medicine: String,
    pub verified_by: String,
    pub verified: bool,
}

const NO_DATA: &str = "No Data";

fn or_no_data(s: &str) -> String {
    if s.trim().is_empty() { NO_DATA.to_string() } else { s.to_string() }
}

fn is_good(status: &str) -> bool {
    status.trim().eq_ignore_ascii_case("good")
}

impl EquipmentStatus {
    pub fn from_record(rec: &SpotCheckRecord) -> Self {
        let status = rec.verification_status();
        Self {
            date: rec.date.clone(),
            stitching_machine: or_no_data(&rec.stitching_machine.condition),
            weighing_scale: or_no_data(&rec.weighing_scale.condition),
            ups_battery: or_no_data(&rec.ups_battery.condition),
            fire_extinguishers: rec.fire_extinguishers.len(),
            good_ramps: rec.safety_ramp.iter().filter(|r| is_good(&r.status)).count(),
            total_ramps: rec.safety_ramp.len(),
            good_harnesses: rec.srl_harness.iter().filter(|h| is_good(&h.status)).count(),
            total_harnesses: rec.srl_harness.len(),
            medicine: or_no_data(&rec.medicine),
            verified: status.is_verified(),
            verified_by: match status {
                VerificationStatus::NotVerified => NOT_VERIFIED.to_string(),
                _ => rec.verified_by.clone(),
            },
        }
    }

    /// Placeholder shown when no spot check exists yet.
    pub fn no_data() -> Self {
        Self {
            date: String::new(),
            stitching_machine: NO_DATA.to_string(),
            weighing_scale: NO_DATA.to_string(),
            ups_battery: NO_DATA.to_string(),
            fire_extinguishers: 0,
            good_ramps: 0,
            total_ramps: 0,
            good_harnesses: 0,
            total_harnesses: 0,
            medicine: NO_DATA.to_string(),
            verified_by: NOT_VERIFIED.to_string(),
            verified: false,
        }
    }
}

/// Most recent record by its date; records without a readable date are skipped.
pub fn latest(records: &[SpotCheckRecord]) -> Option<&SpotCheckRecord> {
    records
        .iter()
        .filter_map(|r| parse_api_instant(&r.date).map(|at| (at, r)))
        .max_by_key(|(at, _)| *at)
        .map(|(_, r)| r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_good_ramps_and_harnesses() {
        let mut rec = SpotCheckRecord::template("2024-05-01", "Ali");
        rec.safety_ramp[0].status = "Good".into();
        rec.safety_ramp[3].status = "good".into();
        rec.srl_harness[1].status = "Poor".into();
        rec.stitching_machine.condition = "Perfect".into();

        let eq = EquipmentStatus::from_record(&rec);
        assert_eq!(eq.good_ramps, 2);
        assert_eq!(eq.total_ramps, 5);
        assert_eq!(eq.good_harnesses, 0);
        assert_eq!(eq.fire_extinguishers, 4);
        assert_eq!(eq.stitching_machine, "Perfect");
        assert_eq!(eq.weighing_scale, "No Data");
        assert!(!eq.verified);
        assert_eq!(eq.verified_by, "Not Verified");
    }

    #[test]
    fn latest_picks_newest_date() {
        let recs = vec![
            SpotCheckRecord::template("2024-05-01", "A"),
            SpotCheckRecord::template("2024-05-09T10:00:00.000Z", "B"),
            SpotCheckRecord::template("", "C"),
            SpotCheckRecord::template("2024-05-03", "D"),
        ];
        assert_eq!(latest(&recs).map(|r| r.warehouse_incharge.as_str()), Some("B"));
        assert!(latest(&[]).is_none());
    }
}
