//! Weekly / quarterly spot-check checklist. Both cadences share this shape.

use crate::models::lenient;
use crate::models::record::{Record, require};
use crate::models::verification::{DO_NOT_VERIFIED, VerificationStatus};
use crate::utils::colors::{RESET, color_for_condition};
use crate::utils::date::format_short;
use crate::utils::table::Column;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stock lines pre-filled on a new checklist.
pub const DEFAULT_STOCK_ITEMS: &[&str] = &[
    "Urea", "EEDAP", "Z(G)", "Z(B)", "TSP", "Z(T)", "SSP 25 Kg", "SSP 50 Kg", "MOP", "Zingro",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockLine {
    #[serde(deserialize_with = "lenient::string")]
    pub item: String,
    #[serde(deserialize_with = "lenient::string")]
    pub sit_qty: String,
    #[serde(deserialize_with = "lenient::string")]
    pub physical_count: String,
    #[serde(deserialize_with = "lenient::string")]
    pub loose_product: String,
    #[serde(deserialize_with = "lenient::string")]
    pub remarks: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElcbEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub month: String,
    #[serde(deserialize_with = "lenient::string")]
    pub whi: String,
    #[serde(deserialize_with = "lenient::string")]
    pub electrician: String,
    #[serde(deserialize_with = "lenient::string")]
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Elcb {
    pub weekly: ElcbEntry,
    pub quarterly: ElcbEntry,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EarthingHealth {
    #[serde(deserialize_with = "lenient::string")]
    pub month: String,
    #[serde(deserialize_with = "lenient::string")]
    pub ohm: String,
    #[serde(deserialize_with = "lenient::string")]
    pub electrician: String,
    #[serde(deserialize_with = "lenient::string")]
    pub stamp: String,
    #[serde(deserialize_with = "lenient::string")]
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StitchingMachine {
    #[serde(deserialize_with = "lenient::string")]
    pub condition: String,
    #[serde(deserialize_with = "lenient::string")]
    pub condition_remark: String,
    #[serde(deserialize_with = "lenient::string")]
    pub cord: String,
    #[serde(deserialize_with = "lenient::string")]
    pub cord_remark: String,
    #[serde(deserialize_with = "lenient::string")]
    pub oil: String,
    #[serde(deserialize_with = "lenient::string")]
    pub oil_remark: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeighingScale {
    #[serde(deserialize_with = "lenient::string")]
    pub condition: String,
    #[serde(deserialize_with = "lenient::string")]
    pub remarks: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpsBattery {
    #[serde(deserialize_with = "lenient::string")]
    pub charging: String,
    #[serde(deserialize_with = "lenient::string")]
    pub charging_remarks: String,
    #[serde(deserialize_with = "lenient::string")]
    pub condition: String,
    #[serde(deserialize_with = "lenient::string")]
    pub condition_remarks: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WarehouseAgreement {
    #[serde(deserialize_with = "lenient::string")]
    pub permanent_sqft: String,
    #[serde(deserialize_with = "lenient::string")]
    pub temporary_sqft: String,
    #[serde(deserialize_with = "lenient::string")]
    pub remarks_sqft: String,
    #[serde(deserialize_with = "lenient::string")]
    pub permanent_expiry: String,
    #[serde(deserialize_with = "lenient::string")]
    pub temporary_expiry: String,
    #[serde(deserialize_with = "lenient::string")]
    pub remarks_expiry: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificatePeriod {
    #[serde(deserialize_with = "lenient::string")]
    pub from: String,
    #[serde(deserialize_with = "lenient::string")]
    pub to: String,
    #[serde(deserialize_with = "lenient::string")]
    pub reminder_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GovtCertificate {
    pub weighing_scale: CertificatePeriod,
    pub warehouse_reg: CertificatePeriod,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FireExtinguisher {
    #[serde(deserialize_with = "lenient::string")]
    pub last_refill: String,
    #[serde(deserialize_with = "lenient::string")]
    pub expiry: String,
    #[serde(deserialize_with = "lenient::string")]
    pub pressure: String,
    #[serde(deserialize_with = "lenient::string")]
    pub nozzle: String,
    #[serde(deserialize_with = "lenient::string")]
    pub seal: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyRamp {
    #[serde(deserialize_with = "lenient::string")]
    pub frequently: String,
    #[serde(deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(deserialize_with = "lenient::string")]
    pub remarks: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SrlHarness {
    #[serde(deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(deserialize_with = "lenient::string")]
    pub remarks: String,
    #[serde(deserialize_with = "lenient::string")]
    pub freq: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmergencyNumbers {
    #[serde(deserialize_with = "lenient::string")]
    pub fire_brigade: String,
    #[serde(deserialize_with = "lenient::string")]
    pub rescue: String,
    #[serde(deserialize_with = "lenient::string")]
    pub civil_defense: String,
    #[serde(deserialize_with = "lenient::string")]
    pub bomb_disposal: String,
    #[serde(deserialize_with = "lenient::string")]
    pub nearest_hospital: String,
    #[serde(deserialize_with = "lenient::string")]
    pub police_station: String,
    #[serde(deserialize_with = "lenient::string")]
    pub district_hospital: String,
    #[serde(deserialize_with = "lenient::string")]
    pub edhi: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpotCheckRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub date: String,
    pub stocks: Vec<StockLine>,
    pub elcb: Elcb,
    pub earthing_health: EarthingHealth,
    pub stitching_machine: StitchingMachine,
    pub weighing_scale: WeighingScale,
    pub ups_battery: UpsBattery,
    pub warehouse_agreement: WarehouseAgreement,
    pub govt_certificate: GovtCertificate,
    pub fire_extinguishers: Vec<FireExtinguisher>,
    pub safety_ramp: Vec<SafetyRamp>,
    pub srl_harness: Vec<SrlHarness>,
    pub emergency_numbers: EmergencyNumbers,
    #[serde(deserialize_with = "lenient::string")]
    pub medicine: String,
    #[serde(deserialize_with = "lenient::string")]
    pub warehouse_incharge: String,
    #[serde(deserialize_with = "lenient::string")]
    pub verified_by: String,
    #[serde(deserialize_with = "lenient::string")]
    pub remarks: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SpotCheckRecord {
    /// A blank checklist with the standard rows filled in.
    pub fn template(date: &str, incharge: &str) -> Self {
        let ramp = |freq: &str| SafetyRamp {
            frequently: freq.to_string(),
            ..Default::default()
        };
        let harness = |freq: &str| SrlHarness {
            freq: freq.to_string(),
            ..Default::default()
        };

        Self {
            date: date.to_string(),
            stocks: DEFAULT_STOCK_ITEMS
                .iter()
                .map(|item| StockLine {
                    item: item.to_string(),
                    ..Default::default()
                })
                .collect(),
            fire_extinguishers: vec![FireExtinguisher::default(); 4],
            safety_ramp: vec![
                ramp("Weekly"),
                ramp("Weekly"),
                ramp("Monthly"),
                ramp("Monthly"),
                ramp("Monthly"),
            ],
            srl_harness: vec![
                harness("Monthly"),
                harness("Monthly"),
                harness("Monthly"),
                harness("Quarterly"),
                harness("Quarterly"),
            ],
            warehouse_incharge: incharge.to_string(),
            verified_by: DO_NOT_VERIFIED.to_string(),
            ..Default::default()
        }
    }

    /// `verifiedBy` carries either a not-verified marker or the verifier's name.
    pub fn verification_status(&self) -> VerificationStatus {
        match VerificationStatus::parse(&self.verified_by) {
            VerificationStatus::Pending(_) => VerificationStatus::Verified,
            other => other,
        }
    }
}

impl Record for SpotCheckRecord {
    fn missing_fields(&self) -> Vec<String> {
        require(&[
            ("Date", self.date.as_str()),
            ("Warehouse Incharge", self.warehouse_incharge.as_str()),
        ])
    }

    fn verification(&self) -> Option<VerificationStatus> {
        Some(self.verification_status())
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("ID", 24),
            Column::new("Date", 12),
            Column::new("Stocks", 6),
            Column::new("Stitching", 16),
            Column::new("Scale", 16),
            Column::new("UPS", 16),
            Column::new("Ext.", 4),
            Column::new("WHI", 16),
            Column::new("Verified By", 18),
        ]
    }

    fn row(&self) -> Vec<String> {
        let cond = |c: &str| {
            if c.is_empty() {
                "--".to_string()
            } else {
                format!("{}{}{}", color_for_condition(c), c, RESET)
            }
        };
        vec![
            self.id.clone().unwrap_or_default(),
            format_short(&self.date),
            self.stocks.len().to_string(),
            cond(&self.stitching_machine.condition),
            cond(&self.weighing_scale.condition),
            cond(&self.ups_battery.condition),
            self.fire_extinguishers.len().to_string(),
            self.warehouse_incharge.clone(),
            cond(&self.verified_by),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_has_standard_rows() {
        let t = SpotCheckRecord::template("2024-05-01", "Ali");
        assert_eq!(t.stocks.len(), 10);
        assert_eq!(t.stocks[0].item, "Urea");
        assert_eq!(t.fire_extinguishers.len(), 4);
        assert_eq!(t.safety_ramp[2].frequently, "Monthly");
        assert_eq!(t.srl_harness[4].freq, "Quarterly");
        assert_eq!(t.verified_by, "DO Not Verified");
        assert!(!t.verification_status().is_verified());
    }

    #[test]
    fn yaml_form_with_partial_sections_loads() {
        let yaml = r#"
date: 2024-05-01
warehouseIncharge: Ali
stitchingMachine:
  condition: Good
weighingScale:
  condition: Repairing
fireExtinguishers:
  - lastRefill: 2024-01-01
    pressure: 12
verifiedBy: Sara DO
"#;
        let rec: SpotCheckRecord = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rec.date, "2024-05-01");
        assert_eq!(rec.stitching_machine.condition, "Good");
        assert_eq!(rec.fire_extinguishers[0].pressure, "12");
        assert!(rec.stocks.is_empty());
        assert!(rec.verification_status().is_verified());
        assert!(rec.missing_fields().is_empty());
    }
}
