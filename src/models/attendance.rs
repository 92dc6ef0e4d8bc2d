use crate::core::calculator::extra_time::extra_time_with_baseline;
use crate::models::lenient;
use crate::models::record::{Record, require};
use crate::utils::colors::colorize_optional;
use crate::utils::date::format_short;
use crate::utils::table::Column;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttendanceRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub time_in: String,
    #[serde(deserialize_with = "lenient::string")]
    pub time_out: String,
    #[serde(deserialize_with = "lenient::string")]
    pub extra_time: String,
    #[serde(deserialize_with = "lenient::string")]
    pub direct_diversion: String,
    #[serde(deserialize_with = "lenient::string")]
    pub total_handling: String,
    #[serde(deserialize_with = "lenient::string")]
    pub whi_signature: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for AttendanceRecord {
    const DERIVED_INPUTS: &'static [&'static str] = &["timeIn", "timeOut"];

    fn recompute(&mut self, baseline_minutes: i64) {
        self.extra_time = extra_time_with_baseline(&self.time_in, &self.time_out, baseline_minutes);
    }

    fn missing_fields(&self) -> Vec<String> {
        require(&[
            ("Date", self.date.as_str()),
            ("Time In", self.time_in.as_str()),
            ("Time Out", self.time_out.as_str()),
            ("Signature", self.whi_signature.as_str()),
        ])
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("ID", 24),
            Column::new("Date", 12),
            Column::new("In", 5),
            Column::new("Out", 5),
            Column::new("Extra", 8),
            Column::new("Diversion", 10),
            Column::new("Handling", 10),
            Column::new("WHI", 20),
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone().unwrap_or_default(),
            format_short(&self.date),
            self.time_in.clone(),
            self.time_out.clone(),
            colorize_optional(&self.extra_time),
            self.direct_diversion.clone(),
            self.total_handling.clone(),
            self.whi_signature.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recompute_sets_extra_time_and_keeps_unknown_fields() {
        let mut rec: AttendanceRecord = serde_json::from_str(
            r#"{"_id":"a1","date":"2024-01-01T00:00:00.000Z","timeIn":"09:00","timeOut":"19:00","warehouse":"w9"}"#,
        )
        .unwrap();
        rec.recompute(480);
        assert_eq!(rec.extra_time, "2h 0m");

        let back = serde_json::to_value(&rec).unwrap();
        assert_eq!(back["warehouse"], "w9");
        assert_eq!(back["extraTime"], "2h 0m");
        assert_eq!(back["_id"], "a1");
    }

    #[test]
    fn missing_signature_is_reported() {
        let rec = AttendanceRecord {
            date: "2024-01-01".into(),
            time_in: "09:00".into(),
            time_out: "17:00".into(),
            ..Default::default()
        };
        assert_eq!(rec.missing_fields(), vec!["Signature"]);
    }
}
