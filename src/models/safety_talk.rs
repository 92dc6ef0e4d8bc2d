use crate::models::lenient;
use crate::models::record::{Record, require};
use crate::utils::date::format_short;
use crate::utils::table::Column;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Toolbox talk held with loading labours.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SafetyTalkRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub time: String,
    #[serde(deserialize_with = "lenient::string")]
    pub conducted_by: String,
    #[serde(deserialize_with = "lenient::string")]
    pub no_of_labours: String,
    /// "Yes" / "No": whether the head of contractors attended.
    #[serde(deserialize_with = "lenient::string")]
    pub hc_present: String,
    #[serde(deserialize_with = "lenient::string")]
    pub topic: String,
    #[serde(deserialize_with = "lenient::string")]
    pub remarks: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for SafetyTalkRecord {
    fn missing_fields(&self) -> Vec<String> {
        require(&[
            ("Date", self.date.as_str()),
            ("Time", self.time.as_str()),
            ("Conducted By", self.conducted_by.as_str()),
            ("No. of Labours", self.no_of_labours.as_str()),
            ("Topic", self.topic.as_str()),
        ])
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("ID", 24),
            Column::new("Date", 12),
            Column::new("Time", 5),
            Column::new("Conducted By", 18),
            Column::new("Labours", 7),
            Column::new("HC", 3),
            Column::new("Topic", 30),
            Column::new("Remarks", 24),
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone().unwrap_or_default(),
            format_short(&self.date),
            self.time.clone(),
            self.conducted_by.clone(),
            self.no_of_labours.clone(),
            self.hc_present.clone(),
            self.topic.clone(),
            self.remarks.clone(),
        ]
    }
}
