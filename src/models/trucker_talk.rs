use crate::models::lenient;
use crate::models::record::{Record, require};
use crate::utils::date::format_short;
use crate::utils::table::Column;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Safety briefing given to a truck driver before loading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TruckerTalkRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub time: String,
    #[serde(deserialize_with = "lenient::string")]
    pub conducted_by: String,
    #[serde(deserialize_with = "lenient::string")]
    pub truck_no: String,
    #[serde(deserialize_with = "lenient::string")]
    pub driver_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub topic: String,
    #[serde(deserialize_with = "lenient::string")]
    pub remarks: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for TruckerTalkRecord {
    fn missing_fields(&self) -> Vec<String> {
        require(&[
            ("Date", self.date.as_str()),
            ("Time", self.time.as_str()),
            ("Conducted By", self.conducted_by.as_str()),
            ("Truck No", self.truck_no.as_str()),
            ("Driver Name", self.driver_name.as_str()),
            ("Topic", self.topic.as_str()),
        ])
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("ID", 24),
            Column::new("Date", 12),
            Column::new("Time", 5),
            Column::new("Conducted By", 18),
            Column::new("Truck", 10),
            Column::new("Driver", 18),
            Column::new("Topic", 28),
            Column::new("Remarks", 12),
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone().unwrap_or_default(),
            format_short(&self.date),
            self.time.clone(),
            self.conducted_by.clone(),
            self.truck_no.clone(),
            self.driver_name.clone(),
            self.topic.clone(),
            self.remarks.clone(),
        ]
    }
}
