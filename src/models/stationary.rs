use crate::models::lenient;
use crate::models::record::{Record, require};
use crate::models::verification::VerificationStatus;
use crate::utils::date::format_short;
use crate::utils::table::Column;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Usage of a pre-numbered stationary book (receipt/issue slips `from`..`to`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreNumberStationaryRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub book_no: String,
    #[serde(deserialize_with = "lenient::string")]
    pub receipt_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub from: String,
    #[serde(deserialize_with = "lenient::string")]
    pub to: String,
    #[serde(deserialize_with = "lenient::string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub end_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub purpose: String,
    #[serde(deserialize_with = "lenient::string")]
    pub whi_initial: String,
    #[serde(deserialize_with = "lenient::string")]
    pub do_verified: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for PreNumberStationaryRecord {
    const DATE_FIELD: &'static str = "receiptDate";

    fn missing_fields(&self) -> Vec<String> {
        require(&[
            ("Book No", self.book_no.as_str()),
            ("Receipt Date", self.receipt_date.as_str()),
            ("From", self.from.as_str()),
            ("To", self.to.as_str()),
            ("Purpose", self.purpose.as_str()),
            ("WHI Initial", self.whi_initial.as_str()),
        ])
    }

    fn verification(&self) -> Option<VerificationStatus> {
        Some(VerificationStatus::parse(&self.do_verified))
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("ID", 24),
            Column::new("Book", 8),
            Column::new("Received", 12),
            Column::new("From", 8),
            Column::new("To", 8),
            Column::new("Start", 12),
            Column::new("End", 12),
            Column::new("Purpose", 22),
            Column::new("WHI", 12),
            Column::new("DO", 16),
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone().unwrap_or_default(),
            self.book_no.clone(),
            format_short(&self.receipt_date),
            self.from.clone(),
            self.to.clone(),
            format_short(&self.start_date),
            format_short(&self.end_date),
            self.purpose.clone(),
            self.whi_initial.clone(),
            VerificationStatus::parse(&self.do_verified).colored(),
        ]
    }
}
