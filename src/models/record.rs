use crate::models::verification::VerificationStatus;
use crate::utils::table::Column;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Shared behaviour of every record kind the API stores.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Field holding the record's business date (used by date/month filters).
    const DATE_FIELD: &'static str = "date";

    /// Fields whose change requires [`Record::recompute`].
    const DERIVED_INPUTS: &'static [&'static str] = &[];

    /// Recompute derived fields (extra time, running balance) from their inputs.
    fn recompute(&mut self, _baseline_minutes: i64) {}

    /// Labels of required fields left empty.
    fn missing_fields(&self) -> Vec<String> {
        Vec::new()
    }

    fn verification(&self) -> Option<VerificationStatus> {
        None
    }

    fn columns() -> Vec<Column>;

    fn row(&self) -> Vec<String>;
}

/// Collect the labels of empty required fields.
pub fn require(pairs: &[(&str, &str)]) -> Vec<String> {
    pairs
        .iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(label, _)| label.to_string())
        .collect()
}
