use crate::models::lenient;
use crate::models::record::require;
use crate::utils::table::Column;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Warehouse {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(deserialize_with = "lenient::string")]
    pub province: String,
    #[serde(deserialize_with = "lenient::string")]
    pub city: String,
    #[serde(deserialize_with = "lenient::string")]
    pub address: String,
    #[serde(deserialize_with = "lenient::string")]
    pub capacity: String,
    #[serde(deserialize_with = "lenient::string")]
    pub contact_person: String,
    #[serde(deserialize_with = "lenient::string")]
    pub contact_phone: String,
}

impl Warehouse {
    pub fn missing_fields(&self) -> Vec<String> {
        require(&[
            ("Name", self.name.as_str()),
            ("Location", self.location.as_str()),
            ("Province", self.province.as_str()),
            ("City", self.city.as_str()),
        ])
    }

    pub fn columns() -> Vec<Column> {
        vec![
            Column::new("ID", 24),
            Column::new("Name", 20),
            Column::new("Location", 18),
            Column::new("City", 14),
            Column::new("Province", 12),
            Column::new("Capacity", 9),
            Column::new("Contact", 18),
            Column::new("Phone", 14),
        ]
    }

    pub fn row(&self) -> Vec<String> {
        vec![
            self.id.clone().unwrap_or_default(),
            self.name.clone(),
            self.location.clone(),
            self.city.clone(),
            self.province.clone(),
            self.capacity.clone(),
            self.contact_person.clone(),
            self.contact_phone.clone(),
        ]
    }
}
