use crate::models::lenient;
use crate::utils::table::Column;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Role {
    #[serde(rename = "warehouse_manager")]
    #[value(name = "warehouse_manager")]
    WarehouseManager,
    /// Distribution Officer
    #[serde(rename = "DO")]
    #[value(name = "DO")]
    DistributionOfficer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::WarehouseManager => f.write_str("Warehouse Manager"),
            Role::DistributionOfficer => f.write_str("Distribution Officer"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(deserialize_with = "lenient::string")]
    pub role: String,
    #[serde(deserialize_with = "lenient::string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::string")]
    pub city: String,
    #[serde(deserialize_with = "lenient::string")]
    pub province: String,
    #[serde(deserialize_with = "lenient::string")]
    pub address: String,
    #[serde(deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(deserialize_with = "lenient::id_list")]
    pub warehouses: Vec<String>,
    #[serde(deserialize_with = "lenient::opt_id", skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<String>,
}

impl User {
    /// Users without an explicit status are treated as active.
    pub fn is_active(&self) -> bool {
        self.status.is_empty() || self.status.eq_ignore_ascii_case("active")
    }

    /// The status a toggle moves to.
    pub fn toggled_status(&self) -> &'static str {
        if self.is_active() { "inactive" } else { "active" }
    }

    pub fn columns() -> Vec<Column> {
        vec![
            Column::new("ID", 24),
            Column::new("Name", 20),
            Column::new("Email", 28),
            Column::new("Role", 18),
            Column::new("City", 14),
            Column::new("Status", 8),
            Column::new("Warehouses", 30),
        ]
    }

    pub fn row(&self) -> Vec<String> {
        vec![
            self.id.clone().unwrap_or_default(),
            self.name.clone(),
            self.email.clone(),
            self.role.clone(),
            self.city.clone(),
            if self.is_active() { "active".into() } else { "inactive".into() },
            self.warehouses.join(","),
        ]
    }
}

/// Administrator identity returned by `/api/admin/login`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Admin {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
}

impl Admin {
    /// Name shown as verifier; falls back to the email.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.email.as_str()
        } else {
            self.name.as_str()
        }
    }
}

/// Body of `POST /api/users/add`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub phone: String,
    pub city: String,
    pub province: String,
    pub address: String,
}
