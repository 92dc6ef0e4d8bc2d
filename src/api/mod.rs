//! Typed endpoints of the compliance API.
//!
//! Every call goes through [`Api::checked`], which wipes the stored
//! credentials when the server answers 401.

pub mod client;

use crate::core::session::Session;
use crate::errors::{AppError, AppResult};
use crate::models::resource::Resource;
use crate::models::user::{Admin, NewUser, User};
use crate::models::verification::VERIFIED;
use crate::models::warehouse::Warehouse;
use chrono::{DateTime, SecondsFormat, Utc};
use client::{ApiClient, extract_records};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

pub use client::server_message;

const LOCKED_MARKER: &str = "cannot edit a verified record";

fn decode_list<T: DeserializeOwned>(body: Value) -> AppResult<Vec<T>> {
    extract_records(body)
        .into_iter()
        .map(|v| serde_json::from_value(v).map_err(AppError::from))
        .collect()
}

fn decode_field<T: DeserializeOwned>(body: &Value, key: &str) -> AppResult<T> {
    let v = body.get(key).cloned().unwrap_or(Value::Null);
    Ok(serde_json::from_value(v)?)
}

fn token_from(body: &Value) -> AppResult<String> {
    body.get("token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::Other("login response carried no token".into()))
}

/// Body sent to `PUT /api/<resource>/verify/:id`.
pub fn verify_body(admin: &Admin, at: DateTime<Utc>) -> Value {
    json!({
        "adminEmail": admin.email,
        "verifiedBy": admin.display_name(),
        "verified": true,
        "verificationDate": at.to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

pub struct Api<'s> {
    client: ApiClient,
    session: &'s Session<'s>,
}

impl<'s> Api<'s> {
    /// Client authenticated with whatever token the session holds.
    pub fn new(base_url: &str, session: &'s Session<'s>) -> AppResult<Self> {
        let client = ApiClient::new(base_url, session.token_for_request()?)?;
        Ok(Self { client, session })
    }

    fn checked<T>(&self, result: AppResult<T>) -> AppResult<T> {
        if let Err(AppError::Unauthorized) = &result {
            self.session.clear_all()?;
        }
        result
    }

    fn get(&self, path: &str, what: &str) -> AppResult<Value> {
        self.checked(self.client.get(path, what))
    }

    fn post(&self, path: &str, body: &Value, what: &str) -> AppResult<Value> {
        self.checked(self.client.post(path, body, what))
    }

    fn put(&self, path: &str, body: &Value, what: &str) -> AppResult<Value> {
        self.checked(self.client.put(path, body, what))
    }

    fn patch(&self, path: &str, body: &Value, what: &str) -> AppResult<Value> {
        self.checked(self.client.patch(path, body, what))
    }

    fn delete(&self, path: &str, what: &str) -> AppResult<Value> {
        self.checked(self.client.delete(path, what))
    }

    // ---------------------------
    // Auth
    // ---------------------------

    pub fn login(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        let body = self.post(
            "/api/auth/login",
            &json!({ "email": email, "password": password }),
            "Login",
        )?;
        Ok((token_from(&body)?, decode_field(&body, "user")?))
    }

    pub fn admin_login(&self, email: &str, password: &str) -> AppResult<(String, Admin)> {
        let body = self.post(
            "/api/admin/login",
            &json!({ "email": email, "password": password }),
            "Admin login",
        )?;
        Ok((token_from(&body)?, decode_field(&body, "admin")?))
    }

    pub fn request_access(&self, name: &str, email: &str, warehouse_id: &str) -> AppResult<String> {
        let body = self.post(
            "/api/admin/request-user",
            &json!({ "name": name, "email": email, "warehouseId": warehouse_id }),
            "Access request",
        )?;
        Ok(server_message(&body).unwrap_or_else(|| "Request sent to admin".to_string()))
    }

    // ---------------------------
    // Records
    // ---------------------------

    pub fn list_my<T: DeserializeOwned>(&self, resource: Resource) -> AppResult<Vec<T>> {
        let what = format!("Fetching your {resource} records");
        decode_list(self.get(&resource.my_path(), &what)?)
    }

    pub fn list_all<T: DeserializeOwned>(&self, resource: Resource) -> AppResult<Vec<T>> {
        let what = format!("Fetching {resource} records");
        decode_list(self.get(resource.path(), &what)?)
    }

    pub fn create<T: Serialize>(&self, resource: Resource, record: &T) -> AppResult<Value> {
        let what = format!("Saving {resource} record");
        self.post(resource.path(), &serde_json::to_value(record)?, &what)
    }

    /// Replace a record. A record already verified by the DO is refused by
    /// the server and reported as [`AppError::VerifiedRecordLocked`].
    pub fn update(&self, resource: Resource, id: &str, record: &Value) -> AppResult<Value> {
        let what = format!("Updating {resource} record");
        match self.put(&resource.item_path(id), record, &what) {
            Err(AppError::Api { message, .. }) if message.to_lowercase().contains(LOCKED_MARKER) => {
                Err(AppError::VerifiedRecordLocked(id.to_string()))
            }
            other => other,
        }
    }

    pub fn delete_record(&self, resource: Resource, id: &str) -> AppResult<Value> {
        let what = format!("Deleting {resource} record");
        self.delete(&resource.item_path(id), &what)
    }

    /// Mark a record verified. Quarterly spot checks retry a refused PUT once
    /// as PATCH with an explicit `status`.
    pub fn verify(&self, resource: Resource, id: &str, admin: &Admin, at: DateTime<Utc>) -> AppResult<Value> {
        let what = format!("Verifying {resource} record");
        let body = verify_body(admin, at);
        let path = resource.verify_path(id);

        match self.put(&path, &body, &what) {
            Err(AppError::Api { .. }) | Err(AppError::Http(_)) if resource.verify_patch_fallback() => {
                let mut patched = body;
                if let Value::Object(map) = &mut patched {
                    map.insert("status".into(), Value::from(VERIFIED));
                }
                self.patch(&path, &patched, &what)
            }
            other => other,
        }
    }

    // ---------------------------
    // Warehouses
    // ---------------------------

    pub fn warehouses(&self) -> AppResult<Vec<Warehouse>> {
        decode_list(self.get("/api/warehouses", "Fetching warehouses")?)
    }

    pub fn create_warehouse(&self, wh: &Warehouse) -> AppResult<Value> {
        self.post("/api/warehouses", &serde_json::to_value(wh)?, "Creating warehouse")
    }

    pub fn update_warehouse(&self, id: &str, wh: &Value) -> AppResult<Value> {
        self.put(&format!("/api/warehouses/{id}"), wh, "Updating warehouse")
    }

    pub fn delete_warehouse(&self, id: &str) -> AppResult<Value> {
        self.delete(&format!("/api/warehouses/{id}"), "Deleting warehouse")
    }

    // ---------------------------
    // Users
    // ---------------------------

    pub fn users(&self) -> AppResult<Vec<User>> {
        let body = self.get("/api/users", "Fetching users")?;
        // some deployments answer {"users": [...]}
        match body.get("users") {
            Some(Value::Array(items)) => items
                .iter()
                .cloned()
                .map(|v| serde_json::from_value(v).map_err(AppError::from))
                .collect(),
            _ => decode_list(body),
        }
    }

    pub fn add_user(&self, user: &NewUser) -> AppResult<Value> {
        self.post("/api/users/add", &serde_json::to_value(user)?, "Adding user")
    }

    pub fn assign_warehouses(&self, user_id: &str, warehouse_ids: &[String]) -> AppResult<Value> {
        self.post(
            "/api/users/assign-warehouses",
            &json!({ "userId": user_id, "warehouseIds": warehouse_ids }),
            "Assigning warehouses",
        )
    }

    pub fn set_user_status(&self, user_id: &str, status: &str) -> AppResult<Value> {
        self.put(
            &format!("/api/users/{user_id}/status"),
            &json!({ "status": status }),
            "Updating user status",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_body_uses_name_or_email() {
        let at = DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let admin = Admin {
            email: "do@example.com".into(),
            ..Default::default()
        };
        let body = verify_body(&admin, at);
        assert_eq!(body["verifiedBy"], "do@example.com");
        assert_eq!(body["verified"], true);
        assert_eq!(body["verificationDate"], "2024-05-01T10:00:00.000Z");

        let named = Admin {
            name: "Sara".into(),
            ..admin
        };
        assert_eq!(verify_body(&named, at)["verifiedBy"], "Sara");
    }

    #[test]
    fn list_decoding_tolerates_envelopes() {
        let whs: Vec<Warehouse> =
            decode_list(json!({"data": [{"_id": "w1", "name": "North", "capacity": 500}]})).unwrap();
        assert_eq!(whs[0].capacity, "500");
    }
}
