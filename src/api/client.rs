//! Thin blocking JSON client for the compliance REST API.

use crate::errors::{AppError, AppResult};
use reqwest::Method;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;

pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

/// Pull the server's explanation out of an error body, if it sent one.
pub fn server_message(body: &Value) -> Option<String> {
    ["message", "msg", "error"]
        .iter()
        .filter_map(|k| body.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Unwrap a list response from whichever envelope the server used.
pub fn extract_records(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            for key in ["records", "data", "attendances"] {
                if let Some(Value::Array(items)) = map.remove(key) {
                    return items;
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> AppResult<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn headers(&self) -> AppResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| AppError::Other(format!("invalid auth header: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// One request/response round-trip. `what` names the operation in the
    /// fallback error message when the server gives none.
    pub fn send(&self, method: Method, path: &str, body: Option<&Value>, what: &str) -> AppResult<Value> {
        let mut req = self.http.request(method, self.url(path)).headers(self.headers()?);
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send()?;
        let status = resp.status();
        let text = resp.text()?;
        let parsed: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::Unauthorized);
        }
        if !status.is_success() {
            let message = server_message(&parsed)
                .unwrap_or_else(|| format!("{what} failed (HTTP {})", status.as_u16()));
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(parsed)
    }

    pub fn get(&self, path: &str, what: &str) -> AppResult<Value> {
        self.send(Method::GET, path, None, what)
    }

    pub fn post(&self, path: &str, body: &Value, what: &str) -> AppResult<Value> {
        self.send(Method::POST, path, Some(body), what)
    }

    pub fn put(&self, path: &str, body: &Value, what: &str) -> AppResult<Value> {
        self.send(Method::PUT, path, Some(body), what)
    }

    pub fn patch(&self, path: &str, body: &Value, what: &str) -> AppResult<Value> {
        self.send(Method::PATCH, path, Some(body), what)
    }

    pub fn delete(&self, path: &str, what: &str) -> AppResult<Value> {
        self.send(Method::DELETE, path, None, what)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelopes_are_unwrapped_in_order() {
        assert_eq!(extract_records(json!([1, 2])).len(), 2);
        assert_eq!(extract_records(json!({"records": [1]})), vec![json!(1)]);
        assert_eq!(extract_records(json!({"data": [1, 2, 3]})).len(), 3);
        assert_eq!(
            extract_records(json!({"attendances": [{"date": "2024-01-01"}], "total": 1})).len(),
            1
        );
        // a non-array "data" falls through to the next envelope
        assert_eq!(extract_records(json!({"data": {"x": 1}, "attendances": [1]})).len(), 1);
        assert!(extract_records(json!({"message": "ok"})).is_empty());
        assert!(extract_records(Value::Null).is_empty());
    }

    #[test]
    fn server_message_prefers_message_then_msg() {
        assert_eq!(
            server_message(&json!({"message": "Cannot edit a verified record", "msg": "x"})).as_deref(),
            Some("Cannot edit a verified record")
        );
        assert_eq!(server_message(&json!({"msg": "Invalid credentials"})).as_deref(), Some("Invalid credentials"));
        assert_eq!(server_message(&json!({"message": ""})), None);
        assert_eq!(server_message(&json!("plain")), None);
    }

    #[test]
    fn urls_join_cleanly() {
        let c = ApiClient::new("http://localhost:5000/", Some("t".into())).unwrap();
        assert_eq!(c.url("/api/users"), "http://localhost:5000/api/users");
        assert_eq!(c.url("api/users"), "http://localhost:5000/api/users");
        let h = c.headers().unwrap();
        assert_eq!(h.get(AUTHORIZATION).unwrap(), "Bearer t");
    }
}
