pub mod add;
pub mod admin;
pub mod auth;
pub mod calc;
pub mod config;
pub mod dashboard;
pub mod edit;
pub mod init;
pub mod list;
pub mod log;
pub mod shell;
pub mod template;

use crate::api::Api;
use crate::config::Config;
use crate::core::session::{Area, Session};
use crate::db;
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use serde_json::{Map, Value};
use std::io::{self, Write};

pub(crate) fn idle_minutes(cfg: &Config, area: Area) -> i64 {
    let minutes = match area {
        Area::User => cfg.user_idle_timeout_minutes,
        Area::Admin => cfg.admin_idle_timeout_minutes,
    };
    i64::try_from(minutes).unwrap_or(i64::MAX)
}

/// Open local storage, check the area's session is alive, then run `f`
/// against an authenticated API client.
pub(crate) fn guarded<T, F>(cfg: &Config, area: Area, f: F) -> AppResult<T>
where
    F: FnOnce(&Api<'_>, &Session<'_>) -> AppResult<T>,
{
    let pool = db::open(&cfg.database)?;
    let session = Session::new(&pool.conn);
    session.ensure_active(area, idle_minutes(cfg, area), Utc::now())?;
    let api = Api::new(&cfg.api_base_url, &session)?;
    f(&api, &session)
}

/// Parse `field=value` overrides into a JSON object. Values that read as JSON
/// scalars (numbers, booleans) keep that type; everything else is a string.
pub(crate) fn parse_assignments(pairs: &[String]) -> AppResult<Map<String, Value>> {
    let mut out = Map::new();
    for raw in pairs {
        let Some((field, value)) = raw.split_once('=') else {
            return Err(AppError::InvalidAssignment(raw.clone()));
        };
        let field = field.trim();
        if field.is_empty() {
            return Err(AppError::InvalidAssignment(raw.clone()));
        }
        let parsed = match serde_json::from_str::<Value>(value) {
            Ok(v @ (Value::Number(_) | Value::Bool(_))) => v,
            _ => Value::String(value.to_string()),
        };
        out.insert(field.to_string(), parsed);
    }
    Ok(out)
}

/// Ask a yes/no question on stdin.
pub(crate) fn confirm(question: &str) -> AppResult<bool> {
    print!("{question} [y/N]: ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignments_keep_scalar_types() {
        let m = parse_assignments(&[
            "timeOut=18:15".into(),
            "openingBalance=100".into(),
            "remarks=".into(),
            "verified=true".into(),
        ])
        .unwrap();
        assert_eq!(m["timeOut"], "18:15");
        assert_eq!(m["openingBalance"], 100);
        assert_eq!(m["remarks"], "");
        assert_eq!(m["verified"], true);
    }

    #[test]
    fn assignment_without_equals_is_rejected() {
        assert!(matches!(
            parse_assignments(&["timeOut".into()]),
            Err(AppError::InvalidAssignment(_))
        ));
        assert!(parse_assignments(&["=x".into()]).is_err());
    }
}
