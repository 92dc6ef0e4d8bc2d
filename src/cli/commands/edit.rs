use crate::api::Api;
use crate::cli::commands::{guarded, parse_assignments};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::{Area, Session};
use crate::db::log::ttlog_soft;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::empty_bag::EmptyBagRecord;
use crate::models::record::Record;
use crate::models::resource::Resource;
use crate::models::safety_talk::SafetyTalkRecord;
use crate::models::spot_check::SpotCheckRecord;
use crate::models::stationary::PreNumberStationaryRecord;
use crate::models::trucker_talk::TruckerTalkRecord;
use crate::ui::messages::success;
use crate::utils::date::parse_date;
use crate::utils::time::normalize_time;
use serde_json::{Map, Value};

const DATE_FIELDS: &[&str] = &["date", "receiptDate", "startDate", "endDate"];
const TIME_FIELDS: &[&str] = &["time", "timeIn", "timeOut"];

/// Normalize overrides of well-known date and time fields.
fn validate_overrides(overrides: &mut Map<String, Value>) -> AppResult<()> {
    for (key, value) in overrides.iter_mut() {
        let Some(raw) = value.as_str().map(str::trim) else {
            continue;
        };
        if raw.is_empty() {
            continue;
        }
        if DATE_FIELDS.contains(&key.as_str()) {
            let d = parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.to_string()))?;
            *value = Value::String(d.format("%Y-%m-%d").to_string());
        } else if TIME_FIELDS.contains(&key.as_str()) {
            *value = Value::String(normalize_time(raw)?);
        }
    }
    Ok(())
}

/// Apply overrides onto a record; dotted keys write into nested objects,
/// creating them when missing.
pub(crate) fn merge_overrides(mut record: Value, overrides: &Map<String, Value>) -> Value {
    for (key, value) in overrides {
        let mut cur = &mut record;
        let mut parts = key.split('.').peekable();
        while let Some(part) = parts.next() {
            if !cur.is_object() {
                *cur = Value::Object(Map::new());
            }
            let Value::Object(map) = cur else {
                break;
            };
            if parts.peek().is_none() {
                map.insert(part.to_string(), value.clone());
                break;
            }
            cur = map.entry(part.to_string()).or_insert_with(|| Value::Object(Map::new()));
        }
    }
    record
}

fn edit_as<T: Record>(
    api: &Api<'_>,
    session: &Session<'_>,
    resource: Resource,
    id: &str,
    overrides: &Map<String, Value>,
    baseline: i64,
) -> AppResult<T> {
    let mine: Vec<Value> = api.list_my(resource)?;
    let current = mine
        .into_iter()
        .find(|v| v.get("_id").and_then(Value::as_str) == Some(id))
        .ok_or_else(|| AppError::RecordNotFound(id.to_string()))?;

    let before: T = serde_json::from_value(current.clone())?;
    if before.verification().is_some_and(|v| v.is_verified()) {
        return Err(AppError::VerifiedRecordLocked(id.to_string()));
    }

    let mut record: T = serde_json::from_value(merge_overrides(current, overrides))?;
    if T::DERIVED_INPUTS.iter().any(|k| overrides.contains_key(*k)) {
        record.recompute(baseline);
    }

    let missing = record.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::Validation(missing));
    }

    api.update(resource, id, &serde_json::to_value(&record)?)?;

    let fields: Vec<&str> = overrides.keys().map(String::as_str).collect();
    ttlog_soft(
        session.conn(),
        "edit",
        &format!("{}/{}", resource.path(), id),
        &format!("Updated {}", fields.join(", ")),
    );
    Ok(record)
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Edit { resource, id, set } = cmd else {
        return Ok(());
    };
    let mut overrides = parse_assignments(set)?;
    validate_overrides(&mut overrides)?;
    let baseline = cfg.baseline_minutes()?;
    let resource = *resource;

    guarded(cfg, Area::User, |api, session| {
        match resource {
            Resource::Attendance => {
                let rec: AttendanceRecord = edit_as(api, session, resource, id, &overrides, baseline)?;
                let extra = if rec.extra_time.is_empty() { "--" } else { rec.extra_time.as_str() };
                success(format!("Attendance {} updated (extra {})", id, extra));
            }
            Resource::EmptyBag => {
                let rec: EmptyBagRecord = edit_as(api, session, resource, id, &overrides, baseline)?;
                success(format!("Empty bag record {} updated (balance {})", id, rec.balance_qty));
            }
            Resource::SafetyTalk => {
                edit_as::<SafetyTalkRecord>(api, session, resource, id, &overrides, baseline)?;
                success(format!("Safety talk {id} updated"));
            }
            Resource::TruckerTalk => {
                edit_as::<TruckerTalkRecord>(api, session, resource, id, &overrides, baseline)?;
                success(format!("Trucker safety talk {id} updated"));
            }
            Resource::Stationary => {
                edit_as::<PreNumberStationaryRecord>(api, session, resource, id, &overrides, baseline)?;
                success(format!("Stationary record {id} updated"));
            }
            Resource::SpotCheck | Resource::QuarterlySpotCheck => {
                edit_as::<SpotCheckRecord>(api, session, resource, id, &overrides, baseline)?;
                success(format!("{} {id} updated", resource.label()));
            }
        }
        Ok(())
    })
}
