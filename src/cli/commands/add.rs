use crate::api::Api;
use crate::cli::commands::guarded;
use crate::cli::parser::{AddCommand, Commands};
use crate::config::Config;
use crate::core::calculator::staleness::Cadence;
use crate::core::session::{Area, Session};
use crate::db::log::ttlog_soft;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::empty_bag::{EmptyBagRecord, match_product};
use crate::models::record::Record;
use crate::models::resource::Resource;
use crate::models::safety_talk::SafetyTalkRecord;
use crate::models::spot_check::SpotCheckRecord;
use crate::models::stationary::PreNumberStationaryRecord;
use crate::models::trucker_talk::TruckerTalkRecord;
use crate::models::verification::DO_NOT_VERIFIED;
use crate::ui::messages::success;
use crate::utils::date::{parse_date, today_str};
use crate::utils::number::parse_leading_float;
use crate::utils::time::normalize_time;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Validated `YYYY-MM-DD`, defaulting to today.
fn date_or_today(date: &Option<String>) -> AppResult<String> {
    match date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        None => Ok(today_str()),
        Some(d) => parse_date(d)
            .map(|nd| nd.format("%Y-%m-%d").to_string())
            .ok_or_else(|| AppError::InvalidDate(d.to_string())),
    }
}

/// Validated optional date; empty stays empty so the required-field check reports it.
fn opt_date(date: &Option<String>) -> AppResult<String> {
    match date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        None => Ok(String::new()),
        Some(d) => parse_date(d)
            .map(|nd| nd.format("%Y-%m-%d").to_string())
            .ok_or_else(|| AppError::InvalidDate(d.to_string())),
    }
}

fn opt_time(time: &Option<String>) -> AppResult<String> {
    match time.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        None => Ok(String::new()),
        Some(t) => normalize_time(t),
    }
}

fn text(v: &Option<String>) -> String {
    v.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn quantity(label: &str, raw: &str) -> AppResult<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::Validation(vec![label.to_string()]));
    }
    parse_leading_float(raw)
        .map(|_| raw.to_string())
        .ok_or_else(|| AppError::InvalidNumber(format!("{label}: {raw}")))
}

fn signed_in_name(session: &Session<'_>) -> AppResult<String> {
    Ok(session.user()?.map(|u| u.name).unwrap_or_default())
}

/// Recompute derived fields, validate and POST one record.
fn submit<T: Record>(
    api: &Api<'_>,
    session: &Session<'_>,
    resource: Resource,
    mut record: T,
    baseline: i64,
) -> AppResult<T> {
    record.recompute(baseline);

    let missing = record.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::Validation(missing));
    }

    let resp = api.create(resource, &record)?;
    let id = resp
        .get("_id")
        .or_else(|| resp.get("record").and_then(|r| r.get("_id")))
        .or_else(|| resp.get("data").and_then(|r| r.get("_id")))
        .and_then(Value::as_str)
        .unwrap_or("");

    ttlog_soft(
        session.conn(),
        "add",
        &format!("{}/{}", resource.path(), id),
        &format!("Added {resource} record"),
    );
    Ok(record)
}

pub fn load_spot_check_form(path: &Path) -> AppResult<SpotCheckRecord> {
    let content = fs::read_to_string(path)?;
    // YAML also accepts JSON forms
    Ok(serde_yaml::from_str(&content)?)
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Add { record } = cmd else {
        return Ok(());
    };
    let baseline = cfg.baseline_minutes()?;

    guarded(cfg, Area::User, |api, session| {
        match record {
            AddCommand::Attendance {
                date,
                time_in,
                time_out,
                diversion,
                handling,
                signature,
            } => {
                let rec = AttendanceRecord {
                    date: date_or_today(date)?,
                    time_in: normalize_time(time_in)?,
                    time_out: normalize_time(time_out)?,
                    direct_diversion: diversion.trim().to_string(),
                    total_handling: handling.trim().to_string(),
                    whi_signature: match signature {
                        Some(s) => s.trim().to_string(),
                        None => signed_in_name(session)?,
                    },
                    ..Default::default()
                };
                let saved = submit(api, session, Resource::Attendance, rec, baseline)?;
                let extra = if saved.extra_time.is_empty() { "--" } else { saved.extra_time.as_str() };
                success(format!(
                    "Attendance for {} saved ({} → {}, extra {})",
                    saved.date, saved.time_in, saved.time_out, extra
                ));
            }

            AddCommand::SafetyTalk {
                date,
                time,
                conducted_by,
                labours,
                hc_present,
                topic,
                remarks,
            } => {
                let rec = SafetyTalkRecord {
                    date: date_or_today(date)?,
                    time: opt_time(time)?,
                    conducted_by: text(conducted_by),
                    no_of_labours: text(labours),
                    hc_present: hc_present.clone().unwrap_or_else(|| "No".to_string()),
                    topic: text(topic),
                    remarks: remarks.trim().to_string(),
                    ..Default::default()
                };
                let saved = submit(api, session, Resource::SafetyTalk, rec, baseline)?;
                success(format!("Safety talk on {} saved", saved.date));
            }

            AddCommand::TruckerTalk {
                date,
                time,
                conducted_by,
                truck_no,
                driver,
                topic,
                remarks,
            } => {
                let rec = TruckerTalkRecord {
                    date: date_or_today(date)?,
                    time: opt_time(time)?,
                    conducted_by: text(conducted_by),
                    truck_no: text(truck_no),
                    driver_name: text(driver),
                    topic: text(topic),
                    remarks: remarks.trim().to_string(),
                    ..Default::default()
                };
                let saved = submit(api, session, Resource::TruckerTalk, rec, baseline)?;
                success(format!("Trucker safety talk on {} saved", saved.date));
            }

            AddCommand::EmptyBag {
                date,
                product,
                opening,
                receipt,
                issued,
                purpose,
                per_ref,
                initial,
            } => {
                let product = match_product(product)
                    .ok_or_else(|| AppError::UnknownProduct(product.clone()))?;
                let rec = EmptyBagRecord {
                    date: date_or_today(date)?,
                    product: product.to_string(),
                    opening_balance: quantity("Opening Balance", opening)?,
                    receipt_qty: quantity("Receipt Qty", receipt)?,
                    issued_qty: quantity("Issued Qty", issued)?,
                    issuence_purpose: text(purpose),
                    per_ref: text(per_ref),
                    whi_initial: match initial {
                        Some(s) => s.trim().to_string(),
                        None => signed_in_name(session)?,
                    },
                    do_verified: DO_NOT_VERIFIED.to_string(),
                    ..Default::default()
                };
                let saved = submit(api, session, Resource::EmptyBag, rec, baseline)?;
                success(format!(
                    "Empty bag record for {} saved (balance {})",
                    saved.product, saved.balance_qty
                ));
            }

            AddCommand::Stationary {
                book_no,
                receipt_date,
                from,
                to,
                start_date,
                end_date,
                purpose,
                initial,
            } => {
                let rec = PreNumberStationaryRecord {
                    book_no: text(book_no),
                    receipt_date: opt_date(receipt_date)?,
                    from: text(from),
                    to: text(to),
                    start_date: opt_date(start_date)?,
                    end_date: opt_date(end_date)?,
                    purpose: text(purpose),
                    whi_initial: match initial {
                        Some(s) => s.trim().to_string(),
                        None => signed_in_name(session)?,
                    },
                    do_verified: DO_NOT_VERIFIED.to_string(),
                    ..Default::default()
                };
                let saved = submit(api, session, Resource::Stationary, rec, baseline)?;
                success(format!(
                    "Stationary book {} ({}–{}) saved",
                    saved.book_no, saved.from, saved.to
                ));
            }

            AddCommand::SpotCheck { kind, file } => {
                let mut rec = load_spot_check_form(file)?;
                if rec.date.trim().is_empty() {
                    rec.date = today_str();
                } else {
                    rec.date = opt_date(&Some(rec.date.clone()))?;
                }
                if rec.warehouse_incharge.trim().is_empty() {
                    rec.warehouse_incharge = signed_in_name(session)?;
                }
                if rec.verified_by.trim().is_empty() {
                    rec.verified_by = DO_NOT_VERIFIED.to_string();
                }
                let resource = match kind {
                    Cadence::Weekly => Resource::SpotCheck,
                    Cadence::Quarterly => Resource::QuarterlySpotCheck,
                };
                let saved = submit(api, session, resource, rec, baseline)?;
                success(format!("{} spot check for {} saved", kind, saved.date));
            }
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_are_validated() {
        assert_eq!(date_or_today(&Some("2024-01-05".into())).unwrap(), "2024-01-05");
        assert_eq!(date_or_today(&None).unwrap(), today_str());
        assert!(matches!(
            date_or_today(&Some("05/01/2024".into())),
            Err(AppError::InvalidDate(_))
        ));
        assert_eq!(opt_date(&Some(" ".into())).unwrap(), "");
    }

    #[test]
    fn quantities_must_be_present_and_numeric() {
        assert_eq!(quantity("Opening Balance", " 100 ").unwrap(), "100");
        assert_eq!(quantity("Issued Qty", "-5").unwrap(), "-5");
        assert!(matches!(quantity("Receipt Qty", ""), Err(AppError::Validation(_))));
        assert!(matches!(quantity("Receipt Qty", "abc"), Err(AppError::InvalidNumber(_))));
    }

    #[test]
    fn spot_check_form_accepts_json() {
        let path = std::env::temp_dir().join("whops_add_form_test.json");
        fs::write(&path, r#"{"date": "2024-05-01", "medicine": "Available"}"#).unwrap();
        let rec = load_spot_check_form(&path).unwrap();
        assert_eq!(rec.medicine, "Available");
        let _ = fs::remove_file(&path);
    }
}
