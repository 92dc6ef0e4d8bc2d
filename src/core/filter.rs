//! Client-side filtering and sorting of fetched record lists.
//!
//! Records are inspected through their JSON form so the same predicates work
//! for every record kind. A missing or null field fails the predicate that
//! reads it and never raises an error.

use crate::errors::{AppError, AppResult};
use crate::models::record::Record;
use crate::utils::date::{iso_day, iso_month};
use serde_json::Value;
use std::cmp::Ordering;

/// Case-insensitive substring match on one field (`field~needle`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub field: String,
    pub needle: String,
}

impl FieldMatch {
    /// Parse `field~needle`. Dotted fields reach into nested objects
    /// (`stitchingMachine.condition~good`).
    pub fn parse(raw: &str) -> AppResult<Self> {
        match raw.split_once('~') {
            Some((field, needle)) if !field.trim().is_empty() => Ok(Self {
                field: field.trim().to_string(),
                needle: needle.to_string(),
            }),
            _ => Err(AppError::InvalidFilter(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub descending: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Exact day, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// `YYYY-MM`, or a bare month number `1..=12`.
    pub month: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub fields: Vec<FieldMatch>,
    pub search: Option<String>,
    pub sort: Option<SortSpec>,
}

fn active(opt: &Option<String>) -> Option<&str> {
    opt.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Look up `key` in a JSON object; dots separate nested keys.
fn lookup<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    key.split('.')
        .try_fold(value, |cur, part| cur.get(part))
        .filter(|v| !v.is_null())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn any_scalar_contains(value: &Value, needle_lower: &str) -> bool {
    match value {
        Value::Object(map) => map.values().any(|v| any_scalar_contains(v, needle_lower)),
        Value::Array(items) => items.iter().any(|v| any_scalar_contains(v, needle_lower)),
        other => scalar_text(other).is_some_and(|s| contains_ci(&s, needle_lower)),
    }
}

fn month_matches(date: &str, month: &str) -> bool {
    if let Ok(n) = month.parse::<u32>()
        && (1..=12).contains(&n)
    {
        return date
            .get(5..7)
            .and_then(|m| m.parse::<u32>().ok())
            .is_some_and(|m| m == n);
    }
    iso_month(date).is_some_and(|m| m == month)
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        _ => {
            let x = scalar_text(a).unwrap_or_default().to_lowercase();
            let y = scalar_text(b).unwrap_or_default().to_lowercase();
            x.cmp(&y)
        }
    }
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        active(&self.date).is_none()
            && active(&self.month).is_none()
            && active(&self.date_from).is_none()
            && active(&self.date_to).is_none()
            && self.fields.iter().all(|f| f.needle.trim().is_empty())
            && active(&self.search).is_none()
            && self.sort.is_none()
    }

    /// Whether one record (as JSON) passes every active predicate.
    pub fn matches(&self, value: &Value, date_field: &str) -> bool {
        let day = lookup(value, date_field)
            .and_then(Value::as_str)
            .and_then(iso_day);

        if let Some(want) = active(&self.date)
            && day != Some(want)
        {
            return false;
        }

        if let Some(month) = active(&self.month) {
            let raw = lookup(value, date_field).and_then(Value::as_str);
            if !raw.is_some_and(|d| month_matches(d, month)) {
                return false;
            }
        }

        if let Some(from) = active(&self.date_from)
            && !day.is_some_and(|d| d >= from)
        {
            return false;
        }

        if let Some(to) = active(&self.date_to)
            && !day.is_some_and(|d| d <= to)
        {
            return false;
        }

        for fm in &self.fields {
            let needle = fm.needle.trim().to_lowercase();
            if needle.is_empty() {
                continue;
            }
            let hit = lookup(value, &fm.field)
                .and_then(scalar_text)
                .is_some_and(|s| contains_ci(&s, &needle));
            if !hit {
                return false;
            }
        }

        if let Some(search) = active(&self.search)
            && !any_scalar_contains(value, &search.to_lowercase())
        {
            return false;
        }

        true
    }

    /// Positions of the records that pass, in output order. The sort is
    /// stable, so ties keep their fetched order.
    pub fn order(&self, values: &[Value], date_field: &str) -> Vec<usize> {
        let mut kept: Vec<usize> = (0..values.len())
            .filter(|&i| self.matches(&values[i], date_field))
            .collect();

        if let Some(spec) = &self.sort {
            kept.sort_by(|&a, &b| {
                match (sort_key(&values[a], &spec.key), sort_key(&values[b], &spec.key)) {
                    (Some(x), Some(y)) => {
                        let ord = compare_values(x, y);
                        if spec.descending { ord.reverse() } else { ord }
                    }
                    // missing values go last in either direction
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            });
        }
        kept
    }

    pub fn apply_values(&self, values: Vec<Value>, date_field: &str) -> Vec<Value> {
        let order = self.order(&values, date_field);
        let mut slots: Vec<Option<Value>> = values.into_iter().map(Some).collect();
        order.into_iter().filter_map(|i| slots[i].take()).collect()
    }

    /// Filter and sort typed records using their declared date field.
    /// A record that cannot be serialized is dropped.
    pub fn apply<T: Record>(&self, records: &[T]) -> Vec<T> {
        let values: Vec<Value> = records
            .iter()
            .map(|r| serde_json::to_value(r).unwrap_or(Value::Null))
            .collect();

        self.order(&values, T::DATE_FIELD)
            .into_iter()
            .filter(|&i| !values[i].is_null())
            .map(|i| records[i].clone())
            .collect()
    }
}

/// Sort key; empty strings count as missing.
fn sort_key<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    lookup(value, key).filter(|v| !matches!(v, Value::String(s) if s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::AttendanceRecord;
    use crate::models::stationary::PreNumberStationaryRecord;
    use serde_json::json;

    fn att(id: &str, date: &str, sig: &str) -> AttendanceRecord {
        AttendanceRecord {
            id: Some(id.into()),
            date: date.into(),
            whi_signature: sig.into(),
            ..Default::default()
        }
    }

    fn ids(v: &[AttendanceRecord]) -> Vec<&str> {
        v.iter().filter_map(|r| r.id.as_deref()).collect()
    }

    #[test]
    fn month_prefix_keeps_order() {
        let recs = vec![
            att("a", "2024-01-01", ""),
            att("b", "2024-01-05", ""),
            att("c", "2024-02-01", ""),
        ];
        let f = RecordFilter {
            month: Some("2024-01".into()),
            ..Default::default()
        };
        assert_eq!(ids(&f.apply(&recs)), vec!["a", "b"]);
    }

    #[test]
    fn bare_month_number_matches_any_year() {
        let recs = vec![
            att("a", "2023-03-10T00:00:00.000Z", ""),
            att("b", "2024-04-01", ""),
            att("c", "2024-03-02", ""),
        ];
        let f = RecordFilter {
            month: Some("3".into()),
            ..Default::default()
        };
        assert_eq!(ids(&f.apply(&recs)), vec!["a", "c"]);
    }

    #[test]
    fn predicates_are_conjunctive_and_null_safe() {
        let recs = vec![
            att("a", "2024-01-01", "Ali Khan"),
            att("b", "2024-01-05", "Sara"),
            att("c", "", "Ali"),
        ];
        let f = RecordFilter {
            date_from: Some("2024-01-01".into()),
            date_to: Some("2024-01-31".into()),
            fields: vec![FieldMatch::parse("whiSignature~ali").unwrap()],
            ..Default::default()
        };
        assert_eq!(ids(&f.apply(&recs)), vec!["a"]);

        let exact = RecordFilter {
            date: Some("2024-01-05".into()),
            ..Default::default()
        };
        assert_eq!(ids(&exact.apply(&recs)), vec!["b"]);
    }

    #[test]
    fn empty_predicates_are_skipped() {
        let recs = vec![att("a", "2024-01-01", ""), att("b", "", "")];
        let f = RecordFilter {
            date: Some("  ".into()),
            search: Some(String::new()),
            fields: vec![FieldMatch {
                field: "whiSignature".into(),
                needle: "".into(),
            }],
            ..Default::default()
        };
        assert!(f.is_empty());
        assert_eq!(f.apply(&recs).len(), 2);
    }

    #[test]
    fn sort_descending_with_missing_last() {
        let recs = vec![
            att("a", "2024-01-01", ""),
            att("b", "", ""),
            att("c", "2024-03-01", ""),
        ];
        let mut f = RecordFilter {
            sort: Some(SortSpec {
                key: "date".into(),
                descending: true,
            }),
            ..Default::default()
        };
        let values = vec![
            json!({"id": "a", "date": "2024-01-01"}),
            json!({"id": "b"}),
            json!({"id": "c", "date": "2024-03-01"}),
        ];
        let out = f.apply_values(values, "date");
        let order: Vec<&str> = out.iter().map(|v| v["id"].as_str().unwrap()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);

        f.sort = Some(SortSpec {
            key: "date".into(),
            descending: false,
        });
        assert_eq!(ids(&f.apply(&recs)), vec!["a", "c", "b"]);
    }

    #[test]
    fn free_text_search_reaches_nested_values() {
        let values = vec![
            json!({"date": "2024-01-01", "stitchingMachine": {"condition": "Repairing"}}),
            json!({"date": "2024-01-02", "stitchingMachine": {"condition": "Good"}, "qty": 15}),
        ];
        let f = RecordFilter {
            search: Some("repair".into()),
            ..Default::default()
        };
        assert_eq!(f.apply_values(values.clone(), "date").len(), 1);

        let f = RecordFilter {
            fields: vec![FieldMatch::parse("stitchingMachine.condition~GOOD").unwrap()],
            ..Default::default()
        };
        assert_eq!(f.apply_values(values.clone(), "date")[0]["qty"], 15);

        let f = RecordFilter {
            search: Some("15".into()),
            ..Default::default()
        };
        assert_eq!(f.apply_values(values, "date").len(), 1);
    }

    #[test]
    fn stationary_filters_on_receipt_date() {
        let recs = vec![
            PreNumberStationaryRecord {
                id: Some("s1".into()),
                receipt_date: "2024-05-02".into(),
                ..Default::default()
            },
            PreNumberStationaryRecord {
                id: Some("s2".into()),
                receipt_date: "2024-06-02".into(),
                ..Default::default()
            },
        ];
        let f = RecordFilter {
            month: Some("2024-06".into()),
            ..Default::default()
        };
        let out = f.apply(&recs);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id.as_deref(), Some("s2"));
    }

    #[test]
    fn where_clause_needs_a_field() {
        assert!(FieldMatch::parse("~x").is_err());
        assert!(FieldMatch::parse("topic").is_err());
        assert_eq!(FieldMatch::parse("topic~fire").unwrap().needle, "fire");
    }
}
