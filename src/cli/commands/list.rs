use crate::api::Api;
use crate::cli::commands::guarded;
use crate::cli::parser::{Commands, FilterArgs};
use crate::config::Config;
use crate::core::filter::{FieldMatch, RecordFilter, SortSpec};
use crate::core::session::Area;
use crate::errors::AppResult;
use crate::models::attendance::AttendanceRecord;
use crate::models::empty_bag::EmptyBagRecord;
use crate::models::record::Record;
use crate::models::resource::Resource;
use crate::models::safety_talk::SafetyTalkRecord;
use crate::models::spot_check::SpotCheckRecord;
use crate::models::stationary::PreNumberStationaryRecord;
use crate::models::trucker_talk::TruckerTalkRecord;
use crate::ui::messages::{header, info};
use crate::utils::table::Table;

/// Translate CLI filter flags into a [`RecordFilter`].
pub(crate) fn filter_from(args: &FilterArgs) -> AppResult<RecordFilter> {
    let fields = args
        .where_
        .iter()
        .map(|w| FieldMatch::parse(w))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(RecordFilter {
        date: args.date.clone(),
        month: args.month.clone(),
        date_from: args.date_from.clone(),
        date_to: args.date_to.clone(),
        fields,
        search: args.search.clone(),
        sort: args.sort.as_ref().map(|key| SortSpec {
            key: key.clone(),
            descending: args.desc,
        }),
    })
}

fn render<T: Record>(records: Vec<T>, filter: &RecordFilter, json: bool, cfg: &Config) -> AppResult<()> {
    let total = records.len();
    let shown = filter.apply(&records);

    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    if shown.is_empty() {
        info(if total == 0 {
            "No records found".to_string()
        } else {
            format!("No records match the filters ({total} fetched)")
        });
        return Ok(());
    }

    let mut table = Table::new(T::columns()).with_separator(&cfg.separator_char);
    for rec in &shown {
        table.add_row(rec.row());
    }
    print!("{}", table.render());
    println!("\n{} of {} records", shown.len(), total);
    Ok(())
}

fn fetch<T: Record>(api: &Api<'_>, resource: Resource, mine: bool) -> AppResult<Vec<T>> {
    if mine {
        api.list_my(resource)
    } else {
        api.list_all(resource)
    }
}

/// Fetch one collection (the user's own, or everyone's) and print it.
pub(crate) fn fetch_and_render(
    api: &Api<'_>,
    resource: Resource,
    mine: bool,
    filter: &RecordFilter,
    json: bool,
    cfg: &Config,
) -> AppResult<()> {
    if !json {
        header(format!("{} records", capitalize(resource.label())));
    }
    match resource {
        Resource::Attendance => render(fetch::<AttendanceRecord>(api, resource, mine)?, filter, json, cfg),
        Resource::SafetyTalk => render(fetch::<SafetyTalkRecord>(api, resource, mine)?, filter, json, cfg),
        Resource::TruckerTalk => render(fetch::<TruckerTalkRecord>(api, resource, mine)?, filter, json, cfg),
        Resource::EmptyBag => render(fetch::<EmptyBagRecord>(api, resource, mine)?, filter, json, cfg),
        Resource::Stationary => {
            render(fetch::<PreNumberStationaryRecord>(api, resource, mine)?, filter, json, cfg)
        }
        Resource::SpotCheck | Resource::QuarterlySpotCheck => {
            render(fetch::<SpotCheckRecord>(api, resource, mine)?, filter, json, cfg)
        }
    }
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        resource,
        filter,
        json,
    } = cmd
    {
        let filter = filter_from(filter)?;
        guarded(cfg, Area::User, |api, _| {
            fetch_and_render(api, *resource, true, &filter, *json, cfg)
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_become_a_filter() {
        let args = FilterArgs {
            month: Some("2024-01".into()),
            where_: vec!["topic~fire".into()],
            sort: Some("date".into()),
            desc: true,
            ..Default::default()
        };
        let f = filter_from(&args).unwrap();
        assert_eq!(f.month.as_deref(), Some("2024-01"));
        assert_eq!(f.fields[0].field, "topic");
        assert_eq!(
            f.sort,
            Some(SortSpec {
                key: "date".into(),
                descending: true
            })
        );

        let bad = FilterArgs {
            where_: vec!["topic".into()],
            ..Default::default()
        };
        assert!(filter_from(&bad).is_err());
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("weekly spot check"), "Weekly spot check");
        assert_eq!(capitalize(""), "");
    }
}
