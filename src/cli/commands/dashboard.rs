use crate::cli::commands::guarded;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::staleness::{DueStatus, Severity};
use crate::core::dashboard::{DashboardData, DashboardSummary, SpotCheckOverview, greeting};
use crate::core::session::Area;
use crate::errors::{AppError, AppResult};
use crate::models::resource::Resource;
use crate::ui::messages::{banner, header, warning};
use crate::utils::colors::{
    CYAN, GREEN, GREY, RED, RESET, YELLOW, color_for_balance, color_for_condition,
};
use crate::utils::date::{format_short, today};
use crate::utils::format_quantity;
use crate::utils::time::format_time12;
use chrono::{Local, Timelike, Utc};

const BANNER_WIDTH: usize = 72;

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::High => RED,
        Severity::Medium => YELLOW,
        Severity::Low => GREEN,
        Severity::None => GREY,
    }
}

/// Print one due status as a colored banner.
pub(crate) fn print_due(status: &DueStatus) {
    let title = match status.severity {
        Severity::High => "OVERDUE",
        Severity::Medium => "DUE SOON",
        Severity::Low => "OK",
        Severity::None => "UNKNOWN",
    };
    banner(severity_color(status.severity), title, &status.message, BANNER_WIDTH);
}

/// A failed fetch leaves that panel empty; an expired session aborts.
fn soft<T>(what: &str, result: AppResult<Vec<T>>) -> AppResult<Option<Vec<T>>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(AppError::Unauthorized) => Err(AppError::Unauthorized),
        Err(e) => {
            warning(format!("Could not load {what}: {e}"));
            Ok(None)
        }
    }
}

fn condition(label: &str, value: &str) {
    println!("   {:<20} {}{}{}", label, color_for_condition(value), value, RESET);
}

fn print_overview(title: &str, ov: &SpotCheckOverview) {
    println!();
    println!("{CYAN}{title}{RESET}");
    print_due(&ov.alert);
    println!(
        "   {:<20} {} (last {} days) / {} total",
        "Recent checks", ov.recent_count, ov.alert.kind.days(), ov.total
    );

    let eq = &ov.equipment;
    println!("   {:<20} {}", "Last check", format_short(&eq.date));
    condition("Stitching machine", &eq.stitching_machine);
    condition("Weighing scale", &eq.weighing_scale);
    condition("UPS battery", &eq.ups_battery);
    println!("   {:<20} {}", "Fire extinguishers", eq.fire_extinguishers);
    println!("   {:<20} {}/{} good", "Safety ramps", eq.good_ramps, eq.total_ramps);
    println!("   {:<20} {}/{} good", "SRL harnesses", eq.good_harnesses, eq.total_harnesses);
    condition("Medicine", &eq.medicine);
    let verifier = if eq.verified { "Verified" } else { "Not Verified" };
    println!(
        "   {:<20} {}{}{} {}",
        "Verification",
        color_for_condition(verifier),
        verifier,
        RESET,
        if eq.verified { format!("by {}", eq.verified_by) } else { String::new() }
    );
}

fn print_summary(name: &str, s: &DashboardSummary) {
    header(format!(
        "{}, {} · {}",
        greeting(Local::now().hour()),
        if name.is_empty() { "there" } else { name },
        s.date.format("%A, %b %-d, %Y")
    ));

    match &s.attendance_today {
        Some(a) => {
            let extra = if a.extra_time.is_empty() { "--" } else { a.extra_time.as_str() };
            println!(
                "   {:<20} {GREEN}Present{RESET}  in {}  out {}  extra {}",
                "Attendance",
                format_time12(&a.time_in),
                format_time12(&a.time_out),
                extra
            );
        }
        None => println!("   {:<20} {RED}Absent{RESET}", "Attendance"),
    }
    println!("   {:<20} {}", "Safety talks", s.safety_talks_today);
    println!(
        "   {:<20} {} (total balance {}{}{})",
        "Empty bag entries",
        s.empty_bags_today,
        color_for_balance(s.total_balance_today),
        format_quantity(s.total_balance_today),
        RESET
    );
    println!("   {:<20} {}", "Stationary started", s.stationary_started_today);

    print_overview("Weekly spot check", &s.weekly);
    print_overview("Quarterly spot check", &s.quarterly);
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Dashboard) {
        return Ok(());
    }

    guarded(cfg, Area::User, |api, session| {
        let data = DashboardData {
            attendance: soft("attendance", api.list_my(Resource::Attendance))?,
            safety_talks: soft("safety talks", api.list_my(Resource::SafetyTalk))?,
            empty_bags: soft("empty bags", api.list_my(Resource::EmptyBag))?,
            stationary: soft("stationary", api.list_my(Resource::Stationary))?,
            weekly: soft("weekly spot checks", api.list_my(Resource::SpotCheck))?,
            quarterly: soft("quarterly spot checks", api.list_my(Resource::QuarterlySpotCheck))?,
        };
        let summary = DashboardSummary::build(&data, today(), Utc::now());
        let name = session.user()?.map(|u| u.name).unwrap_or_default();
        print_summary(&name, &summary);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_not_swallowed() {
        let r: AppResult<Vec<u8>> = Err(AppError::Unauthorized);
        assert!(matches!(soft("x", r), Err(AppError::Unauthorized)));

        let r: AppResult<Vec<u8>> = Err(AppError::Api {
            status: 500,
            message: "boom".into(),
        });
        assert_eq!(soft("x", r).unwrap(), None);
        assert_eq!(soft("x", Ok(vec![1u8])).unwrap(), Some(vec![1]));
    }

    #[test]
    fn colors_follow_severity() {
        assert_eq!(severity_color(Severity::High), RED);
        assert_eq!(severity_color(Severity::None), GREY);
    }
}
