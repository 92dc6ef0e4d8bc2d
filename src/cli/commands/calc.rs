use crate::cli::commands::dashboard::print_due;
use crate::cli::parser::{CalcCommand, Commands};
use crate::config::Config;
use crate::core::calculator::balance::running_balance;
use crate::core::calculator::extra_time::extra_time_with_baseline;
use crate::core::calculator::staleness::evaluate;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use crate::utils::colors::{RESET, color_for_balance};
use crate::utils::date::parse_api_instant;
use crate::utils::format_quantity;
use chrono::{DateTime, Utc};

/// A plain date is taken at midnight UTC.
fn instant_arg(raw: &Option<String>) -> AppResult<Option<DateTime<Utc>>> {
    match raw.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => parse_api_instant(s)
            .map(Some)
            .ok_or_else(|| AppError::InvalidDate(s.to_string())),
    }
}

/// Offline calculators; no session or network involved.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Calc { calc } = cmd else {
        return Ok(());
    };

    match calc {
        CalcCommand::ExtraTime { time_in, time_out } => {
            let extra = extra_time_with_baseline(time_in, time_out, cfg.baseline_minutes()?);
            if extra.is_empty() {
                warning(format!(
                    "Cannot compute extra time for {} → {} (HH:MM, out after in)",
                    time_in, time_out
                ));
                println!("--");
            } else {
                println!("{extra}");
            }
        }

        CalcCommand::Balance {
            opening,
            receipt,
            issued,
        } => {
            let bal = running_balance(opening, receipt, issued);
            println!("{}{}{}", color_for_balance(bal), format_quantity(bal), RESET);
        }

        CalcCommand::Due { kind, last, today: on } => {
            let now = instant_arg(on)?.unwrap_or_else(Utc::now);
            let status = evaluate(instant_arg(last)?, now, *kind);
            print_due(&status);
        }
    }

    Ok(())
}
