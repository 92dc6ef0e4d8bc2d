//! Interactive prompt guarded by an in-process inactivity timer.

use crate::cli::commands::idle_minutes;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::session::{Area, IdleTimer, Session};
use crate::db;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info, warning};
use chrono::Utc;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::time::Duration;

const PROMPT: &str = "whops> ";

/// Split a command line into words, honoring single and double quotes.
pub(crate) fn split_line(line: &str) -> AppResult<Vec<String>> {
    let mut words = Vec::new();
    let mut cur = String::new();
    let mut quote: Option<char> = None;
    let mut in_word = false;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => cur.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut cur));
                    in_word = false;
                }
            }
            None => {
                cur.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(AppError::Other("unterminated quote".into()));
    }
    if in_word {
        words.push(cur);
    }
    Ok(words)
}

/// Idle limit as a timer duration; 0 minutes disables the timer.
pub(crate) fn idle_limit(minutes: i64) -> AppResult<Option<Duration>> {
    if minutes <= 0 {
        return Ok(None);
    }
    u64::try_from(minutes)
        .ok()
        .and_then(|m| m.checked_mul(60))
        .map(|secs| Some(Duration::from_secs(secs)))
        .ok_or_else(|| AppError::Config(format!("idle timeout out of range: {minutes} minutes")))
}

/// Timer that clears the area's credentials from its own connection when
/// the shell sits idle too long.
fn start_timer(cfg: &Config, area: Area) -> AppResult<Option<IdleTimer>> {
    let Some(limit) = idle_limit(idle_minutes(cfg, area))? else {
        return Ok(None);
    };
    let database = cfg.database.clone();
    Ok(Some(IdleTimer::start(limit, move || {
        if let Ok(pool) = db::open(&database) {
            let _ = Session::new(&pool.conn).expire(area);
        }
        println!();
        warning("Session expired due to inactivity");
    })))
}

/// Run one shell line. Returns false when the shell should stop.
fn run_line(line: &str, cfg: &Config) -> bool {
    let words = match split_line(line) {
        Ok(w) if w.is_empty() => return true,
        Ok(w) => w,
        Err(e) => {
            error(e);
            return true;
        }
    };

    if matches!(words[0].as_str(), "exit" | "quit") {
        return false;
    }

    let cli = match Cli::try_parse_from(std::iter::once("whops".to_string()).chain(words)) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return true;
        }
    };

    if matches!(cli.command, Commands::Shell { .. }) {
        warning("Already inside the shell");
        return true;
    }

    let cfg = crate::with_overrides(&cli, cfg);
    if let Err(e) = crate::dispatch(&cli, &cfg) {
        error(e);
    }
    true
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Shell { admin } = cmd else {
        return Ok(());
    };
    let area = if *admin { Area::Admin } else { Area::User };

    {
        let pool = db::open(&cfg.database)?;
        Session::new(&pool.conn).ensure_active(area, idle_minutes(cfg, area), Utc::now())?;
    }

    let mut timer = start_timer(cfg, area)?;
    let limit = match idle_minutes(cfg, area) {
        0 => "no idle limit".to_string(),
        m => format!("idle limit {m} min"),
    };
    info(format!(
        "whops shell ({} area, {}). Type 'exit' to leave.",
        area.label(),
        limit
    ));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{PROMPT}");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;

        if timer.as_ref().is_some_and(IdleTimer::is_expired) {
            warning(format!("Please log in again ({} area)", area.label()));
            timer = start_timer(cfg, area)?;
        } else if let Some(t) = &timer {
            t.touch();
        }

        if !run_line(&line, cfg) {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_and_quotes() {
        assert_eq!(
            split_line(r#"add safety-talk --topic "Fire drill" --remarks 'all ok'"#).unwrap(),
            vec!["add", "safety-talk", "--topic", "Fire drill", "--remarks", "all ok"]
        );
        assert_eq!(split_line("   ").unwrap(), Vec::<String>::new());
        assert_eq!(split_line(r#"edit x --set remarks="""#).unwrap(), vec!["edit", "x", "--set", "remarks="]);
        assert!(split_line(r#"list "open"#).is_err());
    }

    #[test]
    fn idle_limit_bounds() {
        assert_eq!(idle_limit(0).unwrap(), None);
        assert_eq!(idle_limit(20).unwrap(), Some(Duration::from_secs(1200)));
        assert!(matches!(idle_limit(i64::MAX), Err(AppError::Config(_))));
    }

    #[test]
    fn exit_words_stop_the_loop() {
        let cfg = Config::default();
        assert!(!run_line("exit", &cfg));
        assert!(!run_line("  quit ", &cfg));
        assert!(run_line("", &cfg));
        assert!(run_line("no-such-command", &cfg));
    }
}
