use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::table::strip_ansi;
use ansi_term::Colour;

const MAX_OP_WIDTH: usize = 60;

/// ANSI colour for a log operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" | "login" => Colour::Green,
        "delete" | "session_expired" => Colour::Red,
        "edit" => Colour::Yellow,
        "verify" => Colour::Cyan,
        "logout" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        other if other.starts_with("warehouse_") || other.starts_with("user_") => Colour::Cyan,
        _ => Colour::White,
    }
}

/// Cut the visible text to `MAX_OP_WIDTH`, then colour only the operation word.
fn render_op_target(operation: &str, target: &str) -> String {
    let color = color_for_operation(operation);
    let plain = if target.is_empty() {
        operation.to_string()
    } else {
        format!("{operation} ({target})")
    };

    let visible = if plain.chars().count() > MAX_OP_WIDTH {
        let mut s: String = plain.chars().take(MAX_OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    match visible.split_once(' ') {
        Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries: Vec<(i64, String, String, String)> = load_log(&pool.conn)?
            .into_iter()
            .map(|(id, raw_date, operation, target, message)| {
                let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(raw_date);
                (id, date, render_op_target(&operation, &target), message)
            })
            .collect();

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|(_, _, op, _)| strip_ansi(op).chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries
            .iter()
            .map(|(id, _, _, _)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, _, _)| date.len())
            .max()
            .unwrap_or(10);

        println!("📜 Internal log:\n");

        for (id, date, op_target, message) in entries {
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&op_target).chars().count()));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                op_target,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_targets_are_truncated_without_ansi() {
        let target = "x".repeat(100);
        let rendered = render_op_target("verify", &target);
        let visible = strip_ansi(&rendered);
        assert_eq!(visible.chars().count(), MAX_OP_WIDTH);
        assert!(visible.starts_with("verify (xxx"));
        assert!(visible.ends_with("..."));
    }

    #[test]
    fn short_entries_are_kept() {
        assert_eq!(strip_ansi(&render_op_target("init", "")), "init");
        assert_eq!(
            strip_ansi(&render_op_target("delete", "attendance/a1")),
            "delete (attendance/a1)"
        );
    }
}
