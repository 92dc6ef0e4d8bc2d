/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Grey for empty placeholders ("", "--", "0h 0m"), untouched otherwise.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "--" || v == "0h 0m" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Balance color: negative → red, zero → grey, positive → reset.
pub fn color_for_balance(value: f64) -> &'static str {
    if value < 0.0 {
        RED
    } else if value == 0.0 {
        GREY
    } else {
        RESET
    }
}

/// Equipment condition color, matching the dashboard legend.
pub fn color_for_condition(condition: &str) -> &'static str {
    match condition {
        "Good" | "Perfect" | "Completed" | "Ok" | "Charge" | "Verified" => GREEN,
        "Needs Attention" | "Pending" | "Medium" | "Low" | "Not Verified" => YELLOW,
        "Poor" | "Not Working" | "Not Charge" | "Repairing" | "Need Maintenance"
        | "DO Not Verified" => RED,
        _ => GREY,
    }
}
