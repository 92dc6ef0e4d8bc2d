use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::TestEnv;

#[test]
fn calc_extra_time_over_default_baseline() {
    let env = TestEnv::new("calc_extra");
    env.cmd()
        .args(["calc", "extra-time", "09:00", "19:00"])
        .assert()
        .success()
        .stdout(contains("2h 0m"));

    env.cmd()
        .args(["calc", "extra-time", "22:00", "06:00"])
        .assert()
        .success()
        .stdout(contains("--"))
        .stdout(contains("Cannot compute extra time"));
}

#[test]
fn calc_balance_keeps_negative_values() {
    let env = TestEnv::new("calc_balance");
    env.cmd()
        .args(["calc", "balance", "10", "0", "15"])
        .assert()
        .success()
        .stdout(contains("-5"));

    env.cmd()
        .args(["calc", "balance", "100", "50", "30"])
        .assert()
        .success()
        .stdout(contains("120"));
}

#[test]
fn calc_due_reports_each_severity() {
    let env = TestEnv::new("calc_due");
    env.cmd()
        .args(["calc", "due", "--kind", "weekly", "--last", "2024-05-12", "--today", "2024-05-20"])
        .assert()
        .success()
        .stdout(contains("OVERDUE"))
        .stdout(contains("Weekly spot check overdue by 1 days! Please add new record."));

    env.cmd()
        .args(["calc", "due", "--last", "2024-05-17", "--today", "2024-05-20"])
        .assert()
        .success()
        .stdout(contains("Last weekly check was 3 days ago. 4 days remaining."));

    env.cmd()
        .args(["calc", "due", "--kind", "quarterly", "--last", "2024-05-12", "--today", "2024-05-20"])
        .assert()
        .success()
        .stdout(contains("DUE SOON"))
        .stdout(contains("6 days remaining for next check."));

    env.cmd()
        .args(["calc", "due", "--kind", "quarterly", "--today", "2024-05-20"])
        .assert()
        .success()
        .stdout(contains("No quarterly spot check recorded yet"));

    env.cmd()
        .args(["calc", "due", "--last", "2024-05-14", "--today", "2024-05-20T10:00:00Z"])
        .assert()
        .success()
        .stdout(contains("OVERDUE"))
        .stdout(contains("Weekly spot check overdue by 0 days! Please add new record."));

    env.cmd()
        .args(["calc", "due", "--last", "20/05/2024"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn init_creates_database_and_logs_it() {
    let env = TestEnv::new("init");
    env.cmd()
        .args(["--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));
    assert!(std::path::Path::new(&env.db).exists());

    env.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"));
}

#[test]
fn guarded_commands_need_a_login() {
    let env = TestEnv::new("guard");
    env.init();

    env.cmd()
        .args(["list", "attendance"])
        .assert()
        .failure()
        .stderr(contains("Please login first!"));

    env.cmd()
        .args(["dashboard"])
        .assert()
        .failure()
        .stderr(contains("Please login first!"));

    env.cmd()
        .args(["admin", "dashboard"])
        .assert()
        .failure()
        .stderr(contains("Admin token missing"));
}

#[test]
fn whoami_without_sessions() {
    let env = TestEnv::new("whoami");
    env.init();
    env.cmd()
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("User  : not signed in").and(contains("Admin : not signed in")));
}

#[test]
fn malformed_arguments_are_rejected_before_any_request() {
    let env = TestEnv::new("malformed");
    env.init();

    env.cmd()
        .args(["edit", "attendance", "a1", "--set", "timeOut"])
        .assert()
        .failure()
        .stderr(contains("Invalid field assignment"));

    env.cmd()
        .args(["list", "safety-talk", "--where", "topic"])
        .assert()
        .failure()
        .stderr(contains("Invalid filter"));
}

#[test]
fn config_print_shows_defaults() {
    let env = TestEnv::new("config_print");
    env.cmd()
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("api_base_url"))
        .stdout(contains("user_idle_timeout_minutes: 20"));
}

#[test]
fn spot_check_template_lists_standard_rows() {
    let env = TestEnv::new("template");
    env.init();
    env.cmd()
        .args(["spot-check-template", "--kind", "quarterly"])
        .assert()
        .success()
        .stdout(contains("quarterly spot check form"))
        .stdout(contains("stocks:"))
        .stdout(contains("frequently: Weekly"))
        .stdout(contains("verifiedBy: DO Not Verified"));
}
