use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::Session;
use crate::db;
use crate::errors::AppResult;
use crate::models::spot_check::SpotCheckRecord;
use crate::utils::date::today_str;

/// Name of the signed-in user, if the local store has one. Never fails.
fn incharge(cfg: &Config) -> String {
    db::open(&cfg.database)
        .ok()
        .and_then(|pool| Session::new(&pool.conn).user().ok().flatten())
        .map(|u| u.name)
        .unwrap_or_default()
}

/// Print a blank spot-check form as YAML.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::SpotCheckTemplate { kind } = cmd else {
        return Ok(());
    };
    let form = SpotCheckRecord::template(&today_str(), &incharge(cfg));
    println!("# {kind} spot check form: fill in and pass to `whops add spot-check --kind {kind} --file <path>`");
    print!("{}", serde_yaml::to_string(&form)?);
    Ok(())
}
