use crate::api::Api;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::{Area, Session};
use crate::db;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use chrono::{Local, Utc};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let pool = db::open(&cfg.database)?;
    let session = Session::new(&pool.conn);

    match cmd {
        Commands::Login {
            email,
            password,
            admin,
        } => {
            let api = Api::new(&cfg.api_base_url, &session)?;
            if *admin {
                let (token, who) = api.admin_login(email.trim(), password)?;
                session.login_admin(&token, &who, Utc::now())?;
                success(format!("Signed in to the admin area as {}", who.display_name()));
            } else {
                let (token, user) = api.login(email.trim(), password)?;
                session.login_user(&token, &user, Utc::now())?;
                let name = if user.name.is_empty() { email.as_str() } else { user.name.as_str() };
                success(format!("Welcome, {name}"));
            }
        }

        Commands::Logout { admin } => {
            let area = if *admin { Area::Admin } else { Area::User };
            if session.logout(area)? {
                success(format!("Signed out of the {} area", area.label()));
            } else {
                info(format!("No {} session to close", area.label()));
            }
        }

        Commands::Whoami => whoami(&session)?,

        Commands::RequestAccess {
            name,
            email,
            warehouse,
        } => {
            let api = Api::new(&cfg.api_base_url, &session)?;
            let msg = api.request_access(name.trim(), email.trim(), warehouse.trim())?;
            success(msg);
        }

        _ => {}
    }

    Ok(())
}

fn whoami(session: &Session<'_>) -> AppResult<()> {
    let stamp = |area: Area| -> AppResult<String> {
        Ok(session
            .last_activity(area)?
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "--".to_string()))
    };

    match (session.token(Area::User)?, session.user()?) {
        (Some(_), Some(user)) => {
            println!("👤 User  : {} <{}>", user.name, user.email);
            if !user.role.is_empty() {
                println!("   Role  : {}", user.role);
            }
            if !user.warehouses.is_empty() {
                println!("   Warehouses: {}", user.warehouses.join(", "));
            }
            println!("   Last activity: {}", stamp(Area::User)?);
        }
        (Some(_), None) => println!("👤 User  : signed in (profile unavailable)"),
        _ => println!("👤 User  : not signed in"),
    }

    match (session.token(Area::Admin)?, session.admin()?) {
        (Some(_), Some(admin)) => {
            println!("🛡️  Admin : {} <{}>", admin.display_name(), admin.email);
            println!("   Last activity: {}", stamp(Area::Admin)?);
        }
        (Some(_), None) => println!("🛡️  Admin : signed in (profile unavailable)"),
        _ => println!("🛡️  Admin : not signed in"),
    }

    Ok(())
}
