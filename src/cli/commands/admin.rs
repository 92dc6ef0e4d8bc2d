use crate::api::Api;
use crate::cli::commands::edit::merge_overrides;
use crate::cli::commands::list::{fetch_and_render, filter_from};
use crate::cli::commands::{confirm, guarded, parse_assignments};
use crate::cli::parser::{AdminCommand, Commands, UserCommand, WarehouseCommand};
use crate::config::Config;
use crate::core::session::{Area, Session};
use crate::db::log::ttlog_soft;
use crate::errors::{AppError, AppResult};
use crate::models::user::{NewUser, User};
use crate::models::warehouse::Warehouse;
use crate::ui::messages::{header, info, success};
use crate::utils::table::Table;
use chrono::Utc;

fn text(v: &Option<String>) -> String {
    v.as_deref().map(str::trim).unwrap_or_default().to_string()
}

/// Users grouped as (active, inactive).
fn status_counts(users: &[User]) -> (usize, usize) {
    let active = users.iter().filter(|u| u.is_active()).count();
    (active, users.len() - active)
}

fn find_user(users: Vec<User>, id: &str) -> AppResult<User> {
    users
        .into_iter()
        .find(|u| u.id.as_deref() == Some(id))
        .ok_or_else(|| AppError::RecordNotFound(id.to_string()))
}

fn dashboard(api: &Api<'_>) -> AppResult<()> {
    let warehouses = api.warehouses()?;
    let users = api.users()?;
    let (active, inactive) = status_counts(&users);

    header("Admin dashboard");
    println!("   {:<12} {}", "Warehouses", warehouses.len());
    println!("   {:<12} {}", "Users", users.len());
    println!("   {:<12} {}", "  active", active);
    println!("   {:<12} {}", "  inactive", inactive);
    Ok(())
}

fn warehouse(api: &Api<'_>, session: &Session<'_>, cmd: &WarehouseCommand, cfg: &Config) -> AppResult<()> {
    match cmd {
        WarehouseCommand::List => {
            let all = api.warehouses()?;
            if all.is_empty() {
                info("No warehouses found");
                return Ok(());
            }
            let mut table = Table::new(Warehouse::columns()).with_separator(&cfg.separator_char);
            for wh in &all {
                table.add_row(wh.row());
            }
            print!("{}", table.render());
            println!("\n{} warehouses", all.len());
        }

        WarehouseCommand::Add {
            name,
            location,
            province,
            city,
            address,
            capacity,
            contact_person,
            contact_phone,
        } => {
            let wh = Warehouse {
                id: None,
                name: text(name),
                location: text(location),
                province: text(province),
                city: text(city),
                address: address.trim().to_string(),
                capacity: capacity.trim().to_string(),
                contact_person: contact_person.trim().to_string(),
                contact_phone: contact_phone.trim().to_string(),
            };
            let missing = wh.missing_fields();
            if !missing.is_empty() {
                return Err(AppError::Validation(missing));
            }
            api.create_warehouse(&wh)?;
            ttlog_soft(session.conn(), "warehouse_add", &wh.name, "Warehouse created");
            success(format!("Warehouse '{}' created", wh.name));
        }

        WarehouseCommand::Edit { id, set } => {
            let overrides = parse_assignments(set)?;
            let current = api
                .warehouses()?
                .into_iter()
                .find(|w| w.id.as_deref() == Some(id.as_str()))
                .ok_or_else(|| AppError::RecordNotFound(id.clone()))?;
            let merged: Warehouse =
                serde_json::from_value(merge_overrides(serde_json::to_value(&current)?, &overrides))?;
            let missing = merged.missing_fields();
            if !missing.is_empty() {
                return Err(AppError::Validation(missing));
            }
            api.update_warehouse(id, &serde_json::to_value(&merged)?)?;
            ttlog_soft(session.conn(), "warehouse_edit", id, "Warehouse updated");
            success(format!("Warehouse '{}' updated", merged.name));
        }

        WarehouseCommand::Delete { id, yes } => {
            if !*yes && !confirm(&format!("Delete warehouse {id}?"))? {
                info("Nothing deleted");
                return Ok(());
            }
            api.delete_warehouse(id)?;
            ttlog_soft(session.conn(), "warehouse_delete", id, "Warehouse deleted");
            success(format!("Warehouse {id} deleted"));
        }
    }
    Ok(())
}

fn user(api: &Api<'_>, session: &Session<'_>, cmd: &UserCommand, cfg: &Config) -> AppResult<()> {
    match cmd {
        UserCommand::List => {
            let all = api.users()?;
            if all.is_empty() {
                info("No users found");
                return Ok(());
            }
            let mut table = Table::new(User::columns()).with_separator(&cfg.separator_char);
            for u in &all {
                table.add_row(u.row());
            }
            print!("{}", table.render());
            let (active, inactive) = status_counts(&all);
            println!("\n{} users ({} active, {} inactive)", all.len(), active, inactive);
        }

        UserCommand::Add {
            name,
            email,
            password,
            role,
            phone,
            city,
            province,
            address,
        } => {
            let new = NewUser {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                password: password.clone(),
                role: *role,
                phone: phone.trim().to_string(),
                city: city.trim().to_string(),
                province: province.trim().to_string(),
                address: address.trim().to_string(),
            };
            let missing: Vec<String> = [("Name", &new.name), ("Email", &new.email), ("Password", &new.password)]
                .iter()
                .filter(|(_, v)| v.trim().is_empty())
                .map(|(k, _)| k.to_string())
                .collect();
            if !missing.is_empty() {
                return Err(AppError::Validation(missing));
            }
            api.add_user(&new)?;
            ttlog_soft(session.conn(), "user_add", &new.email, &format!("User added as {}", new.role));
            success(format!("User {} <{}> added", new.name, new.email));
        }

        UserCommand::Assign { user_id, warehouses } => {
            let ids: Vec<String> = warehouses
                .iter()
                .map(|w| w.trim().to_string())
                .filter(|w| !w.is_empty())
                .collect();
            if ids.is_empty() {
                return Err(AppError::Validation(vec!["Warehouses".into()]));
            }
            api.assign_warehouses(user_id, &ids)?;
            ttlog_soft(session.conn(), "user_assign", user_id, &format!("Warehouses: {}", ids.join(",")));
            success(format!("Assigned {} warehouse(s) to {}", ids.len(), user_id));
        }

        UserCommand::ToggleStatus { user_id } => {
            let current = find_user(api.users()?, user_id)?;
            let next = current.toggled_status();
            api.set_user_status(user_id, next)?;
            ttlog_soft(session.conn(), "user_status", user_id, &format!("Status set to {next}"));
            success(format!("{} is now {}", current.email, next));
        }
    }
    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Admin { cmd } = cmd else {
        return Ok(());
    };

    // filters are parsed before the session is touched
    let filter = match cmd {
        AdminCommand::List { filter, .. } => Some(filter_from(filter)?),
        _ => None,
    };

    guarded(cfg, Area::Admin, |api, session| match cmd {
        AdminCommand::Dashboard => dashboard(api),

        AdminCommand::List { resource, json, .. } => {
            let filter = filter.unwrap_or_default();
            fetch_and_render(api, *resource, false, &filter, *json, cfg)
        }

        AdminCommand::Verify { resource, id } => {
            let admin = session.admin()?.ok_or(AppError::AdminNotLoggedIn)?;
            api.verify(*resource, id, &admin, Utc::now())?;
            ttlog_soft(
                session.conn(),
                "verify",
                &format!("{}/{}", resource.path(), id),
                &format!("Verified by {}", admin.display_name()),
            );
            success(format!("{} {} verified by {}", resource.label(), id, admin.display_name()));
            Ok(())
        }

        AdminCommand::Delete { resource, id, yes } => {
            if !*yes && !confirm(&format!("Delete {} {}?", resource.label(), id))? {
                info("Nothing deleted");
                return Ok(());
            }
            api.delete_record(*resource, id)?;
            ttlog_soft(
                session.conn(),
                "delete",
                &format!("{}/{}", resource.path(), id),
                &format!("Deleted {resource} record"),
            );
            success(format!("{} {} deleted", resource.label(), id));
            Ok(())
        }

        AdminCommand::Warehouse { cmd } => warehouse(api, session, cmd, cfg),
        AdminCommand::User { cmd } => user(api, session, cmd, cfg),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(id: &str, status: &str) -> User {
        User {
            id: Some(id.into()),
            email: format!("{id}@example.com"),
            status: status.into(),
            ..Default::default()
        }
    }

    #[test]
    fn counts_by_status() {
        let users = vec![u("a", "active"), u("b", ""), u("c", "inactive")];
        assert_eq!(status_counts(&users), (2, 1));
        assert_eq!(status_counts(&[]), (0, 0));
    }

    #[test]
    fn toggle_uses_listed_status() {
        let users = vec![u("a", "active"), u("c", "inactive")];
        let found = find_user(users.clone(), "c").unwrap();
        assert_eq!(found.toggled_status(), "active");
        assert!(matches!(find_user(users, "zz"), Err(AppError::RecordNotFound(_))));
    }
}
