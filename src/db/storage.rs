//! Persistent key/value storage backed by the `local_storage` table.

use crate::errors::AppResult;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

pub const KEY_TOKEN: &str = "token";
pub const KEY_USER: &str = "user";
pub const KEY_ADMIN_TOKEN: &str = "adminToken";
pub const KEY_ADMIN_DATA: &str = "adminData";
pub const KEY_USER_LAST_ACTIVITY: &str = "userLastActivity";
pub const KEY_ADMIN_LAST_ACTIVITY: &str = "adminLastActivity";

pub struct LocalStorage<'a> {
    conn: &'a Connection,
}

impl<'a> LocalStorage<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self, key: &str) -> AppResult<Option<String>> {
        let value = self
            .conn
            .prepare_cached("SELECT value FROM local_storage WHERE key = ?1")?
            .query_row([key], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(value)
    }

    pub fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.conn
            .prepare_cached(
                "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            )?
            .execute(params![key, value, Utc::now().to_rfc3339()])?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> AppResult<()> {
        self.conn
            .prepare_cached("DELETE FROM local_storage WHERE key = ?1")?
            .execute([key])?;
        Ok(())
    }

    /// Non-empty value for `key`, treating "" as absent.
    pub fn get_non_empty(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.get(key)?.filter(|v| !v.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    #[test]
    fn set_overwrites_and_remove_clears() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        let ls = LocalStorage::new(&conn);

        assert_eq!(ls.get(KEY_TOKEN).unwrap(), None);
        ls.set(KEY_TOKEN, "abc").unwrap();
        ls.set(KEY_TOKEN, "def").unwrap();
        assert_eq!(ls.get(KEY_TOKEN).unwrap().as_deref(), Some("def"));

        ls.remove(KEY_TOKEN).unwrap();
        assert_eq!(ls.get(KEY_TOKEN).unwrap(), None);
        ls.remove(KEY_TOKEN).unwrap();
    }

    #[test]
    fn blank_values_read_as_absent() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        let ls = LocalStorage::new(&conn);
        ls.set(KEY_ADMIN_TOKEN, "  ").unwrap();
        assert_eq!(ls.get_non_empty(KEY_ADMIN_TOKEN).unwrap(), None);
    }
}
