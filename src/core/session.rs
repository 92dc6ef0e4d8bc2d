//! Stored credentials and inactivity guards for the user and admin areas.

use crate::db::log::ttlog_soft;
use crate::db::storage::{
    KEY_ADMIN_DATA, KEY_ADMIN_LAST_ACTIVITY, KEY_ADMIN_TOKEN, KEY_TOKEN, KEY_USER,
    KEY_USER_LAST_ACTIVITY, LocalStorage,
};
use crate::errors::{AppError, AppResult};
use crate::models::user::{Admin, User};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    User,
    Admin,
}

impl Area {
    fn token_key(&self) -> &'static str {
        match self {
            Area::User => KEY_TOKEN,
            Area::Admin => KEY_ADMIN_TOKEN,
        }
    }

    fn data_key(&self) -> &'static str {
        match self {
            Area::User => KEY_USER,
            Area::Admin => KEY_ADMIN_DATA,
        }
    }

    fn activity_key(&self) -> &'static str {
        match self {
            Area::User => KEY_USER_LAST_ACTIVITY,
            Area::Admin => KEY_ADMIN_LAST_ACTIVITY,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Area::User => "user",
            Area::Admin => "admin",
        }
    }

    fn not_logged_in(&self) -> AppError {
        match self {
            Area::User => AppError::NotLoggedIn,
            Area::Admin => AppError::AdminNotLoggedIn,
        }
    }
}

pub struct Session<'a> {
    conn: &'a Connection,
    store: LocalStorage<'a>,
}

impl<'a> Session<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            store: LocalStorage::new(conn),
        }
    }

    /// Connection backing the session, for internal log writes.
    pub fn conn(&self) -> &'a Connection {
        self.conn
    }

    pub fn token(&self, area: Area) -> AppResult<Option<String>> {
        self.store.get_non_empty(area.token_key())
    }

    /// Bearer token for outgoing requests: the admin token wins over the user token.
    pub fn token_for_request(&self) -> AppResult<Option<String>> {
        match self.token(Area::Admin)? {
            Some(t) => Ok(Some(t)),
            None => self.token(Area::User),
        }
    }

    fn stored_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let Some(raw) = self.store.get_non_empty(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(v) => Ok(Some(v)),
            Err(_) => {
                // corrupted entry: drop it and behave as if nothing was stored
                self.store.remove(key)?;
                Ok(None)
            }
        }
    }

    pub fn user(&self) -> AppResult<Option<User>> {
        self.stored_json(KEY_USER)
    }

    pub fn admin(&self) -> AppResult<Option<Admin>> {
        self.stored_json(KEY_ADMIN_DATA)
    }

    pub fn login_user(&self, token: &str, user: &User, now: DateTime<Utc>) -> AppResult<()> {
        self.store.set(KEY_TOKEN, token)?;
        self.store.set(KEY_USER, &serde_json::to_string(user)?)?;
        self.touch(Area::User, now)?;
        ttlog_soft(self.conn, "login", &user.email, "User logged in");
        Ok(())
    }

    pub fn login_admin(&self, token: &str, admin: &Admin, now: DateTime<Utc>) -> AppResult<()> {
        self.store.set(KEY_ADMIN_TOKEN, token)?;
        self.store.set(KEY_ADMIN_DATA, &serde_json::to_string(admin)?)?;
        self.touch(Area::Admin, now)?;
        ttlog_soft(self.conn, "login", &admin.email, "Admin logged in");
        Ok(())
    }

    fn forget(&self, area: Area) -> AppResult<()> {
        self.store.remove(area.token_key())?;
        self.store.remove(area.data_key())?;
        self.store.remove(area.activity_key())?;
        Ok(())
    }

    /// Returns false when there was no session to close.
    pub fn logout(&self, area: Area) -> AppResult<bool> {
        let had = self.token(area)?.is_some();
        self.forget(area)?;
        if had {
            ttlog_soft(self.conn, "logout", area.label(), "Logged out");
        }
        Ok(had)
    }

    /// Drop both sessions after the server rejected our credentials.
    pub fn clear_all(&self) -> AppResult<()> {
        self.forget(Area::User)?;
        self.forget(Area::Admin)?;
        ttlog_soft(self.conn, "session_expired", "all", "Server answered 401, tokens cleared");
        Ok(())
    }

    pub fn touch(&self, area: Area, now: DateTime<Utc>) -> AppResult<()> {
        self.store.set(area.activity_key(), &now.to_rfc3339())
    }

    pub fn last_activity(&self, area: Area) -> AppResult<Option<DateTime<Utc>>> {
        Ok(self
            .store
            .get_non_empty(area.activity_key())?
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc)))
    }

    /// Guard for one-shot commands: refuse without a token, expire the
    /// session when idle longer than `timeout_minutes`, otherwise refresh the
    /// activity stamp. A timeout of 0 never expires.
    pub fn ensure_active(&self, area: Area, timeout_minutes: i64, now: DateTime<Utc>) -> AppResult<()> {
        if self.token(area)?.is_none() {
            return Err(area.not_logged_in());
        }

        let limit = if timeout_minutes > 0 {
            Some(ChronoDuration::try_minutes(timeout_minutes).ok_or_else(|| {
                AppError::Config(format!(
                    "{} idle timeout out of range: {} minutes",
                    area.label(),
                    timeout_minutes
                ))
            })?)
        } else {
            None
        };

        if let Some(limit) = limit
            && let Some(last) = self.last_activity(area)?
            && now - last > limit
        {
            self.expire(area)?;
            return Err(AppError::SessionExpired);
        }

        self.touch(area, now)
    }

    /// Clear the area's credentials after an inactivity timeout.
    pub fn expire(&self, area: Area) -> AppResult<()> {
        self.forget(area)?;
        ttlog_soft(
            self.conn,
            "session_expired",
            area.label(),
            "Session expired due to inactivity",
        );
        Ok(())
    }
}

/// Resettable inactivity timer running on its own thread.
///
/// Every [`IdleTimer::touch`] restarts the countdown. When it runs out the
/// `on_expire` callback fires once and the timer stops. Dropping the timer
/// stops the thread.
pub struct IdleTimer {
    tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
    expired: Arc<AtomicBool>,
}

impl IdleTimer {
    pub fn start<F>(timeout: Duration, on_expire: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<()>();
        let expired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&expired);

        let handle = thread::spawn(move || {
            loop {
                match rx.recv_timeout(timeout) {
                    Ok(()) => continue,
                    Err(RecvTimeoutError::Timeout) => {
                        flag.store(true, Ordering::SeqCst);
                        on_expire();
                        break;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        Self {
            tx: Some(tx),
            handle: Some(handle),
            expired,
        }
    }

    /// Restart the countdown. Returns false if the timer already fired.
    pub fn touch(&self) -> bool {
        if self.is_expired() {
            return false;
        }
        match &self.tx {
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expired.load(Ordering::SeqCst)
    }
}

impl Drop for IdleTimer {
    fn drop(&mut self) {
        // closing the channel wakes the thread with Disconnected
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
