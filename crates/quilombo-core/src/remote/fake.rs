//! In-memory remote store used by sync tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::RemoteStore;
use crate::error::{Error, Result};
use crate::models::{record_email, Record};

/// Scriptable fake backend: seedable tables, per-table unreachability,
/// per-email insert failures, and call counters.
#[derive(Default)]
pub struct FakeRemoteStore {
    tables: Mutex<HashMap<String, Vec<Record>>>,
    unreachable: Mutex<HashSet<String>>,
    offline: AtomicBool,
    failing_emails: Mutex<HashSet<String>>,
    next_id: AtomicI64,
    insert_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

impl FakeRemoteStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    /// Make a table exist even when empty.
    pub fn create_table(&self, table: &str) {
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default();
    }

    /// Insert a pre-existing remote row with a server-assigned id.
    pub fn seed(&self, table: &str, mut record: Record) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        record.insert("id".to_string(), serde_json::Value::from(id));
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(record);
        id
    }

    /// Simulate total loss of connectivity.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Make one table answer every call with an error.
    pub fn set_unreachable(&self, table: &str) {
        self.unreachable.lock().unwrap().insert(table.to_string());
    }

    /// Make inserts fail for records carrying this email.
    pub fn fail_inserts_for(&self, email: &str) {
        self.failing_emails.lock().unwrap().insert(email.to_string());
    }

    pub fn rows(&self, table: &str) -> Vec<Record> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    fn check_reachable(&self, table: &str) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(Error::Remote("connection refused".to_string()));
        }
        if self.unreachable.lock().unwrap().contains(table) {
            return Err(Error::Remote(format!("{table}: HTTP 404")));
        }
        if !self.tables.lock().unwrap().contains_key(table) {
            return Err(Error::Remote(format!("{table}: relation does not exist")));
        }
        Ok(())
    }
}

impl RemoteStore for FakeRemoteStore {
    async fn probe(&self, table: &str) -> Result<()> {
        self.check_reachable(table)
    }

    async fn find_by_email(&self, table: &str, email: &str) -> Result<Option<Record>> {
        self.check_reachable(table)?;
        Ok(self
            .tables
            .lock()
            .unwrap()
            .get(table)
            .and_then(|rows| rows.iter().find(|row| record_email(row) == Some(email)))
            .cloned())
    }

    async fn insert(&self, table: &str, record: &Record) -> Result<()> {
        self.check_reachable(table)?;
        self.insert_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(email) = record_email(record) {
            if self.failing_emails.lock().unwrap().contains(email) {
                return Err(Error::Remote(format!("{table}: insert rejected (500)")));
            }
        }

        let mut stored = record.clone();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        stored.insert("id".to_string(), serde_json::Value::from(id));
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(stored);
        Ok(())
    }

    async fn update(&self, table: &str, id: i64, record: &Record) -> Result<()> {
        self.check_reachable(table)?;
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        let mut tables = self.tables.lock().unwrap();
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| Error::Remote(format!("{table}: relation does not exist")))?;
        let row = rows
            .iter_mut()
            .find(|row| row.get("id").and_then(serde_json::Value::as_i64) == Some(id))
            .ok_or_else(|| Error::NotFound(format!("{table} id {id}")))?;

        for (key, value) in record {
            row.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}
