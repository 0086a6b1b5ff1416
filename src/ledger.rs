//! Endpoint-side event ledger
//!
//! Mirrors what the logging endpoint does with each POST: take the next event
//! id under a lock (waiting at most a bounded time), stamp the event with the
//! current date and time, and append one row
//! `[id, date, time, studentId, name, type, details]` to a tabular store.
//!
//! The id is consumed before the append is attempted, so a failed append
//! leaves a gap in the id sequence. Ids are never reused.

use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::error::{DeliveryError, LedgerError};
use crate::telemetry::{EndpointReply, EventForm, Transport};

/// Default bound on waiting for the id lock
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(3);

/// One appended row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub id: u64,
    /// `yyyy-MM-dd`
    pub date: String,
    /// `HH:mm:ss`
    pub time: String,
    pub student_id: String,
    pub name: String,
    pub kind: String,
    pub details: String,
}

impl LedgerRow {
    /// Cells in column order
    pub fn cells(&self) -> [String; 7] {
        [
            self.id.to_string(),
            self.date.clone(),
            self.time.clone(),
            self.student_id.clone(),
            self.name.clone(),
            self.kind.clone(),
            self.details.clone(),
        ]
    }
}

/// Tabular storage rows are appended to
pub trait RowStore {
    fn append_row(&mut self, row: LedgerRow) -> Result<(), LedgerError>;
}

/// In-memory sheet, optionally limited to a number of rows
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    rows: Vec<LedgerRow>,
    max_rows: Option<usize>,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_rows(max_rows: usize) -> Self {
        Self {
            rows: Vec::new(),
            max_rows: Some(max_rows),
        }
    }

    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }
}

impl RowStore for MemorySheet {
    fn append_row(&mut self, row: LedgerRow) -> Result<(), LedgerError> {
        if self.max_rows.is_some_and(|max| self.rows.len() >= max) {
            return Err(LedgerError::Append(format!(
                "sheet is full ({} rows)",
                self.rows.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }
}

/// Date and time strings stamped onto a row (UTC)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    pub date: String,
    pub time: String,
}

impl Timestamp {
    pub fn from_unix_ms(ms: f64) -> Self {
        let secs = (ms / 1000.0).floor() as i64;
        let days = secs.div_euclid(86_400);
        let secs_of_day = secs.rem_euclid(86_400);
        let (year, month, day) = civil_from_days(days);
        Self {
            date: format!("{:04}-{:02}-{:02}", year, month, day),
            time: format!(
                "{:02}:{:02}:{:02}",
                secs_of_day / 3600,
                secs_of_day % 3600 / 60,
                secs_of_day % 60
            ),
        }
    }
}

/// Proleptic Gregorian date for a count of days since 1970-01-01
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// Acquire `mutex`, giving up after `timeout`
fn lock_within<T>(mutex: &Mutex<T>, timeout: Duration) -> Result<MutexGuard<'_, T>, LedgerError> {
    mutex
        .try_lock_for(timeout)
        .ok_or(LedgerError::LockTimeout(timeout))
}

/// Event ledger over a row store
#[derive(Debug)]
pub struct Ledger<S> {
    next_id: Mutex<u64>,
    store: Mutex<S>,
    lock_timeout: Duration,
}

impl<S: RowStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self {
            next_id: Mutex::new(0),
            store: Mutex::new(store),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Take the next event id. The counter is untouched on timeout.
    pub fn next_event_id(&self) -> Result<u64, LedgerError> {
        let mut next = lock_within(&self.next_id, self.lock_timeout)?;
        let id = *next;
        *next += 1;
        Ok(id)
    }

    /// Record one event received at wall-clock time `now_ms`
    pub fn record(&self, form: &EventForm, now_ms: f64) -> Result<u64, LedgerError> {
        log::info!(
            "Received event: type={:?} name={:?} studentId={:?}",
            form.kind,
            form.name,
            form.student_id
        );

        let id = self.next_event_id()?;
        let stamp = Timestamp::from_unix_ms(now_ms);
        let row = LedgerRow {
            id,
            date: stamp.date,
            time: stamp.time,
            student_id: form.student_id.clone(),
            name: form.name.clone(),
            kind: form.kind.clone(),
            details: form.details.clone(),
        };

        lock_within(&self.store, self.lock_timeout)?.append_row(row)?;
        Ok(id)
    }

    /// Record an event and build the JSON reply the endpoint sends back
    pub fn handle(&self, form: &EventForm, now_ms: f64) -> EndpointReply {
        match self.record(form, now_ms) {
            Ok(_) => EndpointReply::Success,
            Err(e) => {
                log::error!("Failed to record event: {}", e);
                EndpointReply::Error {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Run `f` against the store
    pub fn with_store<R>(&self, f: impl FnOnce(&S) -> R) -> Result<R, LedgerError> {
        let store = lock_within(&self.store, self.lock_timeout)?;
        Ok(f(&store))
    }
}

/// In-process delivery, for running without a network endpoint
impl<S: RowStore> Transport for Ledger<S> {
    async fn send(&self, form: &EventForm) -> Result<EndpointReply, DeliveryError> {
        Ok(self.handle(form, crate::platform::now_ms()))
    }
}
