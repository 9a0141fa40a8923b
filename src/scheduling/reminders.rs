//! Appointment reminder selection.
//!
//! Reminders are sent once per booking and appointment date. Sent reminders
//! are recorded in a [`ReminderLedger`] which can be saved to disk so a
//! restarted process does not remind twice.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::Booking;

/// Identifies one reminder: a booking on its appointment date.
///
/// The date is part of the key so a booking moved to another day is
/// reminded again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderKey {
    /// The booking id.
    pub booking_id: Uuid,
    /// The appointment date.
    pub date: NaiveDate,
}

impl ReminderKey {
    /// Returns the key of a booking.
    pub fn for_booking(booking: &Booking) -> Self {
        Self {
            booking_id: booking.id,
            date: booking.date,
        }
    }
}

/// The set of reminders already sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderLedger {
    sent: BTreeSet<ReminderKey>,
}

impl ReminderLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a ledger from a JSON file. A missing file yields an empty ledger.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).map_err(|e| ledger_error(path, e))?;
        serde_json::from_str(&content).map_err(|e| ledger_error(path, e))
    }

    /// Writes the ledger to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> EngineResult<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).map_err(|e| ledger_error(path, e))?;
        fs::write(path, content).map_err(|e| ledger_error(path, e))
    }

    /// Whether the reminder has been sent.
    pub fn contains(&self, key: &ReminderKey) -> bool {
        self.sent.contains(key)
    }

    /// Records a sent reminder. Returns false when it was already recorded.
    pub fn mark_sent(&mut self, key: ReminderKey) -> bool {
        self.sent.insert(key)
    }

    /// Number of recorded reminders.
    pub fn len(&self) -> usize {
        self.sent.len()
    }

    /// Whether no reminder has been recorded.
    pub fn is_empty(&self) -> bool {
        self.sent.is_empty()
    }

    /// Forgets reminders for appointments dated before `date`.
    ///
    /// Returns the number of entries removed.
    pub fn prune_before(&mut self, date: NaiveDate) -> usize {
        let before = self.sent.len();
        self.sent.retain(|key| key.date >= date);
        before - self.sent.len()
    }
}

fn ledger_error(path: &Path, error: impl std::fmt::Display) -> EngineError {
    EngineError::LedgerIo {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}

/// Selects the bookings that should be reminded now.
///
/// # Arguments
///
/// * `bookings` - Candidate bookings across all providers
/// * `now` - Current wall-clock time
/// * `lead_hours` - How far ahead of the appointment to remind
/// * `ledger` - Reminders already sent
///
/// # Returns
///
/// Pending or confirmed bookings whose date equals the date of
/// `now + lead_hours` and which have no ledger entry yet, in input order.
/// Nothing is due when `now + lead_hours` is out of the calendar's range.
pub fn due_reminders<'a>(
    bookings: &'a [Booking],
    now: NaiveDateTime,
    lead_hours: i64,
    ledger: &ReminderLedger,
) -> Vec<&'a Booking> {
    let Some(reminder_date) = TimeDelta::try_hours(lead_hours)
        .and_then(|lead| now.checked_add_signed(lead))
        .map(|at| at.date())
    else {
        warn!(lead_hours, "Reminder lead time out of range");
        return Vec::new();
    };

    bookings
        .iter()
        .filter(|booking| booking.date == reminder_date)
        .filter(|booking| booking.status.is_upcoming())
        .filter(|booking| !ledger.contains(&ReminderKey::for_booking(booking)))
        .collect()
}

/// Delivers appointment reminders.
pub trait ReminderNotifier {
    /// Sends a reminder for one booking.
    fn notify(&self, booking: &Booking) -> EngineResult<()>;
}

/// A notifier that records reminders in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl ReminderNotifier for LogNotifier {
    fn notify(&self, booking: &Booking) -> EngineResult<()> {
        info!(
            booking_id = %booking.id,
            provider_id = %booking.provider_id,
            client_id = %booking.client_id,
            date = %booking.date,
            time = %booking.time,
            "Appointment reminder"
        );
        Ok(())
    }
}

/// Runs one reminder pass: notifies every due booking and marks it sent.
///
/// A booking whose notification fails is not marked and will be retried on
/// the next pass.
///
/// # Returns
///
/// The number of reminders sent.
pub fn send_due_reminders<N: ReminderNotifier + ?Sized>(
    notifier: &N,
    bookings: &[Booking],
    now: NaiveDateTime,
    lead_hours: i64,
    ledger: &mut ReminderLedger,
) -> usize {
    let due: Vec<ReminderKey> = due_reminders(bookings, now, lead_hours, ledger)
        .into_iter()
        .filter_map(|booking| match notifier.notify(booking) {
            Ok(()) => Some(ReminderKey::for_booking(booking)),
            Err(e) => {
                warn!(booking_id = %booking.id, error = %e, "Reminder failed");
                None
            }
        })
        .collect();

    due.into_iter().filter(|key| ledger.mark_sent(*key)).count()
}
