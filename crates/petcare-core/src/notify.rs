//! Notification collaborator interface and reminder planning.
//!
//! The core never delivers notifications itself; it plans reminders and
//! hands them to an injected [`Notifier`]. Scheduling is best-effort
//! everywhere: callers log failures and move on, they never let a
//! notification error fail the mutation that triggered it.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use thiserror::Error;

use crate::store::{parse_reminder_time, AppSettings, Snapshot};

/// Notification errors. These are always swallowed at the call site.
#[derive(Error, Debug)]
#[error("notification scheduling failed: {0}")]
pub struct NotifyError(pub String);

pub type NotifyResult<T> = Result<T, NotifyError>;

/// Local notification collaborator. Implementations must no-op
/// gracefully on platforms without notification support rather than
/// returning errors.
pub trait Notifier {
    /// Schedule a reminder; returns the platform's notification id, or
    /// None when notifications are unavailable.
    fn schedule_at(&mut self, message: &str, when: DateTime<Utc>) -> NotifyResult<Option<String>>;

    fn cancel(&mut self, notification_id: &str) -> NotifyResult<()>;

    fn cancel_all(&mut self) -> NotifyResult<()>;
}

/// Stand-in notifier for environments without notification support.
/// Logs what it would have scheduled and reports no id.
#[derive(Debug, Default)]
pub struct DisabledNotifier;

impl Notifier for DisabledNotifier {
    fn schedule_at(&mut self, message: &str, when: DateTime<Utc>) -> NotifyResult<Option<String>> {
        tracing::debug!(%message, %when, "notifications disabled; skipping schedule");
        Ok(None)
    }

    fn cancel(&mut self, notification_id: &str) -> NotifyResult<()> {
        tracing::debug!(notification_id, "notifications disabled; skipping cancel");
        Ok(())
    }

    fn cancel_all(&mut self) -> NotifyResult<()> {
        Ok(())
    }
}

/// One planned reminder, not yet handed to the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub message: String,
    pub when: DateTime<Utc>,
}

/// Compute the full reminder set for the current state: upcoming
/// medication doses, today's pending tasks, and low-inventory refill
/// nudges. Pure; returns empty when notifications are disabled.
pub fn plan_reminders(
    snapshot: &Snapshot,
    settings: &AppSettings,
    today: NaiveDate,
) -> Vec<Reminder> {
    if !settings.notifications_enabled {
        return Vec::new();
    }

    let lead = Duration::minutes(i64::from(settings.reminder_minutes_before));
    let mut reminders = Vec::new();

    for med in &snapshot.medications {
        let Some(pet) = snapshot.pets.iter().find(|pet| pet.id == med.pet_id) else {
            continue;
        };
        if med.next_due >= today {
            let time = med
                .reminder_time
                .as_deref()
                .map(parse_reminder_time)
                .unwrap_or_else(|| settings.reminder_time());
            let when = to_utc(med.next_due, time) - lead;
            reminders.push(Reminder {
                message: format!("{}: {} ({})", pet.name, med.name, med.dosage),
                when,
            });
        }
        if med.needs_refill() {
            reminders.push(Reminder {
                message: format!("{}'s {} is running low", pet.name, med.name),
                when: to_utc(today, settings.reminder_time()),
            });
        }
    }

    for task in &snapshot.tasks {
        if task.completed_on(today) {
            continue;
        }
        let Some(pet) = snapshot.pets.iter().find(|pet| pet.id == task.pet_id) else {
            continue;
        };
        let time = chrono::NaiveTime::from_hms_opt(task.time_slot.nominal_hour(), 0, 0)
            .unwrap_or_default();
        reminders.push(Reminder {
            message: format!("{}: {}", pet.name, task.task_name),
            when: to_utc(today, time) - lead,
        });
    }

    reminders
}

/// Replace all scheduled reminders with the given plan. Returns the
/// platform ids of whatever was actually scheduled.
pub fn push_reminders<N: Notifier>(
    notifier: &mut N,
    reminders: &[Reminder],
) -> NotifyResult<Vec<String>> {
    notifier.cancel_all()?;
    let mut ids = Vec::new();
    for reminder in reminders {
        if let Some(id) = notifier.schedule_at(&reminder.message, reminder.when)? {
            ids.push(id);
        }
    }
    Ok(ids)
}

fn to_utc(day: NaiveDate, time: chrono::NaiveTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(time))
}
