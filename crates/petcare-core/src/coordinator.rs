//! Completion coordinator: the single mutation path for completion
//! state.
//!
//! A dose completion is two writes (log, then medication) with no
//! transaction between them. When the second write fails the log still
//! stands, and the status derivation reports that day as completed from
//! the log alone, so the inconsistency is invisible to readers and is
//! resolved by the next successful completion.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{CareTask, DoseLog, Medication};
use crate::notify::{plan_reminders, push_reminders, Notifier};
use crate::schedule::{advance, day_of};
use crate::store::{EntityStore, Storage, StoreError, StoreResult};

/// Coordinates completion writes against the entity store and the
/// notification collaborator.
pub struct Coordinator<'a, S: Storage, N: Notifier> {
    store: &'a mut EntityStore<S>,
    notifier: &'a mut N,
}

impl<'a, S: Storage, N: Notifier> Coordinator<'a, S, N> {
    pub fn new(store: &'a mut EntityStore<S>, notifier: &'a mut N) -> Self {
        Self { store, notifier }
    }

    /// Record an administered dose: append the log, stamp `last_given`,
    /// advance `next_due` by one interval, and decrement inventory.
    pub fn record_dose(
        &mut self,
        medication_id: &str,
        now: DateTime<Utc>,
        administered_by: Option<String>,
        notes: Option<String>,
    ) -> StoreResult<Medication> {
        let mut med = self
            .store
            .get_medication(medication_id)?
            .ok_or_else(|| StoreError::NotFound(format!("medication {medication_id}")))?;

        // Log first: if the medication write below fails, the dose is
        // still on record.
        let mut log = DoseLog::new(med.id.clone(), now);
        log.administered_by = administered_by;
        log.notes = notes;
        self.store.append_log(log)?;

        med.last_given = Some(day_of(now));
        med.next_due = advance(med.schedule, med.next_due);
        med.consume_dose();
        self.store.update_medication(med.clone())?;

        self.reschedule_reminders(day_of(now));
        Ok(med)
    }

    /// Mark a daily task complete for today. The task row itself is the
    /// record; no separate log is written for this variant.
    pub fn complete_task(&mut self, task_id: &str, now: DateTime<Utc>) -> StoreResult<CareTask> {
        let mut task = self
            .store
            .get_task(task_id)?
            .ok_or_else(|| StoreError::NotFound(format!("task {task_id}")))?;

        task.is_completed = true;
        task.completed_at = Some(now);
        self.store.update_task(task.clone())?;

        self.reschedule_reminders(day_of(now));
        Ok(task)
    }

    /// Clear completion on every task completed today, returning how
    /// many were reset. Running it twice is the same as running it
    /// once. Medications are untouched: their state only moves forward
    /// through `next_due`.
    pub fn reset_today(&mut self, today: NaiveDate) -> StoreResult<usize> {
        let mut tasks = self.store.tasks()?;
        let mut reset = 0;
        for task in tasks.iter_mut() {
            let completed_today = task
                .completed_at
                .map(|at| at.date_naive() == today)
                .unwrap_or(false);
            if completed_today {
                task.is_completed = false;
                task.completed_at = None;
                reset += 1;
            }
        }
        if reset > 0 {
            self.store.save_tasks(&tasks)?;
        }
        Ok(reset)
    }

    /// Best-effort reminder rescheduling after a persisted mutation.
    /// Failures are logged and swallowed; they never roll back or fail
    /// the completion write.
    fn reschedule_reminders(&mut self, today: NaiveDate) {
        let plan = match (self.store.snapshot(), self.store.settings()) {
            (Ok(snapshot), Ok(settings)) => plan_reminders(&snapshot, &settings, today),
            (Err(err), _) | (_, Err(err)) => {
                tracing::warn!(error = %err, "state unreadable; skipping reminder rescheduling");
                return;
            }
        };
        if let Err(err) = push_reminders(self.notifier, &plan) {
            tracing::warn!(error = %err, "reminder rescheduling failed");
        }
    }
}
