//! Status derivation and next-due advancement.

use chrono::NaiveDate;

use super::dates::{add_days, add_months_clamped};
use crate::models::{CareItem, CareTask, DoseLog, Medication, OccurrenceStatus, Schedule};

/// Status of a medication occurrence on calendar day `day`.
///
/// Completed wins over everything: either `last_given` names the day, or
/// some log entry falls on it. The log check is deliberately independent
/// of `next_due`, so a dose whose medication write was lost after the log
/// write still reads back as completed.
pub fn dose_status(
    med: &Medication,
    logs: &[DoseLog],
    day: NaiveDate,
    today: NaiveDate,
) -> OccurrenceStatus {
    let completed = med.last_given == Some(day)
        || logs
            .iter()
            .any(|log| log.medication_id == med.id && log.given_at.date_naive() == day);

    if completed {
        OccurrenceStatus::Completed
    } else if day < today {
        OccurrenceStatus::Missed
    } else {
        OccurrenceStatus::Scheduled
    }
}

/// Status of a daily-slot task on calendar day `day`.
pub fn task_status(task: &CareTask, day: NaiveDate, today: NaiveDate) -> OccurrenceStatus {
    if task.completed_on(day) {
        OccurrenceStatus::Completed
    } else if day < today {
        OccurrenceStatus::Missed
    } else {
        OccurrenceStatus::Scheduled
    }
}

/// Status of either recurrence variant, for callers working with the
/// unified item type.
pub fn item_status(
    item: &CareItem,
    logs: &[DoseLog],
    day: NaiveDate,
    today: NaiveDate,
) -> OccurrenceStatus {
    match item {
        CareItem::Medication(med) => dose_status(med, logs, day, today),
        CareItem::Task(task) => task_status(task, day, today),
    }
}

/// Next due date: exactly one interval forward from the stored
/// `next_due`, with month/year overflow clamped to the last valid day.
///
/// When `next_due` has drifted more than one interval into the past the
/// result may itself still be in the past. That single-step behavior is
/// intentional: each recorded dose accounts for one scheduled occurrence,
/// so a backlog drains one completion at a time rather than being
/// silently skipped.
pub fn advance(schedule: Schedule, next_due: NaiveDate) -> NaiveDate {
    match schedule {
        Schedule::Daily => add_days(next_due, 1),
        Schedule::Weekly => add_days(next_due, 7),
        Schedule::Monthly => add_months_clamped(next_due, 1),
        Schedule::EveryThreeMonths => add_months_clamped(next_due, 3),
        Schedule::EverySixMonths => add_months_clamped(next_due, 6),
        Schedule::Yearly => add_months_clamped(next_due, 12),
    }
}
