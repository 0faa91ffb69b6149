//! Derived occurrence types shared by the read-path views.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CareTask, Medication, Pet, TimeSlot};

/// Computed state of one occurrence on one calendar day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OccurrenceStatus {
    Scheduled,
    Completed,
    Missed,
}

/// One scheduled item, unifying the two recurrence variants so the
/// engine and the aggregators are written once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CareItem {
    Medication(Medication),
    Task(CareTask),
}

impl CareItem {
    pub fn id(&self) -> &str {
        match self {
            CareItem::Medication(med) => &med.id,
            CareItem::Task(task) => &task.id,
        }
    }

    pub fn pet_id(&self) -> &str {
        match self {
            CareItem::Medication(med) => &med.pet_id,
            CareItem::Task(task) => &task.pet_id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            CareItem::Medication(med) => &med.name,
            CareItem::Task(task) => &task.task_name,
        }
    }

    /// Slot used for worklist ordering. Tasks carry one directly;
    /// medications are slotted by their reminder hour, defaulting to
    /// Morning when none is set.
    pub fn time_slot(&self) -> TimeSlot {
        match self {
            CareItem::Task(task) => task.time_slot,
            CareItem::Medication(med) => med
                .reminder_time
                .as_deref()
                .and_then(parse_hour)
                .map(TimeSlot::for_hour)
                .unwrap_or(TimeSlot::Morning),
        }
    }
}

fn parse_hour(time: &str) -> Option<u32> {
    let hour: u32 = time.split(':').next()?.parse().ok()?;
    (hour < 24).then_some(hour)
}

/// A derived, never-persisted instance of a scheduled item on a specific
/// calendar day. Computed fresh on every read.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub item: CareItem,
    pub pet: Pet,
    pub date: NaiveDate,
    pub status: OccurrenceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Schedule, TaskType};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_medication_slot_from_reminder_time() {
        let mut med = Medication::new(
            "pet-1".into(),
            "Heartgard".into(),
            "1 chewable".into(),
            Schedule::Monthly,
            day(2024, 1, 8),
        );
        assert_eq!(CareItem::Medication(med.clone()).time_slot(), TimeSlot::Morning);

        med.reminder_time = Some("19:30".into());
        assert_eq!(CareItem::Medication(med.clone()).time_slot(), TimeSlot::Evening);

        med.reminder_time = Some("not a time".into());
        assert_eq!(CareItem::Medication(med).time_slot(), TimeSlot::Morning);
    }

    #[test]
    fn test_task_slot_passthrough() {
        let task = CareTask::new(
            "pet-1".into(),
            "Evening walk".into(),
            TaskType::Exercise,
            TimeSlot::Evening,
            day(2024, 1, 9),
        );
        assert_eq!(CareItem::Task(task).time_slot(), TimeSlot::Evening);
    }
}
