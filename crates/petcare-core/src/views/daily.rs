//! Daily aggregator: today's worklist across all pets.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{CareItem, OccurrenceStatus};
use crate::schedule::{item_status, task_status};
use crate::store::Snapshot;

/// One row of the daily worklist, joined with its pet's display fields.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorklistEntry {
    pub item: CareItem,
    pub pet_name: String,
    pub pet_photo: Option<String>,
    pub status: OccurrenceStatus,
}

/// Pending entries for one pet, in worklist order.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PetGroup {
    pub pet_id: String,
    pub pet_name: String,
    pub entries: Vec<WorklistEntry>,
}

/// Today's work, partitioned into pending (grouped by pet) and
/// completed (flat).
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyWorklist {
    pub pending: Vec<PetGroup>,
    pub completed: Vec<WorklistEntry>,
}

impl DailyWorklist {
    pub fn pending_count(&self) -> usize {
        self.pending.iter().map(|group| group.entries.len()).sum()
    }

    pub fn is_all_done(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Project today's occurrences across tasks and due medications into a
/// single ordered worklist.
///
/// Tasks are kept when created today or not yet completed today;
/// medications are kept when due today and not yet completed. Completed
/// entries sort after pending ones, ties broken by time-slot order.
pub fn daily_worklist(snapshot: &Snapshot, today: NaiveDate) -> DailyWorklist {
    let mut entries: Vec<WorklistEntry> = Vec::new();

    for task in &snapshot.tasks {
        if task.created_date != today && task.completed_on(today) {
            continue;
        }
        entries.push(make_entry(
            snapshot,
            CareItem::Task(task.clone()),
            task_status(task, today, today),
        ));
    }

    for med in &snapshot.medications {
        if med.next_due != today {
            continue;
        }
        let status = item_status(
            &CareItem::Medication(med.clone()),
            &snapshot.logs,
            today,
            today,
        );
        if status == OccurrenceStatus::Completed {
            continue;
        }
        entries.push(make_entry(snapshot, CareItem::Medication(med.clone()), status));
    }

    entries.sort_by_key(|entry| {
        (
            entry.status == OccurrenceStatus::Completed,
            entry.item.time_slot(),
        )
    });

    let mut pending: Vec<PetGroup> = Vec::new();
    let mut completed: Vec<WorklistEntry> = Vec::new();

    for entry in entries {
        if entry.status == OccurrenceStatus::Completed {
            completed.push(entry);
            continue;
        }
        let pet_id = entry.item.pet_id().to_string();
        match pending.iter_mut().find(|group| group.pet_id == pet_id) {
            Some(group) => group.entries.push(entry),
            None => pending.push(PetGroup {
                pet_id,
                pet_name: entry.pet_name.clone(),
                entries: vec![entry],
            }),
        }
    }

    DailyWorklist { pending, completed }
}

fn make_entry(snapshot: &Snapshot, item: CareItem, status: OccurrenceStatus) -> WorklistEntry {
    let pet = snapshot.pets.iter().find(|pet| pet.id == item.pet_id());
    WorklistEntry {
        pet_name: pet
            .map(|pet| pet.name.clone())
            .unwrap_or_else(|| "Unknown Pet".into()),
        pet_photo: pet.and_then(|pet| pet.photo_uri.clone()),
        item,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CareTask, Medication, Pet, Schedule, TaskType, TimeSlot};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(pet_id: &str, name: &str, slot: TimeSlot) -> CareTask {
        CareTask::new(
            pet_id.into(),
            name.into(),
            TaskType::Other,
            slot,
            day(2024, 1, 10),
        )
    }

    #[test]
    fn test_partition_and_slot_order() {
        let today = day(2024, 1, 10);
        let pet = Pet::new("Max".into());

        let morning = task(&pet.id, "Morning kibble", TimeSlot::Morning);
        let evening = task(&pet.id, "Evening walk", TimeSlot::Evening);
        let mut noon = task(&pet.id, "Midday meds", TimeSlot::Noon);
        noon.is_completed = true;
        noon.completed_at = "2024-01-10T12:05:00Z".parse().ok();

        let snapshot = Snapshot {
            pets: vec![pet.clone()],
            // Deliberately out of slot order
            tasks: vec![evening.clone(), noon, morning.clone()],
            ..Snapshot::default()
        };

        let worklist = daily_worklist(&snapshot, today);

        assert_eq!(worklist.pending.len(), 1);
        let group = &worklist.pending[0];
        assert_eq!(group.pet_name, "Max");
        let names: Vec<&str> = group
            .entries
            .iter()
            .map(|entry| entry.item.display_name())
            .collect();
        assert_eq!(names, vec!["Morning kibble", "Evening walk"]);

        assert_eq!(worklist.completed.len(), 1);
        assert_eq!(worklist.completed[0].item.display_name(), "Midday meds");
        assert_eq!(worklist.pending_count(), 2);
        assert!(!worklist.is_all_done());
    }

    #[test]
    fn test_pending_grouped_by_first_appearance() {
        let today = day(2024, 1, 10);
        let max = Pet::new("Max".into());
        let luna = Pet::new("Luna".into());

        let snapshot = Snapshot {
            pets: vec![max.clone(), luna.clone()],
            tasks: vec![
                task(&max.id, "Max breakfast", TimeSlot::Morning),
                task(&luna.id, "Luna breakfast", TimeSlot::Morning),
                task(&max.id, "Max walk", TimeSlot::Evening),
            ],
            ..Snapshot::default()
        };

        let worklist = daily_worklist(&snapshot, today);
        assert_eq!(worklist.pending.len(), 2);
        assert_eq!(worklist.pending[0].pet_name, "Max");
        assert_eq!(worklist.pending[0].entries.len(), 2);
        assert_eq!(worklist.pending[1].pet_name, "Luna");
    }

    #[test]
    fn test_medication_due_today_joins_worklist() {
        let today = day(2024, 1, 10);
        let pet = Pet::new("Max".into());

        let due = Medication::new(
            pet.id.clone(),
            "Heartgard".into(),
            "1 chewable".into(),
            Schedule::Monthly,
            today,
        );
        let mut taken = Medication::new(
            pet.id.clone(),
            "Apoquel".into(),
            "16mg".into(),
            Schedule::Daily,
            today,
        );
        taken.last_given = Some(today);
        let later = Medication::new(
            pet.id.clone(),
            "Revolution".into(),
            "1 vial".into(),
            Schedule::Monthly,
            day(2024, 1, 20),
        );

        let snapshot = Snapshot {
            pets: vec![pet],
            medications: vec![due, taken, later],
            ..Snapshot::default()
        };

        let worklist = daily_worklist(&snapshot, today);
        assert_eq!(worklist.pending_count(), 1);
        assert_eq!(
            worklist.pending[0].entries[0].item.display_name(),
            "Heartgard"
        );
        // Already-taken and not-yet-due medications stay off the list
        assert!(worklist.completed.is_empty());
    }

    #[test]
    fn test_missing_pet_falls_back_to_placeholder() {
        let today = day(2024, 1, 10);
        let snapshot = Snapshot {
            tasks: vec![task("ghost-pet", "Feed", TimeSlot::Morning)],
            ..Snapshot::default()
        };
        let worklist = daily_worklist(&snapshot, today);
        assert_eq!(worklist.pending[0].pet_name, "Unknown Pet");
    }

    #[test]
    fn test_task_completed_yesterday_reappears_today() {
        let today = day(2024, 1, 11);
        let pet = Pet::new("Max".into());
        let mut stale = task(&pet.id, "Morning kibble", TimeSlot::Morning);
        stale.is_completed = true;
        stale.completed_at = "2024-01-10T08:00:00Z".parse().ok();

        let snapshot = Snapshot {
            pets: vec![pet],
            tasks: vec![stale],
            ..Snapshot::default()
        };

        let worklist = daily_worklist(&snapshot, today);
        assert_eq!(worklist.pending_count(), 1);
        assert!(worklist.completed.is_empty());
    }
}
