//! Daily care task models (the time-slot recurrence variant).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Fixed daily period a task belongs to.
///
/// The derived order (Morning < Noon < Evening < Bedtime) is the display
/// and worklist sort order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimeSlot {
    Morning,
    Noon,
    Evening,
    Bedtime,
}

impl TimeSlot {
    /// All slots in chronological order.
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Noon,
        TimeSlot::Evening,
        TimeSlot::Bedtime,
    ];

    /// Nominal hour of day used when scheduling reminders for a slot.
    pub fn nominal_hour(self) -> u32 {
        match self {
            TimeSlot::Morning => 8,
            TimeSlot::Noon => 12,
            TimeSlot::Evening => 18,
            TimeSlot::Bedtime => 21,
        }
    }

    /// The slot a clock hour falls into.
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            0..=10 => TimeSlot::Morning,
            11..=14 => TimeSlot::Noon,
            15..=19 => TimeSlot::Evening,
            _ => TimeSlot::Bedtime,
        }
    }
}

/// Category of a care task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Medication,
    Feeding,
    Grooming,
    Exercise,
    Other,
}

/// A care task recurring every calendar day in a fixed time slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CareTask {
    /// Local UUID, generated at creation
    pub id: String,
    /// Owning pet (weak reference; lookup only)
    pub pet_id: String,
    /// Display name
    pub task_name: String,
    /// Category
    pub task_type: TaskType,
    /// Daily slot
    pub time_slot: TimeSlot,
    /// Free-text details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Raw completion flag; only meaningful together with `completed_at`.
    /// Read paths must go through [`CareTask::completed_on`].
    pub is_completed: bool,
    /// When the task was last marked complete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Day the task was created
    pub created_date: NaiveDate,
}

impl CareTask {
    /// Create a new task with the required fields.
    pub fn new(
        pet_id: String,
        task_name: String,
        task_type: TaskType,
        time_slot: TimeSlot,
        created_date: NaiveDate,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            pet_id,
            task_name,
            task_type,
            time_slot,
            details: None,
            is_completed: false,
            completed_at: None,
            created_date,
        }
    }

    /// Whether the task was completed on the given calendar day.
    ///
    /// This is the day-scoped reading of the completion flag: a stale
    /// `completed_at` from a previous day does not count, so the task
    /// reappears once the calendar day rolls over without any stored
    /// state being rewritten.
    pub fn completed_on(&self, day: NaiveDate) -> bool {
        self.is_completed
            && self
                .completed_at
                .map(|at| at.date_naive() == day)
                .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_time_slot_order() {
        assert!(TimeSlot::Morning < TimeSlot::Noon);
        assert!(TimeSlot::Noon < TimeSlot::Evening);
        assert!(TimeSlot::Evening < TimeSlot::Bedtime);
    }

    #[test]
    fn test_for_hour() {
        assert_eq!(TimeSlot::for_hour(7), TimeSlot::Morning);
        assert_eq!(TimeSlot::for_hour(12), TimeSlot::Noon);
        assert_eq!(TimeSlot::for_hour(18), TimeSlot::Evening);
        assert_eq!(TimeSlot::for_hour(23), TimeSlot::Bedtime);
    }

    #[test]
    fn test_completed_on_is_day_scoped() {
        let mut task = CareTask::new(
            "pet-1".into(),
            "Morning kibble".into(),
            TaskType::Feeding,
            TimeSlot::Morning,
            day(2024, 1, 9),
        );
        assert!(!task.completed_on(day(2024, 1, 10)));

        task.is_completed = true;
        task.completed_at = "2024-01-10T08:30:00Z".parse().ok();
        assert!(task.completed_on(day(2024, 1, 10)));
        // Stale flag from yesterday does not carry forward
        assert!(!task.completed_on(day(2024, 1, 11)));
    }

    #[test]
    fn test_completed_flag_without_timestamp() {
        let mut task = CareTask::new(
            "pet-1".into(),
            "Brush".into(),
            TaskType::Grooming,
            TimeSlot::Evening,
            day(2024, 1, 9),
        );
        task.is_completed = true;
        assert!(!task.completed_on(day(2024, 1, 9)));
    }
}
