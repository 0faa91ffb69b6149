//! Medication models and the calendar-interval schedule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Recurrence interval for a medication.
///
/// Serialized with the display strings the mobile shell stores
/// ("Every 3 Months", not "EveryThreeMonths").
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Schedule {
    Daily,
    Weekly,
    Monthly,
    #[serde(rename = "Every 3 Months")]
    EveryThreeMonths,
    #[serde(rename = "Every 6 Months")]
    EverySixMonths,
    Yearly,
}

impl Schedule {
    /// All intervals, in ascending length order.
    pub const ALL: [Schedule; 6] = [
        Schedule::Daily,
        Schedule::Weekly,
        Schedule::Monthly,
        Schedule::EveryThreeMonths,
        Schedule::EverySixMonths,
        Schedule::Yearly,
    ];
}

/// A recurring medication belonging to one pet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    /// Local UUID, generated at creation
    pub id: String,
    /// Owning pet (weak reference; lookup only)
    pub pet_id: String,
    /// Display name
    pub name: String,
    /// Dosage description (free text, e.g. "1 tablet")
    pub dosage: String,
    /// Recurrence interval
    pub schedule: Schedule,
    /// Day of the most recent administration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_given: Option<NaiveDate>,
    /// The authoritative next occurrence
    pub next_due: NaiveDate,
    /// Preferred reminder time ("HH:MM"), overrides the app default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
    /// First day of the course
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Last day of the course
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Doses left in the current package
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_quantity: Option<f64>,
    /// Package size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_quantity: Option<f64>,
    /// Remind about a refill once `remaining_quantity` drops to this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refill_reminder_threshold: Option<f64>,
    /// Additional notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Medication {
    /// Create a new medication with the required fields.
    pub fn new(
        pet_id: String,
        name: String,
        dosage: String,
        schedule: Schedule,
        next_due: NaiveDate,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            pet_id,
            name,
            dosage,
            schedule,
            last_given: None,
            next_due,
            reminder_time: None,
            start_date: None,
            end_date: None,
            remaining_quantity: None,
            total_quantity: None,
            refill_reminder_threshold: None,
            notes: None,
        }
    }

    /// Whether the remaining inventory has reached the refill threshold.
    ///
    /// Only meaningful when both counters are tracked; otherwise false.
    pub fn needs_refill(&self) -> bool {
        match (self.remaining_quantity, self.refill_reminder_threshold) {
            (Some(remaining), Some(threshold)) => remaining <= threshold,
            _ => false,
        }
    }

    /// Record one dose taken from the package, saturating at zero.
    pub fn consume_dose(&mut self) {
        if let Some(remaining) = self.remaining_quantity {
            self.remaining_quantity = Some((remaining - 1.0).max(0.0));
        }
    }
}
