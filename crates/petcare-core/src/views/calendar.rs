//! Calendar projector: per-day occurrences for a visible month.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{CareItem, Occurrence, OccurrenceStatus};
use crate::schedule::{days_in_month, dose_status};
use crate::store::Snapshot;

/// One day cell of the month grid.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_today: bool,
    pub occurrences: Vec<Occurrence>,
}

impl DayCell {
    pub fn has_completed(&self) -> bool {
        self.has_status(OccurrenceStatus::Completed)
    }

    pub fn has_missed(&self) -> bool {
        self.has_status(OccurrenceStatus::Missed)
    }

    pub fn has_scheduled(&self) -> bool {
        self.has_status(OccurrenceStatus::Scheduled)
    }

    fn has_status(&self, status: OccurrenceStatus) -> bool {
        self.occurrences.iter().any(|occ| occ.status == status)
    }
}

/// A whole month of day cells, ready for grid rendering.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    /// Empty grid cells before day 1 (Sunday-first week)
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
}

/// Project the visible `(year, month)` into day cells.
///
/// Each medication whose `next_due` falls inside the month contributes
/// one synthesized occurrence on that day. A second pass over the dose
/// logs adds completed occurrences for days the first pass did not
/// cover, so history is never lost when `next_due` has moved on to a
/// different month. At most one entry per medication per day.
pub fn month_view(snapshot: &Snapshot, year: i32, month: u32, today: NaiveDate) -> MonthView {
    let (Some(first), Some(day_count)) = (
        NaiveDate::from_ymd_opt(year, month, 1),
        days_in_month(year, month),
    ) else {
        return MonthView {
            year,
            month,
            leading_blanks: 0,
            days: Vec::new(),
        };
    };

    let mut by_day: BTreeMap<NaiveDate, Vec<Occurrence>> = BTreeMap::new();

    for med in &snapshot.medications {
        let Some(pet) = snapshot.pets.iter().find(|pet| pet.id == med.pet_id) else {
            continue;
        };
        let due = med.next_due;
        if due.year() != year || due.month() != month {
            continue;
        }
        by_day.entry(due).or_default().push(Occurrence {
            item: CareItem::Medication(med.clone()),
            pet: pet.clone(),
            date: due,
            status: dose_status(med, &snapshot.logs, due, today),
        });
    }

    for log in &snapshot.logs {
        let log_day = log.given_at.date_naive();
        if log_day.year() != year || log_day.month() != month {
            continue;
        }
        let Some(med) = snapshot
            .medications
            .iter()
            .find(|med| med.id == log.medication_id)
        else {
            continue;
        };
        let Some(pet) = snapshot.pets.iter().find(|pet| pet.id == med.pet_id) else {
            continue;
        };

        let cell = by_day.entry(log_day).or_default();
        if cell.iter().any(|occ| occ.item.id() == med.id) {
            continue;
        }
        cell.push(Occurrence {
            item: CareItem::Medication(med.clone()),
            pet: pet.clone(),
            date: log_day,
            status: OccurrenceStatus::Completed,
        });
    }

    let days = (1..=day_count)
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .map(|date| DayCell {
            date,
            is_today: date == today,
            occurrences: by_day.remove(&date).unwrap_or_default(),
        })
        .collect();

    MonthView {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    }
}
