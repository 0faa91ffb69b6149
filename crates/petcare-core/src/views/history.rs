//! History projector: filtered, day-grouped dose log timeline.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{DoseLog, Medication, Pet};
use crate::schedule::{day_label, day_start};
use crate::store::Snapshot;

/// Time window applied to the history list, relative to "now".
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimeWindow {
    All,
    Today,
    PastWeek,
    PastMonth,
}

/// Caller-selected history filters.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryFilter {
    pub window: TimeWindow,
    /// None = all pets
    pub pet_id: Option<String>,
}

impl Default for HistoryFilter {
    fn default() -> Self {
        Self {
            window: TimeWindow::All,
            pet_id: None,
        }
    }
}

/// One history row: a log joined to its medication and pet.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub log: DoseLog,
    pub medication: Medication,
    pub pet: Pet,
}

/// Consecutive history rows sharing a calendar day.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryGroup {
    /// Section header, e.g. "Monday, January 8, 2024"
    pub day_label: String,
    pub entries: Vec<HistoryEntry>,
}

/// Flattened, filtered history, sorted descending by administration
/// time. Logs whose medication or pet no longer exists are dropped
/// silently (orphans from cascade deletes).
pub fn history_entries(
    snapshot: &Snapshot,
    filter: &HistoryFilter,
    now: DateTime<Utc>,
) -> Vec<HistoryEntry> {
    let today_start = day_start(now);
    let boundary = match filter.window {
        TimeWindow::All => None,
        TimeWindow::Today => Some(today_start),
        TimeWindow::PastWeek => Some(today_start - chrono::Duration::days(7)),
        TimeWindow::PastMonth => Some(today_start - chrono::Duration::days(30)),
    };

    let mut entries: Vec<HistoryEntry> = snapshot
        .logs
        .iter()
        .filter_map(|log| {
            let medication = snapshot
                .medications
                .iter()
                .find(|med| med.id == log.medication_id)?;
            if let Some(pet_id) = &filter.pet_id {
                if &medication.pet_id != pet_id {
                    return None;
                }
            }
            let pet = snapshot
                .pets
                .iter()
                .find(|pet| pet.id == medication.pet_id)?;
            if let Some(boundary) = boundary {
                if log.given_at < boundary {
                    return None;
                }
            }
            Some(HistoryEntry {
                log: log.clone(),
                medication: medication.clone(),
                pet: pet.clone(),
            })
        })
        .collect();

    entries.sort_by(|a, b| b.log.given_at.cmp(&a.log.given_at));
    entries
}

/// History grouped by calendar day for section-header rendering.
/// Groups appear newest-day-first because the source order is already
/// sorted descending.
pub fn history(
    snapshot: &Snapshot,
    filter: &HistoryFilter,
    now: DateTime<Utc>,
) -> Vec<HistoryGroup> {
    let mut groups: Vec<HistoryGroup> = Vec::new();
    for entry in history_entries(snapshot, filter, now) {
        let label = day_label(entry.log.given_at.date_naive());
        match groups.last_mut() {
            Some(group) if group.day_label == label => group.entries.push(entry),
            _ => groups.push(HistoryGroup {
                day_label: label,
                entries: vec![entry],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Schedule;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(raw: &str) -> DateTime<Utc> {
        raw.parse().unwrap()
    }

    fn fixture() -> (Snapshot, DateTime<Utc>) {
        let max = Pet::new("Max".into());
        let luna = Pet::new("Luna".into());
        let heartgard = Medication::new(
            max.id.clone(),
            "Heartgard".into(),
            "1 chewable".into(),
            Schedule::Monthly,
            day(2024, 2, 8),
        );
        let drops = Medication::new(
            luna.id.clone(),
            "Ear drops".into(),
            "2 drops".into(),
            Schedule::Daily,
            day(2024, 1, 11),
        );

        let logs = vec![
            DoseLog::new(heartgard.id.clone(), at("2023-11-20T09:00:00Z")),
            DoseLog::new(heartgard.id.clone(), at("2024-01-08T09:00:00Z")),
            DoseLog::new(drops.id.clone(), at("2024-01-09T19:00:00Z")),
            DoseLog::new(drops.id.clone(), at("2024-01-10T08:30:00Z")),
            DoseLog::new("deleted-med".into(), at("2024-01-10T09:00:00Z")),
        ];

        let snapshot = Snapshot {
            pets: vec![max, luna],
            medications: vec![heartgard, drops],
            logs,
            ..Snapshot::default()
        };
        (snapshot, at("2024-01-10T15:00:00Z"))
    }

    #[test]
    fn test_sorted_descending_and_orphans_dropped() {
        let (snapshot, now) = fixture();
        let entries = history_entries(&snapshot, &HistoryFilter::default(), now);
        assert_eq!(entries.len(), 4); // orphan excluded
        let times: Vec<_> = entries.iter().map(|entry| entry.log.given_at).collect();
        let mut sorted = times.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(times, sorted);
    }

    #[test]
    fn test_windows_are_pure_narrowing() {
        let (snapshot, now) = fixture();
        let count = |window| {
            history_entries(
                &snapshot,
                &HistoryFilter {
                    window,
                    pet_id: None,
                },
                now,
            )
            .len()
        };

        let all = count(TimeWindow::All);
        let month = count(TimeWindow::PastMonth);
        let week = count(TimeWindow::PastWeek);
        let today = count(TimeWindow::Today);

        assert!(all >= month && month >= week && week >= today);
        assert_eq!(all, 4);
        assert_eq!(month, 3);
        assert_eq!(week, 3);
        assert_eq!(today, 1);
    }

    #[test]
    fn test_pet_filter() {
        let (snapshot, now) = fixture();
        let luna_id = snapshot.pets[1].id.clone();
        let entries = history_entries(
            &snapshot,
            &HistoryFilter {
                window: TimeWindow::All,
                pet_id: Some(luna_id),
            },
            now,
        );
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|entry| entry.pet.name == "Luna"));
    }

    #[test]
    fn test_grouped_by_day_newest_first() {
        let (snapshot, now) = fixture();
        let groups = history(&snapshot, &HistoryFilter::default(), now);
        assert_eq!(groups.len(), 4);
        assert_eq!(groups[0].day_label, "Wednesday, January 10, 2024");
        assert_eq!(groups[1].day_label, "Tuesday, January 9, 2024");
        assert_eq!(groups[3].day_label, "Monday, November 20, 2023");
        assert!(groups.iter().all(|group| !group.entries.is_empty()));
    }
}
