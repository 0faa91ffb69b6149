//! App settings, stored as a single JSON object.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::{EntityStore, Storage, StoreResult, SETTINGS_KEY};

/// User-level preferences consumed by the reminder planner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub notifications_enabled: bool,
    /// Lead time before a due occurrence, in minutes
    pub reminder_minutes_before: u32,
    pub dark_mode: bool,
    /// "HH:MM"; falls back to 09:00 when unparseable
    pub default_reminder_time: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            reminder_minutes_before: 15,
            dark_mode: false,
            default_reminder_time: "09:00".into(),
        }
    }
}

impl AppSettings {
    /// Parsed default reminder time, tolerating a corrupted string.
    pub fn reminder_time(&self) -> NaiveTime {
        parse_reminder_time(&self.default_reminder_time)
    }
}

pub(crate) fn parse_reminder_time(raw: &str) -> NaiveTime {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .unwrap_or_else(|_| NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default())
}

impl<S: Storage> EntityStore<S> {
    /// Current settings; defaults when nothing has been stored yet.
    pub fn settings(&self) -> StoreResult<AppSettings> {
        match self.storage().get(&self.scoped(SETTINGS_KEY))? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(AppSettings::default()),
        }
    }

    /// Persist settings.
    pub fn save_settings(&mut self, settings: &AppSettings) -> StoreResult<()> {
        let raw = serde_json::to_string(settings)?;
        let key = self.scoped(SETTINGS_KEY);
        self.storage_mut().set(&key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;

    #[test]
    fn test_defaults_when_absent() {
        let store = EntityStore::new(MemoryStorage::new());
        let settings = store.settings().unwrap();
        assert!(settings.notifications_enabled);
        assert_eq!(settings.reminder_minutes_before, 15);
    }

    #[test]
    fn test_round_trip() {
        let mut store = EntityStore::new(MemoryStorage::new());
        let mut settings = AppSettings::default();
        settings.dark_mode = true;
        settings.default_reminder_time = "07:30".into();
        store.save_settings(&settings).unwrap();

        let loaded = store.settings().unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(
            loaded.reminder_time(),
            NaiveTime::from_hms_opt(7, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_reminder_time_fallback() {
        let mut settings = AppSettings::default();
        settings.default_reminder_time = "not a clock".into();
        assert_eq!(
            settings.reminder_time(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
    }
}
