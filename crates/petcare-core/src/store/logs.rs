//! Dose log collection operations. Append-only.

use super::{EntityStore, Storage, StoreResult, LOGS_KEY};
use crate::models::DoseLog;

impl<S: Storage> EntityStore<S> {
    /// All dose logs, in append order.
    pub fn logs(&self) -> StoreResult<Vec<DoseLog>> {
        self.load(LOGS_KEY)
    }

    /// Logs for one medication.
    pub fn logs_for_medication(&self, medication_id: &str) -> StoreResult<Vec<DoseLog>> {
        Ok(self
            .logs()?
            .into_iter()
            .filter(|log| log.medication_id == medication_id)
            .collect())
    }

    /// Append a log entry. Existing entries are never rewritten.
    pub fn append_log(&mut self, log: DoseLog) -> StoreResult<()> {
        let mut logs = self.logs()?;
        logs.push(log);
        self.save(LOGS_KEY, &logs)
    }
}
