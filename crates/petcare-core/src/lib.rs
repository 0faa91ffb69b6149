//! PetCare Core Library
//!
//! Local-first recurring-schedule and completion-state engine for a pet
//! care checklist app.
//!
//! # Architecture
//!
//! ```text
//!              ┌──────────────────────────────────────┐
//!              │        Storage (key-value blobs)     │
//!              └──────────────────┬───────────────────┘
//!                                 │
//!                       ┌─────────▼─────────┐
//!                       │    EntityStore    │  pets / medications
//!                       │   (CRUD + wipe)   │  tasks / dose logs
//!                       └─────────┬─────────┘
//!                                 │ Snapshot
//!              ┌──────────────────┼──────────────────┐
//!              │                  │                  │
//!        ┌─────▼─────┐     ┌──────▼──────┐    ┌──────▼──────┐
//!        │   Daily   │     │  Calendar   │    │   History   │
//!        │ Worklist  │     │  Projector  │    │  Projector  │
//!        └───────────┘     └─────────────┘    └─────────────┘
//!              read paths (pure, recomputed on every call)
//!
//!        ┌───────────────────────────────────────────┐
//!        │   Coordinator (sole completion write path)│
//!        │   log → advance next_due → persist        │──▶ Notifier
//!        └───────────────────────────────────────────┘    (best effort)
//! ```
//!
//! # Core Principle
//!
//! **Occurrence status is always derived, never stored.** The recurrence
//! engine recomputes completed/missed/scheduled from the entity state
//! and the append-only dose logs on every read, so a torn write can
//! never show a dose as missing once its log exists.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Pet, Medication, CareTask, DoseLog, …)
//! - [`store`]: Entity store over an injected key-value collaborator
//! - [`schedule`]: Pure recurrence engine (status + next-due advance)
//! - [`views`]: Daily worklist, calendar month, and history projections
//! - [`coordinator`]: Completion write path
//! - [`notify`]: Notification collaborator interface, reminder planner
//! - [`session`]: Mock auth context used to namespace storage keys

pub mod coordinator;
pub mod models;
pub mod notify;
pub mod schedule;
pub mod session;
pub mod store;
pub mod views;

// Re-export commonly used types
pub use coordinator::Coordinator;
pub use models::{
    CareItem, CareTask, DoseLog, Medication, Occurrence, OccurrenceStatus, Pet, Schedule,
    TaskType, TimeSlot, WeightEntry,
};
pub use notify::{DisabledNotifier, Notifier, Reminder};
pub use session::{Session, UserProfile};
pub use store::{AppSettings, EntityStore, MemoryStorage, Snapshot, Storage};
pub use views::{
    daily_worklist, history, month_view, DailyWorklist, DayCell, HistoryEntry, HistoryFilter,
    HistoryGroup, MonthView, PetGroup, TimeWindow, WorklistEntry,
};

use chrono::{DateTime, NaiveDate, Utc};

// =========================================================================
// Crate-level Error Type
// =========================================================================

#[derive(Debug, thiserror::Error)]
pub enum PetCareError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<store::StoreError> for PetCareError {
    fn from(e: store::StoreError) -> Self {
        match e {
            store::StoreError::Persistence(msg) => PetCareError::Storage(msg),
            store::StoreError::Json(err) => PetCareError::Serialization(err.to_string()),
            store::StoreError::NotFound(what) => PetCareError::NotFound(what),
            store::StoreError::Validation(why) => PetCareError::InvalidInput(why),
        }
    }
}

impl From<serde_json::Error> for PetCareError {
    fn from(e: serde_json::Error) -> Self {
        PetCareError::Serialization(e.to_string())
    }
}

pub type PetCareResult<T> = Result<T, PetCareError>;

// =========================================================================
// Main API Object
// =========================================================================

/// High-level handle bundling the entity store with the notification
/// collaborator. The mobile shell owns exactly one of these.
pub struct PetCare<S: Storage, N: Notifier> {
    store: EntityStore<S>,
    notifier: N,
}

impl PetCare<MemoryStorage, DisabledNotifier> {
    /// In-memory instance with notifications disabled (for tests and
    /// previews).
    pub fn in_memory() -> PetCareResult<Self> {
        Self::open(MemoryStorage::new(), DisabledNotifier)
    }
}

impl<S: Storage, N: Notifier> PetCare<S, N> {
    /// Wrap a storage backend and notifier, resuming the stored session
    /// (namespacing collections by the signed-in user) if one exists.
    pub fn open(storage: S, notifier: N) -> PetCareResult<Self> {
        let mut store = EntityStore::new(storage);
        if let Some(profile) = store.current_user()? {
            store.set_namespace(Some(profile.email));
        }
        Ok(Self { store, notifier })
    }

    /// Direct access to the entity store.
    pub fn store(&self) -> &EntityStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EntityStore<S> {
        &mut self.store
    }

    // =====================================================================
    // Session Operations
    // =====================================================================

    pub fn current_user(&self) -> PetCareResult<Option<UserProfile>> {
        Ok(self.store.current_user()?)
    }

    pub fn log_in(&mut self, email: &str) -> PetCareResult<Session> {
        Ok(self.store.log_in(email)?)
    }

    pub fn sign_up(&mut self, email: &str) -> PetCareResult<Session> {
        Ok(self.store.sign_up(email)?)
    }

    pub fn log_out(&mut self) -> PetCareResult<()> {
        Ok(self.store.log_out()?)
    }

    // =====================================================================
    // Entity Operations
    // =====================================================================

    pub fn add_pet(&mut self, pet: Pet) -> PetCareResult<Pet> {
        Ok(self.store.add_pet(pet)?)
    }

    pub fn update_pet(&mut self, pet: Pet) -> PetCareResult<bool> {
        Ok(self.store.update_pet(pet)?)
    }

    /// Delete a pet and everything it owns except its dose logs, which
    /// become orphans invisible to the read paths.
    pub fn delete_pet(&mut self, pet_id: &str) -> PetCareResult<bool> {
        Ok(self.store.delete_pet(pet_id)?)
    }

    pub fn append_weight(
        &mut self,
        pet_id: &str,
        date: NaiveDate,
        weight: f64,
    ) -> PetCareResult<Pet> {
        Ok(self.store.append_weight(pet_id, date, weight)?)
    }

    pub fn add_medication(&mut self, medication: Medication) -> PetCareResult<Medication> {
        Ok(self.store.add_medication(medication)?)
    }

    pub fn update_medication(&mut self, medication: Medication) -> PetCareResult<bool> {
        Ok(self.store.update_medication(medication)?)
    }

    pub fn delete_medication(&mut self, medication_id: &str) -> PetCareResult<bool> {
        Ok(self.store.delete_medication(medication_id)?)
    }

    pub fn add_task(&mut self, task: CareTask) -> PetCareResult<CareTask> {
        Ok(self.store.add_task(task)?)
    }

    pub fn update_task(&mut self, task: CareTask) -> PetCareResult<bool> {
        Ok(self.store.update_task(task)?)
    }

    pub fn delete_task(&mut self, task_id: &str) -> PetCareResult<bool> {
        Ok(self.store.delete_task(task_id)?)
    }

    pub fn settings(&self) -> PetCareResult<AppSettings> {
        Ok(self.store.settings()?)
    }

    pub fn save_settings(&mut self, settings: &AppSettings) -> PetCareResult<()> {
        Ok(self.store.save_settings(settings)?)
    }

    // =====================================================================
    // Read Paths
    // =====================================================================

    pub fn snapshot(&self) -> PetCareResult<Snapshot> {
        Ok(self.store.snapshot()?)
    }

    /// Today's worklist across all pets.
    pub fn today_worklist(&self, today: NaiveDate) -> PetCareResult<DailyWorklist> {
        Ok(daily_worklist(&self.store.snapshot()?, today))
    }

    /// Month grid of occurrences for the calendar screen.
    pub fn month_view(&self, year: i32, month: u32, today: NaiveDate) -> PetCareResult<MonthView> {
        Ok(month_view(&self.store.snapshot()?, year, month, today))
    }

    /// Filtered, day-grouped dose history.
    pub fn history(
        &self,
        filter: &HistoryFilter,
        now: DateTime<Utc>,
    ) -> PetCareResult<Vec<HistoryGroup>> {
        Ok(history(&self.store.snapshot()?, filter, now))
    }

    // =====================================================================
    // Completion Operations
    // =====================================================================

    /// Record an administered dose.
    pub fn record_dose(
        &mut self,
        medication_id: &str,
        now: DateTime<Utc>,
    ) -> PetCareResult<Medication> {
        Ok(Coordinator::new(&mut self.store, &mut self.notifier)
            .record_dose(medication_id, now, None, None)?)
    }

    /// Record an administered dose with attribution and notes.
    pub fn record_dose_with(
        &mut self,
        medication_id: &str,
        now: DateTime<Utc>,
        administered_by: Option<String>,
        notes: Option<String>,
    ) -> PetCareResult<Medication> {
        Ok(Coordinator::new(&mut self.store, &mut self.notifier).record_dose(
            medication_id,
            now,
            administered_by,
            notes,
        )?)
    }

    /// Mark a daily task complete.
    pub fn complete_task(&mut self, task_id: &str, now: DateTime<Utc>) -> PetCareResult<CareTask> {
        Ok(Coordinator::new(&mut self.store, &mut self.notifier).complete_task(task_id, now)?)
    }

    /// Un-complete every task completed today.
    pub fn reset_today(&mut self, today: NaiveDate) -> PetCareResult<usize> {
        Ok(Coordinator::new(&mut self.store, &mut self.notifier).reset_today(today)?)
    }
}
