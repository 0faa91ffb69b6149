//! Care task collection operations.

use super::{require_name, EntityStore, Storage, StoreResult, TASKS_KEY};
use crate::models::CareTask;

impl<S: Storage> EntityStore<S> {
    /// All tasks.
    pub fn tasks(&self) -> StoreResult<Vec<CareTask>> {
        self.load(TASKS_KEY)
    }

    /// Look up one task by id.
    pub fn get_task(&self, task_id: &str) -> StoreResult<Option<CareTask>> {
        Ok(self.tasks()?.into_iter().find(|task| task.id == task_id))
    }

    /// Tasks belonging to one pet.
    pub fn tasks_for_pet(&self, pet_id: &str) -> StoreResult<Vec<CareTask>> {
        Ok(self
            .tasks()?
            .into_iter()
            .filter(|task| task.pet_id == pet_id)
            .collect())
    }

    /// Add a new task.
    pub fn add_task(&mut self, task: CareTask) -> StoreResult<CareTask> {
        require_name(&task.task_name, "task name")?;
        let mut tasks = self.tasks()?;
        tasks.push(task.clone());
        self.save(TASKS_KEY, &tasks)?;
        Ok(task)
    }

    /// Replace an existing task. Returns false when the id is unknown.
    pub fn update_task(&mut self, task: CareTask) -> StoreResult<bool> {
        require_name(&task.task_name, "task name")?;
        let mut tasks = self.tasks()?;
        let mut found = false;
        for slot in tasks.iter_mut() {
            if slot.id == task.id {
                *slot = task.clone();
                found = true;
            }
        }
        if found {
            self.save(TASKS_KEY, &tasks)?;
        }
        Ok(found)
    }

    /// Write the whole task collection back (coordinator bulk updates).
    pub(crate) fn save_tasks(&mut self, tasks: &[CareTask]) -> StoreResult<()> {
        self.save(TASKS_KEY, tasks)
    }

    /// Delete a task.
    pub fn delete_task(&mut self, task_id: &str) -> StoreResult<bool> {
        let mut tasks = self.tasks()?;
        let before = tasks.len();
        tasks.retain(|task| task.id != task_id);
        if tasks.len() == before {
            return Ok(false);
        }
        self.save(TASKS_KEY, &tasks)?;
        Ok(true)
    }
}
