//! Pet collection operations.

use chrono::NaiveDate;

use super::{
    require_name, require_quantity, EntityStore, Storage, StoreError, StoreResult,
    MEDICATIONS_KEY, PETS_KEY, TASKS_KEY,
};
use crate::models::{CareTask, Medication, Pet, WeightEntry};

impl<S: Storage> EntityStore<S> {
    /// All pets.
    pub fn pets(&self) -> StoreResult<Vec<Pet>> {
        self.load(PETS_KEY)
    }

    /// Look up one pet by id.
    pub fn get_pet(&self, pet_id: &str) -> StoreResult<Option<Pet>> {
        Ok(self.pets()?.into_iter().find(|pet| pet.id == pet_id))
    }

    /// Add a new pet.
    pub fn add_pet(&mut self, pet: Pet) -> StoreResult<Pet> {
        require_name(&pet.name, "pet name")?;
        let mut pets = self.pets()?;
        pets.push(pet.clone());
        self.save(PETS_KEY, &pets)?;
        Ok(pet)
    }

    /// Replace an existing pet. Returns false when the id is unknown.
    pub fn update_pet(&mut self, pet: Pet) -> StoreResult<bool> {
        require_name(&pet.name, "pet name")?;
        let mut pets = self.pets()?;
        let mut found = false;
        for slot in pets.iter_mut() {
            if slot.id == pet.id {
                *slot = pet.clone();
                found = true;
            }
        }
        if found {
            self.save(PETS_KEY, &pets)?;
        }
        Ok(found)
    }

    /// Delete a pet, cascading to its medications and tasks.
    ///
    /// Dose logs are deliberately left in place: they become orphaned
    /// facts that the read paths filter out, preserving the append-only
    /// history.
    pub fn delete_pet(&mut self, pet_id: &str) -> StoreResult<bool> {
        let mut pets = self.pets()?;
        let before = pets.len();
        pets.retain(|pet| pet.id != pet_id);
        if pets.len() == before {
            return Ok(false);
        }

        let medications: Vec<Medication> = self
            .medications()?
            .into_iter()
            .filter(|med| med.pet_id != pet_id)
            .collect();
        let tasks: Vec<CareTask> = self
            .tasks()?
            .into_iter()
            .filter(|task| task.pet_id != pet_id)
            .collect();

        self.save(PETS_KEY, &pets)?;
        self.save(MEDICATIONS_KEY, &medications)?;
        self.save(TASKS_KEY, &tasks)?;
        Ok(true)
    }

    /// Append a weight observation to a pet's history.
    pub fn append_weight(
        &mut self,
        pet_id: &str,
        date: NaiveDate,
        weight: f64,
    ) -> StoreResult<Pet> {
        require_quantity(Some(weight), "weight")?;
        let mut pets = self.pets()?;
        let pet = pets
            .iter_mut()
            .find(|pet| pet.id == pet_id)
            .ok_or_else(|| StoreError::NotFound(format!("pet {pet_id}")))?;
        pet.weight_history.push(WeightEntry { date, weight });
        let updated = pet.clone();
        self.save(PETS_KEY, &pets)?;
        Ok(updated)
    }
}
