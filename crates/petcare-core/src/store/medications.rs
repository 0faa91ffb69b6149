//! Medication collection operations.

use super::{
    require_name, require_quantity, EntityStore, Storage, StoreResult, MEDICATIONS_KEY,
};
use crate::models::Medication;

impl<S: Storage> EntityStore<S> {
    /// All medications.
    pub fn medications(&self) -> StoreResult<Vec<Medication>> {
        self.load(MEDICATIONS_KEY)
    }

    /// Look up one medication by id.
    pub fn get_medication(&self, medication_id: &str) -> StoreResult<Option<Medication>> {
        Ok(self
            .medications()?
            .into_iter()
            .find(|med| med.id == medication_id))
    }

    /// Medications belonging to one pet.
    pub fn medications_for_pet(&self, pet_id: &str) -> StoreResult<Vec<Medication>> {
        Ok(self
            .medications()?
            .into_iter()
            .filter(|med| med.pet_id == pet_id)
            .collect())
    }

    /// Add a new medication.
    pub fn add_medication(&mut self, medication: Medication) -> StoreResult<Medication> {
        validate_medication(&medication)?;
        let mut medications = self.medications()?;
        medications.push(medication.clone());
        self.save(MEDICATIONS_KEY, &medications)?;
        Ok(medication)
    }

    /// Replace an existing medication. Returns false when the id is
    /// unknown.
    pub fn update_medication(&mut self, medication: Medication) -> StoreResult<bool> {
        validate_medication(&medication)?;
        let mut medications = self.medications()?;
        let mut found = false;
        for slot in medications.iter_mut() {
            if slot.id == medication.id {
                *slot = medication.clone();
                found = true;
            }
        }
        if found {
            self.save(MEDICATIONS_KEY, &medications)?;
        }
        Ok(found)
    }

    /// Delete a medication. Its dose logs stay behind as orphans.
    pub fn delete_medication(&mut self, medication_id: &str) -> StoreResult<bool> {
        let mut medications = self.medications()?;
        let before = medications.len();
        medications.retain(|med| med.id != medication_id);
        if medications.len() == before {
            return Ok(false);
        }
        self.save(MEDICATIONS_KEY, &medications)?;
        Ok(true)
    }
}

fn validate_medication(medication: &Medication) -> StoreResult<()> {
    require_name(&medication.name, "medication name")?;
    require_name(&medication.dosage, "dosage")?;
    require_quantity(medication.remaining_quantity, "remaining quantity")?;
    require_quantity(medication.total_quantity, "total quantity")?;
    require_quantity(medication.refill_reminder_threshold, "refill threshold")?;
    Ok(())
}
