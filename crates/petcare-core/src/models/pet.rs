//! Pet models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One weight observation in a pet's history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightEntry {
    /// Day of the observation
    pub date: NaiveDate,
    /// Weight in the household's unit of choice
    pub weight: f64,
}

/// A pet in the household.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// Local UUID, generated at creation
    pub id: String,
    /// Display name
    pub name: String,
    /// Photo location understood by the shell
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_uri: Option<String>,
    /// Species (free text, e.g. "Dog")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    /// Breed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    /// Birth date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    /// Coat color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Weight observations, in append order
    #[serde(default)]
    pub weight_history: Vec<WeightEntry>,
}

impl Pet {
    /// Create a new pet with just a name.
    pub fn new(name: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            photo_uri: None,
            species: None,
            breed: None,
            birth_date: None,
            color: None,
            weight_history: Vec::new(),
        }
    }

    /// Most recently appended weight, if any.
    pub fn current_weight(&self) -> Option<f64> {
        self.weight_history.last().map(|entry| entry.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_pet() {
        let pet = Pet::new("Max".into());
        assert_eq!(pet.id.len(), 36);
        assert_eq!(pet.name, "Max");
        assert!(pet.current_weight().is_none());
    }

    #[test]
    fn test_current_weight_is_latest() {
        let mut pet = Pet::new("Max".into());
        pet.weight_history.push(WeightEntry {
            date: day(2024, 1, 1),
            weight: 29.0,
        });
        pet.weight_history.push(WeightEntry {
            date: day(2024, 1, 5),
            weight: 30.5,
        });
        assert_eq!(pet.current_weight(), Some(30.5));
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut pet = Pet::new("Max".into());
        pet.birth_date = Some(day(2020, 6, 1));
        let json = serde_json::to_string(&pet).unwrap();
        assert!(json.contains("\"birthDate\""));
        assert!(json.contains("\"weightHistory\""));
        assert!(!json.contains("photoUri"));
    }
}
