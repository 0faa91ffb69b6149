//! Dose log models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An administered dose. Append-only; never mutated after creation.
///
/// A log may outlive the medication it references (the medication or its
/// pet can be deleted later). Such orphaned entries are filtered out on
/// read paths, never deleted retroactively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DoseLog {
    /// Medication this dose belongs to
    pub medication_id: String,
    /// Administration timestamp
    pub given_at: DateTime<Utc>,
    /// Who administered it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administered_by: Option<String>,
    /// Additional notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DoseLog {
    /// Create a log entry for a dose given now.
    pub fn new(medication_id: String, given_at: DateTime<Utc>) -> Self {
        Self {
            medication_id,
            given_at,
            administered_by: None,
            notes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let log = DoseLog::new("med-1".into(), "2024-01-08T09:00:00Z".parse().unwrap());
        let json = serde_json::to_string(&log).unwrap();
        assert!(json.contains("\"medicationId\""));
        assert!(json.contains("\"givenAt\""));
        assert!(!json.contains("administeredBy"));
    }
}
