//! Catalog data model: assessment records and the persisted cache envelope.

use serde::{Deserialize, Serialize};

/// Sentinel for records whose human-readable name could not be resolved
/// at fetch time. RepairTask rewrites these in the background.
pub const UNNAMED_PLACEHOLDER: &str = "Unknown Product";

/// One assessment product from the SHL catalog.
///
/// Identity is `url`; a catalog never holds two records with the same
/// URL. Values are immutable after creation except for name repair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub name: String,
    pub url: String,
    pub remote_testing: bool,
    pub adaptive_support: bool,
    pub duration: String,
    pub test_type: String,
}

impl Assessment {
    /// Whether this record still carries an unresolved name.
    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty() || self.name == UNNAMED_PLACEHOLDER
    }
}

/// Persisted cache schema: `{"timestamp": epoch-seconds, "assessments": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEnvelope {
    pub timestamp: i64,
    pub assessments: Vec<Assessment>,
}

/// Structured attributes the oracle extracts from a product page.
///
/// Field defaults mirror the fixed fallback attribute set, so a reply
/// that is valid JSON but misses a key still deserializes.
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentAttributes {
    #[serde(default = "default_remote_testing")]
    pub remote_testing: bool,
    #[serde(default)]
    pub adaptive_support: bool,
    #[serde(default = "default_duration")]
    pub duration: String,
    #[serde(default = "default_test_type")]
    pub test_type: String,
}

fn default_remote_testing() -> bool {
    true
}

fn default_duration() -> String {
    "20-30 minutes".to_string()
}

fn default_test_type() -> String {
    "Assessment".to_string()
}

impl Default for AssessmentAttributes {
    fn default() -> Self {
        Self {
            remote_testing: true,
            adaptive_support: false,
            duration: default_duration(),
            test_type: default_test_type(),
        }
    }
}

/// Curated fallback catalog, served when a refresh yields zero records
/// so downstream consumers never observe an empty catalog.
pub fn default_catalog() -> Vec<Assessment> {
    vec![
        Assessment {
            name: "Verify Interactive".to_string(),
            url: "https://www.shl.com/solutions/products/verify-interactive/".to_string(),
            remote_testing: true,
            adaptive_support: true,
            duration: "10-15 minutes".to_string(),
            test_type: "Cognitive ability".to_string(),
        },
        Assessment {
            name: "Occupational Personality Questionnaire (OPQ)".to_string(),
            url: "https://www.shl.com/solutions/products/opq-personality-test/".to_string(),
            remote_testing: true,
            adaptive_support: false,
            duration: "25-40 minutes".to_string(),
            test_type: "Personality assessment".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unnamed_detection() {
        let mut a = default_catalog().remove(0);
        assert!(!a.is_unnamed());

        a.name = UNNAMED_PLACEHOLDER.to_string();
        assert!(a.is_unnamed());

        a.name = String::new();
        assert!(a.is_unnamed());
    }

    #[test]
    fn test_attributes_deserialize_with_missing_keys() {
        let attrs: AssessmentAttributes =
            serde_json::from_str(r#"{"adaptive_support": true}"#).unwrap();
        assert!(attrs.remote_testing);
        assert!(attrs.adaptive_support);
        assert_eq!(attrs.duration, "20-30 minutes");
        assert_eq!(attrs.test_type, "Assessment");
    }

    #[test]
    fn test_envelope_schema_round_trip() {
        let envelope = CacheEnvelope {
            timestamp: 1_700_000_000,
            assessments: default_catalog(),
        };
        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains("\"timestamp\":1700000000"));
        assert!(json.contains("\"remote_testing\":true"));

        let parsed: CacheEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.assessments, envelope.assessments);
    }
}
