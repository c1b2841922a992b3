//! Identifier types for the queue simulator
//!
//! Customers are numbered sequentially per run in arrival order; runs are tagged
//! with a UUID so log lines and reports from different runs can be told apart.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Identity of a customer within a single run
///
/// Identities start at 1 and are assigned in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub u64);

impl CustomerId {
    /// The first identity handed out in a run
    pub const FIRST: CustomerId = CustomerId(1);

    /// Get the raw sequence number
    pub fn get(self) -> u64 {
        self.0
    }

    /// The identity following this one
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// Unique identifier for one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Create a new random run ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RUN_{}", self.0.simple())
    }
}

impl Serialize for RunId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("RUN_{}", self.0.simple()))
    }
}

impl<'de> Deserialize<'de> for RunId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let raw = s.strip_prefix("RUN_").unwrap_or(&s);
        let uuid = Uuid::parse_str(raw).map_err(serde::de::Error::custom)?;
        Ok(RunId(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_id_sequence() {
        let first = CustomerId::FIRST;
        assert_eq!(first.get(), 1);
        assert_eq!(first.next(), CustomerId(2));
        assert!(first < first.next());
    }

    #[test]
    fn test_customer_id_display() {
        assert_eq!(CustomerId(42).to_string(), "C42");
    }

    #[test]
    fn test_customer_id_serializes_as_number() {
        let json = serde_json::to_string(&CustomerId(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn test_run_id_uniqueness() {
        assert_ne!(RunId::new(), RunId::new());
    }

    #[test]
    fn test_run_id_serialization() {
        let run_id = RunId::new();
        let json = serde_json::to_string(&run_id).unwrap();
        assert!(json.contains("RUN_"));

        let parsed: RunId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, run_id);
    }

    #[test]
    fn test_run_id_accepts_raw_uuid() {
        let uuid = Uuid::new_v4();
        let json = format!("\"{}\"", uuid);
        let parsed: RunId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.0, uuid);
    }
}
