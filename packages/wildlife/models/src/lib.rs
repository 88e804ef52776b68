#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Wildlife telemetry domain types shared across the `WildGuard` system.
//!
//! This crate defines the canonical track record, hotspot, alert, and risk
//! assessment types. All analysis crates (detection, scoring, reporting)
//! operate on these shared types; the server crate serializes them directly
//! to JSON, so field names here match the fixture files on disk.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One GPS/speed observation for a tracked animal at a point in time.
///
/// Numeric fields default to zero and the entity id to an empty string when
/// absent, so partially-filled records from callers are accepted rather than
/// rejected at the deserialization boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    /// Identifier of the tracked animal (e.g. `"rhino_001"`).
    #[serde(default)]
    pub entity_id: String,
    /// Observation time as an ISO 8601 UTC string, passed through verbatim.
    #[serde(default)]
    pub timestamp_utc: String,
    /// Latitude in decimal degrees.
    #[serde(default)]
    pub latitude: f64,
    /// Longitude in decimal degrees.
    #[serde(default)]
    pub longitude: f64,
    /// Observed ground speed in km/h.
    #[serde(default)]
    pub speed_kmh: f64,
}

/// A fixed geographic coordinate historically associated with poaching risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Hotspot identifier (e.g. `"HS001"`).
    pub id: String,
    /// Human-readable name (e.g. `"Northern Ridge"`).
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// The hotspot reference dataset as stored in the fixture file — a wrapper
/// object rather than a bare array, matching the original data layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotspotSet {
    /// All known hotspots.
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

/// Category tag for a triggered movement-anomaly rule.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlertReason {
    /// Current speed fell below 20% of the entity's baseline speed.
    SuddenSpeedDrop,
    /// Record within the proximity threshold of a known hotspot.
    NearHotspot,
    /// Two consecutive near-zero-speed records for the same entity.
    ProlongedImmobility,
}

impl AlertReason {
    /// Human-readable label for briefing text (e.g. "Sudden Speed Drop").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SuddenSpeedDrop => "Sudden Speed Drop",
            Self::NearHotspot => "Near Hotspot",
            Self::ProlongedImmobility => "Prolonged Immobility",
        }
    }
}

/// A flagged track record with the anomaly rules it triggered and an overall
/// confidence. Derived per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementAlert {
    /// Identifier of the tracked animal the alert concerns.
    #[serde(default)]
    pub entity_id: String,
    /// Timestamp of the flagged observation (ISO 8601 UTC string).
    #[serde(default)]
    pub timestamp: String,
    /// Latitude of the flagged observation.
    #[serde(default)]
    pub latitude: f64,
    /// Longitude of the flagged observation.
    #[serde(default)]
    pub longitude: f64,
    /// The metric that triggered the alert, e.g. `"speed_kmh=0.05"`.
    #[serde(default)]
    pub observed_metric: String,
    /// Every rule that triggered on this record, in rule evaluation order.
    #[serde(default)]
    pub reasons: Vec<AlertReason>,
    /// Highest confidence across triggered rules, in `[0, 1]`.
    #[serde(default)]
    pub confidence: f64,
}

/// A single finding from camera-trap image analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionFinding {
    /// What was detected (e.g. `"tire tracks"`).
    #[serde(default)]
    pub label: String,
    /// Detection confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence: f64,
    /// Threat severity in `[0, 1]`, weighted into the risk score.
    #[serde(default)]
    pub severity: f64,
    /// Free-form analyst notes.
    #[serde(default)]
    pub notes: String,
}

/// Coarse three-band classification derived from the composite risk score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatLevel {
    /// Score below 40: routine monitoring.
    Medium,
    /// Score 40-69: elevated patrol posture.
    High,
    /// Score 70 and above: immediate response.
    Critical,
}

impl ThreatLevel {
    /// Maps a composite risk score to its threat band.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            70.. => Self::Critical,
            40..=69 => Self::High,
            _ => Self::Medium,
        }
    }
}

/// The composite risk assessment returned by the scoring endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Composite score in `[0, 100]`.
    pub risk_score: u8,
    /// Three-band classification of the score.
    pub threat_level: ThreatLevel,
    /// One-sentence explanation of the score inputs.
    pub justification: String,
    /// Canned action list for the score's threat band.
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threat_level_bands() {
        assert_eq!(ThreatLevel::from_score(0), ThreatLevel::Medium);
        assert_eq!(ThreatLevel::from_score(39), ThreatLevel::Medium);
        assert_eq!(ThreatLevel::from_score(40), ThreatLevel::High);
        assert_eq!(ThreatLevel::from_score(69), ThreatLevel::High);
        assert_eq!(ThreatLevel::from_score(70), ThreatLevel::Critical);
        assert_eq!(ThreatLevel::from_score(100), ThreatLevel::Critical);
    }

    #[test]
    fn threat_level_serializes_screaming_snake() {
        let json = serde_json::to_string(&ThreatLevel::Critical).unwrap();
        assert_eq!(json, "\"CRITICAL\"");
    }

    #[test]
    fn alert_reason_serializes_snake_case() {
        let json = serde_json::to_string(&AlertReason::SuddenSpeedDrop).unwrap();
        assert_eq!(json, "\"sudden_speed_drop\"");
    }

    #[test]
    fn track_record_tolerates_missing_fields() {
        let record: TrackRecord = serde_json::from_str("{}").unwrap();
        assert!(record.entity_id.is_empty());
        assert!(record.speed_kmh.abs() < f64::EPSILON);
    }
}
