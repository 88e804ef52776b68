#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the `WildGuard` server.
//!
//! These types are serialized to JSON for the REST API. Field names follow
//! the original wire format (snake_case, with the one `riskScore` exception
//! in the report request). Request types default every field so a partial
//! payload is accepted rather than rejected; unknown fields are ignored.

use serde::{Deserialize, Serialize};
use wildguard_wildlife_models::{MovementAlert, TrackRecord, VisionFinding};

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct ApiHealth {
    /// Fixed status banner.
    pub status: String,
    /// Current server time (ISO 8601 UTC).
    pub timestamp: String,
    /// Service version.
    pub version: String,
}

/// Request body for the movement analysis endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovementRequest {
    /// Track records to analyze; the startup fixture is used when absent.
    #[serde(default)]
    pub data: Option<Vec<TrackRecord>>,
}

/// Response from the movement analysis endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct MovementResponse {
    /// Top alerts by descending confidence.
    pub movement_alerts: Vec<MovementAlert>,
    /// When the analysis ran (ISO 8601 UTC).
    pub timestamp: String,
    /// Number of alerts returned.
    pub total_alerts: usize,
}

/// Findings for one uploaded image.
#[derive(Debug, Clone, Serialize)]
pub struct VisionFileResult {
    /// Uploaded file name.
    pub file: String,
    /// Findings for this file, including the enrichment entry.
    pub findings: Vec<VisionFinding>,
}

/// Response from the image analysis endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct VisionResponse {
    /// Per-file results (one entry per uploaded file).
    pub vision_results: Vec<VisionFileResult>,
    /// When the analysis ran (ISO 8601 UTC).
    pub timestamp: String,
}

/// Request body for the score computation endpoint. A `hotspots` field is
/// tolerated (and ignored — alerts already encode hotspot proximity) via
/// serde's unknown-field tolerance.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreRequest {
    /// Movement alerts from the detection step.
    #[serde(default)]
    pub alerts: Vec<MovementAlert>,
    /// Vision findings from the image analysis step.
    #[serde(default)]
    pub vision_findings: Vec<VisionFinding>,
}

/// Request body for the report generation endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportRequest {
    /// Alerts to list in the briefing.
    #[serde(default)]
    pub alerts: Vec<MovementAlert>,
    /// Composite risk score the briefing is based on.
    #[serde(rename = "riskScore", default)]
    pub risk_score: u8,
}

/// Response from the report generation endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    /// The rendered briefing document.
    pub ranger_report: String,
    /// When the report was generated (ISO 8601 UTC).
    pub timestamp: String,
}

/// Request body for the full-pipeline orchestration endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrchestrateRequest {
    /// Track records to analyze; the startup fixture is used when absent.
    #[serde(default)]
    pub data: Option<Vec<TrackRecord>>,
    /// Image references for the vision step. Accepted for interface
    /// completeness; image processing is out of scope, so findings stay
    /// empty.
    #[serde(default)]
    pub images: Vec<String>,
}

/// Request body for the multi-agent analysis endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentAnalyzeRequest {
    /// Track records for the planner agent's context.
    #[serde(default)]
    pub wildlife_data: Vec<TrackRecord>,
    /// Hotspot reference set for the planner agent's context.
    #[serde(default)]
    pub hotspots: wildguard_wildlife_models::HotspotSet,
    /// Alerts for the movement and risk agents.
    #[serde(default)]
    pub movement_alerts: Vec<MovementAlert>,
    /// Findings for the vision and risk agents.
    #[serde(default)]
    pub vision_findings: Vec<VisionFinding>,
    /// Previously computed composite score.
    #[serde(default)]
    pub risk_score: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_request_defaults_missing_fields() {
        let req: ScoreRequest = serde_json::from_str("{}").unwrap();
        assert!(req.alerts.is_empty());
        assert!(req.vision_findings.is_empty());
    }

    #[test]
    fn score_request_tolerates_hotspots_field() {
        let req: ScoreRequest =
            serde_json::from_str(r#"{"alerts": [], "hotspots": {"hotspots": []}}"#).unwrap();
        assert!(req.alerts.is_empty());
    }

    #[test]
    fn report_request_reads_camel_case_score() {
        let req: ReportRequest = serde_json::from_str(r#"{"riskScore": 46}"#).unwrap();
        assert_eq!(req.risk_score, 46);
    }

    #[test]
    fn agent_analyze_request_defaults_everything() {
        let req: AgentAnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert!(req.wildlife_data.is_empty());
        assert!(req.hotspots.hotspots.is_empty());
        assert_eq!(req.risk_score, 0);
    }
}
