//! Full analysis pipeline: detection, scoring, reporting, and agent
//! enrichment chained in one pass.

use serde::Serialize;
use wildguard_ai::agents::{AgentAnalysis, AgentSuite};
use wildguard_wildlife_models::{
    Hotspot, MovementAlert, RiskAssessment, TrackRecord, VisionFinding,
};

/// The combined result of one orchestration run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    /// Alerts from the detection step.
    pub movement_alerts: Vec<MovementAlert>,
    /// Findings from the vision step (empty — image processing is out of
    /// scope for orchestration, which takes image references only).
    pub vision_findings: Vec<VisionFinding>,
    /// Composite score from the scoring step.
    pub risk_assessment: RiskAssessment,
    /// Rendered briefing from the report step.
    pub ranger_report: String,
    /// Multi-agent enrichment, or a labeled unavailable/error marker.
    pub agent_analysis: serde_json::Value,
    /// Always `"complete"` — the pipeline is all-or-nothing per request.
    pub pipeline_status: &'static str,
}

/// Runs the complete analysis pipeline.
///
/// Enrichment is best-effort: when no agent suite is configured the
/// `agent_analysis` slot carries a labeled unavailable marker, and agent
/// failures inside orchestration are already captured per-call, so this
/// function itself cannot fail.
pub async fn run_pipeline(
    wildlife_data: &[TrackRecord],
    hotspots: &[Hotspot],
    agents: Option<&AgentSuite>,
) -> PipelineResult {
    let movement_alerts = wildguard_detect::detect_anomalies(wildlife_data, hotspots);

    // Image processing is a non-goal; orchestration carries no findings.
    let vision_findings: Vec<VisionFinding> = Vec::new();

    let risk_assessment = wildguard_scoring::compute_score(&movement_alerts, &vision_findings);

    let ranger_report =
        wildguard_report::generate_briefing(&movement_alerts, risk_assessment.risk_score);

    let agent_analysis = match agents {
        Some(suite) => {
            let analysis: AgentAnalysis = suite
                .orchestrate_agents(
                    wildlife_data,
                    hotspots,
                    &movement_alerts,
                    &vision_findings,
                    risk_assessment.risk_score,
                )
                .await;
            serde_json::to_value(&analysis).unwrap_or_else(|e| {
                serde_json::json!({ "error": format!("Agent analysis failed: {e}") })
            })
        }
        None => serde_json::json!({
            "status": "unavailable",
            "message": "AI agents not available (mode: none)",
        }),
    };

    PipelineResult {
        movement_alerts,
        vision_findings,
        risk_assessment,
        ranger_report,
        agent_analysis,
        pipeline_status: "complete",
    }
}
