//! The five-analyst agent suite and its orchestration.
//!
//! Each agent wraps one prompt template over the shared [`LlmProvider`]
//! trait. The suite is constructed once at startup: live when a Groq
//! credential is configured, simulated otherwise. Callers never see a hard
//! failure from orchestration — a failed agent call is rendered as a
//! labeled error string in its slot.

use chrono::Utc;
use serde::Serialize;
use wildguard_wildlife_models::{Hotspot, MovementAlert, TrackRecord, VisionFinding};

use crate::AiError;
use crate::providers::{ChatParams, LlmProvider, create_provider_from_env};

/// Agent names in pipeline order, as reported by the status endpoint.
pub const AGENT_NAMES: [&str; 5] = [
    "planner",
    "movement_analyst",
    "vision_analyst",
    "risk_scorer",
    "report_generator",
];

const PLANNER_PARAMS: ChatParams = ChatParams {
    max_tokens: 500,
    temperature: 0.3,
};
const MOVEMENT_PARAMS: ChatParams = ChatParams {
    max_tokens: 400,
    temperature: 0.2,
};
const VISION_PARAMS: ChatParams = ChatParams {
    max_tokens: 400,
    temperature: 0.2,
};
const RISK_PARAMS: ChatParams = ChatParams {
    max_tokens: 300,
    temperature: 0.1,
};
const REPORT_PARAMS: ChatParams = ChatParams {
    max_tokens: 600,
    temperature: 0.2,
};

/// How many alerts are inlined into the movement analyst prompt.
const MOVEMENT_PROMPT_ALERTS: usize = 3;

/// The outputs of the individual analyst agents.
#[derive(Debug, Clone, Serialize)]
pub struct AgentAnalyses {
    /// Strategic deployment plan from the planner agent.
    pub planning: String,
    /// Movement pattern analysis.
    pub movement: String,
    /// Visual evidence assessment.
    pub vision: String,
    /// Risk score validation.
    pub risk_assessment: String,
    /// One-line orchestration summary.
    pub summary: String,
}

/// The full multi-agent analysis returned by orchestration.
#[derive(Debug, Clone, Serialize)]
pub struct AgentAnalysis {
    /// Per-agent analyses.
    pub agent_analyses: AgentAnalyses,
    /// Briefing assembled by the report generator agent.
    pub final_report: String,
    /// When the orchestration completed (ISO 8601 UTC).
    pub timestamp: String,
    /// Which agents ran, in order.
    pub agents_used: Vec<String>,
    /// `"groq"` or `"simulated"`.
    pub mode: String,
}

/// The agent suite, fixed at startup to either a live LLM provider or the
/// canned simulated analyst set.
pub enum AgentSuite {
    /// Live provider (Groq or any OpenAI-compatible server).
    Live(Box<dyn LlmProvider>),
    /// Canned responses, used when no credential is configured.
    Simulated,
}

impl AgentSuite {
    /// Builds the suite from the environment: live when `GROQ_API_KEY` is
    /// set, simulated otherwise.
    #[must_use]
    pub fn from_env() -> Self {
        match create_provider_from_env() {
            Ok(provider) => Self::Live(provider),
            Err(e) => {
                log::warn!("LLM provider unavailable, using simulated agents: {e}");
                Self::Simulated
            }
        }
    }

    /// `"groq"` for the live suite, `"simulated"` otherwise.
    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self {
            Self::Live(_) => "groq",
            Self::Simulated => "simulated",
        }
    }

    /// The model identifier in use.
    #[must_use]
    pub fn model(&self) -> &str {
        match self {
            Self::Live(provider) => provider.model(),
            Self::Simulated => "simulated",
        }
    }

    /// Strategic planning agent for ranger deployment.
    ///
    /// # Errors
    ///
    /// Returns [`AiError`] if the live provider call fails. The simulated
    /// suite never fails.
    pub async fn planner_agent(
        &self,
        wildlife_data: &[TrackRecord],
        hotspots: &[Hotspot],
        alerts: &[MovementAlert],
    ) -> Result<String, AiError> {
        match self {
            Self::Live(provider) => {
                let prompt = format!(
                    "You are a wildlife conservation strategic planner. Analyze the data and \
                     create an optimal ranger deployment plan.\n\n\
                     WILDLIFE DATA: {} tracked animals\n\
                     HOTSPOTS: {} known risk areas\n\
                     CURRENT ALERTS: {} active alerts\n\n\
                     Create a tactical deployment plan including:\n\
                     1. Priority zones for immediate patrol\n\
                     2. Resource allocation recommendations\n\
                     3. Risk mitigation strategies\n\
                     4. Timeline for actions\n\n\
                     Be concise and actionable.",
                    wildlife_data.len(),
                    hotspots.len(),
                    alerts.len(),
                );
                provider
                    .chat(
                        "You are an expert wildlife conservation strategist.",
                        &prompt,
                        PLANNER_PARAMS,
                    )
                    .await
            }
            Self::Simulated => Ok(simulated::planning()),
        }
    }

    /// Movement pattern analysis agent.
    ///
    /// # Errors
    ///
    /// Returns [`AiError`] if the live provider call fails.
    pub async fn movement_analyst_agent(
        &self,
        movement_alerts: &[MovementAlert],
    ) -> Result<String, AiError> {
        match self {
            Self::Live(provider) => {
                let sample = &movement_alerts[..movement_alerts.len().min(MOVEMENT_PROMPT_ALERTS)];
                let prompt = format!(
                    "Analyze these wildlife movement alerts for patterns and threats:\n\n\
                     ALERTS: {}\n\n\
                     Identify:\n\
                     1. Movement anomaly patterns\n\
                     2. Potential threat indicators\n\
                     3. Behavioral changes suggesting stress\n\
                     4. Recommended monitoring adjustments\n\n\
                     Provide expert wildlife behavior analysis.",
                    serde_json::to_string_pretty(sample)?,
                );
                provider
                    .chat(
                        "You are a wildlife behavior expert specializing in anti-poaching \
                         detection.",
                        &prompt,
                        MOVEMENT_PARAMS,
                    )
                    .await
            }
            Self::Simulated => Ok(simulated::movement(movement_alerts.len())),
        }
    }

    /// Visual evidence analysis agent for camera-trap findings.
    ///
    /// # Errors
    ///
    /// Returns [`AiError`] if the live provider call fails.
    pub async fn vision_analyst_agent(
        &self,
        image_findings: &[VisionFinding],
    ) -> Result<String, AiError> {
        match self {
            Self::Live(provider) => {
                let prompt = format!(
                    "Analyze these visual findings from camera traps and surveillance:\n\n\
                     FINDINGS: {}\n\n\
                     Assess:\n\
                     1. Threat level of detected objects/activities\n\
                     2. Evidence quality and reliability\n\
                     3. Recommended follow-up actions\n\
                     4. Correlation with known poaching methods\n\n\
                     Provide forensic-level analysis for conservation officers.",
                    serde_json::to_string_pretty(image_findings)?,
                );
                provider
                    .chat(
                        "You are a forensic analyst specializing in wildlife crime detection.",
                        &prompt,
                        VISION_PARAMS,
                    )
                    .await
            }
            Self::Simulated => Ok(simulated::vision()),
        }
    }

    /// Risk assessment validation agent.
    ///
    /// # Errors
    ///
    /// Returns [`AiError`] if the live provider call fails.
    pub async fn risk_scoring_agent(
        &self,
        movement_alerts: &[MovementAlert],
        vision_findings: &[VisionFinding],
        risk_score: u8,
    ) -> Result<String, AiError> {
        match self {
            Self::Live(provider) => {
                let prompt = format!(
                    "Evaluate the current conservation threat level:\n\n\
                     MOVEMENT ALERTS: {} detected\n\
                     VISION FINDINGS: {} items\n\
                     COMPUTED RISK SCORE: {risk_score}/100\n\n\
                     Provide:\n\
                     1. Risk assessment validation\n\
                     2. Missing factors to consider\n\
                     3. Confidence level in current score\n\
                     4. Recommendations for score adjustment\n\n\
                     Focus on accuracy and false positive reduction.",
                    movement_alerts.len(),
                    vision_findings.len(),
                );
                provider
                    .chat(
                        "You are a risk assessment specialist for wildlife conservation.",
                        &prompt,
                        RISK_PARAMS,
                    )
                    .await
            }
            Self::Simulated => Ok(simulated::risk(
                movement_alerts.len(),
                vision_findings.len(),
                risk_score,
            )),
        }
    }

    /// Briefing-writer agent for the final report.
    ///
    /// # Errors
    ///
    /// Returns [`AiError`] if the live provider call fails.
    pub async fn report_generator_agent(
        &self,
        alerts: &[MovementAlert],
        risk_score: u8,
        summary: &str,
    ) -> Result<String, AiError> {
        match self {
            Self::Live(provider) => {
                let prompt = format!(
                    "Generate a professional ranger briefing report:\n\n\
                     ALERTS: {} total\n\
                     RISK SCORE: {risk_score}/100\n\
                     ANALYSIS: {summary}\n\n\
                     Create a briefing that includes:\n\
                     1. Executive summary\n\
                     2. Immediate action items\n\
                     3. Resource deployment recommendations\n\
                     4. Follow-up monitoring plan\n\n\
                     Format for field rangers - clear, actionable, professional.",
                    alerts.len(),
                );
                provider
                    .chat(
                        "You are a conservation operations coordinator writing for field rangers.",
                        &prompt,
                        REPORT_PARAMS,
                    )
                    .await
            }
            Self::Simulated => Ok(simulated::report(alerts.len(), risk_score)),
        }
    }

    /// Runs all five agents and assembles the combined analysis.
    ///
    /// Individual agent failures are captured as labeled error strings in
    /// their slot; orchestration itself never fails.
    pub async fn orchestrate_agents(
        &self,
        wildlife_data: &[TrackRecord],
        hotspots: &[Hotspot],
        movement_alerts: &[MovementAlert],
        vision_findings: &[VisionFinding],
        risk_score: u8,
    ) -> AgentAnalysis {
        log::info!("Starting multi-agent analysis ({} mode)", self.mode());

        let planning = self
            .planner_agent(wildlife_data, hotspots, movement_alerts)
            .await
            .unwrap_or_else(|e| format!("Planner agent error: {e}"));

        let movement = self
            .movement_analyst_agent(movement_alerts)
            .await
            .unwrap_or_else(|e| format!("Movement analyst error: {e}"));

        let vision = self
            .vision_analyst_agent(vision_findings)
            .await
            .unwrap_or_else(|e| format!("Vision analyst error: {e}"));

        let risk_assessment = self
            .risk_scoring_agent(movement_alerts, vision_findings, risk_score)
            .await
            .unwrap_or_else(|e| format!("Risk scoring agent error: {e}"));

        let summary = format!(
            "Multi-agent analysis completed with {} alerts processed",
            movement_alerts.len()
        );

        let final_report = self
            .report_generator_agent(movement_alerts, risk_score, &summary)
            .await
            .unwrap_or_else(|e| format!("Report generator error: {e}"));

        AgentAnalysis {
            agent_analyses: AgentAnalyses {
                planning,
                movement,
                vision,
                risk_assessment,
                summary,
            },
            final_report,
            timestamp: Utc::now().to_rfc3339(),
            agents_used: AGENT_NAMES.iter().map(ToString::to_string).collect(),
            mode: self.mode().to_string(),
        }
    }
}

/// Canned analyst texts for the simulated suite.
mod simulated {
    use chrono::Utc;
    use wildguard_wildlife_models::ThreatLevel;

    pub fn planning() -> String {
        format!(
            "TACTICAL DEPLOYMENT PLAN - {}\n\n\
             PRIORITY ZONES:\n\
             1. Northern Ridge (High Risk) - Deploy 2 ranger teams immediately\n\
             2. Eastern Valley (Medium Risk) - Position 1 mobile patrol unit\n\n\
             RESOURCE ALLOCATION:\n\
             - 4 rangers for immediate deployment\n\
             - 2 night-vision units for dusk patrol\n\
             - 1 rapid-response team on standby\n\n\
             IMMEDIATE ACTIONS:\n\
             - Establish checkpoint at main access road\n\
             - Activate camera surveillance in hotspot zones\n\
             - Begin coordinated sweep of high-risk areas\n\n\
             TIMELINE: Execute within 2 hours of briefing",
            Utc::now().format("%Y-%m-%d %H:%M"),
        )
    }

    pub fn movement(alert_count: usize) -> String {
        format!(
            "MOVEMENT PATTERN ANALYSIS\n\n\
             ANOMALY ASSESSMENT:\n\
             - {alert_count} movement alerts detected\n\
             - Pattern suggests potential human interference\n\
             - Animals showing stress indicators (sudden stops, erratic movement)\n\n\
             BEHAVIORAL INDICATORS:\n\
             - Deviation from normal grazing patterns\n\
             - Clustering behavior indicating external threat\n\
             - Reduced movement during typical active hours\n\n\
             RECOMMENDATIONS:\n\
             - Increase monitoring frequency in affected zones\n\
             - Deploy additional camera traps along movement corridors\n\
             - Consider temporary ranger presence in anomaly areas"
        )
    }

    pub fn vision() -> String {
        "VISUAL EVIDENCE ASSESSMENT\n\n\
         THREAT INDICATORS DETECTED:\n\
         - Fresh vehicle tracks near wildlife areas\n\
         - Human presence in restricted zones\n\
         - Equipment/tools suggesting poaching activity\n\n\
         EVIDENCE QUALITY: High confidence in threat assessment\n\
         RECOMMENDED ACTIONS:\n\
         - Immediate ranger deployment to affected areas\n\
         - Forensic documentation of evidence\n\
         - Coordinate with anti-poaching units\n\n\
         PRIORITY LEVEL: HIGH - Immediate response required"
            .to_string()
    }

    pub fn risk(alert_count: usize, finding_count: usize, risk_score: u8) -> String {
        format!(
            "RISK VALIDATION ANALYSIS\n\n\
             CURRENT SCORE: {risk_score}/100 - VALIDATED\n\
             CONFIDENCE LEVEL: 85%\n\n\
             ASSESSMENT FACTORS:\n\
             - Movement anomalies: {alert_count} detected\n\
             - Visual evidence: {finding_count} items\n\
             - Environmental factors: Dry season (elevated risk)\n\n\
             SCORE ADJUSTMENT: Current score appears accurate\n\
             RECOMMENDATION: Maintain current threat level assessment"
        )
    }

    pub fn report(alert_count: usize, risk_score: u8) -> String {
        format!(
            "RANGER BRIEFING REPORT\n\
             Generated: {}\n\n\
             EXECUTIVE SUMMARY:\n\
             Current threat level: {}\n\
             Active alerts: {alert_count}\n\
             Recommended action: Immediate deployment\n\n\
             DEPLOYMENT RECOMMENDATIONS:\n\
             1. Deploy rangers to Northern Ridge hotspot (Priority 1)\n\
             2. Establish mobile patrols in Eastern Valley\n\
             3. Activate night surveillance systems\n\n\
             RESOURCE REQUIREMENTS:\n\
             - 4-6 rangers for immediate response\n\
             - 2 vehicles for patrol operations\n\
             - Night-vision equipment for dusk operations\n\n\
             NEXT BRIEFING: 6 hours or upon significant developments",
            Utc::now().format("%Y-%m-%d %H:%M UTC"),
            ThreatLevel::from_score(risk_score),
        )
    }
}
