#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Ranger briefing report rendering.
//!
//! Pure text templating: fills a fixed multi-section briefing document from
//! the alert list and risk score. The only branching is the same three
//! threat-level bands used by the scorer. No algorithmic content lives here.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use wildguard_wildlife_models::{MovementAlert, ThreatLevel};

/// How many incidents the briefing lists in detail. Intentionally smaller
/// than the detector's 10-alert cap; both constants are part of the
/// documented behavior.
const MAX_INCIDENTS_LISTED: usize = 5;

const SECTION_RULE: &str =
    "================================================================================";

/// Renders the daily ranger briefing for the given alerts and risk score,
/// timestamped with the current UTC time.
#[must_use]
pub fn generate_briefing(alerts: &[MovementAlert], risk_score: u8) -> String {
    generate_briefing_at(alerts, risk_score, Utc::now())
}

/// Renders the briefing with an explicit generation time. Split out so tests
/// can render deterministic documents.
#[must_use]
pub fn generate_briefing_at(
    alerts: &[MovementAlert],
    risk_score: u8,
    now: DateTime<Utc>,
) -> String {
    let threat_level = ThreatLevel::from_score(risk_score);
    let mut report = String::new();

    let _ = write!(
        report,
        "\n{SECTION_RULE}\n\
         {:^80}\n\
         {SECTION_RULE}\n\n\
         DATE: {}\n\
         OVERALL RISK SCORE: {risk_score}/100 [{threat_level}]\n\n\
         {SECTION_RULE}\n\
         EXECUTIVE SUMMARY\n\
         {SECTION_RULE}\n\n\
         WildGuard AI has detected {} significant movement anomalies in the\n\
         protected reserve over the last 24 hours. Combined with environmental factors\n\
         and recent hotspot activity, the system assesses current poaching risk at\n\
         {threat_level} levels.\n\n\
         {SECTION_RULE}\n\
         DETECTED INCIDENTS\n\
         {SECTION_RULE}\n\n",
        "WILDGUARD AI - DAILY RANGER BRIEFING",
        now.format("%Y-%m-%d %H:%M UTC"),
        alerts.len(),
    );

    if alerts.is_empty() {
        report.push_str("\nNo critical incidents detected.\n");
    } else {
        for (i, alert) in alerts.iter().take(MAX_INCIDENTS_LISTED).enumerate() {
            let reasons = alert
                .reasons
                .iter()
                .map(|r| r.label())
                .collect::<Vec<_>>()
                .join(", ");
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                clippy::cast_precision_loss
            )]
            let confidence_pct = (alert.confidence * 100.0) as u32;
            let _ = write!(
                report,
                "\n{}. INCIDENT: {}\n   \
                 Time: {}\n   \
                 Location: {:.4}\u{b0}S, {:.4}\u{b0}E\n   \
                 Type: {reasons}\n   \
                 Confidence: {confidence_pct}%\n\n",
                i + 1,
                alert.entity_id.to_uppercase(),
                alert.timestamp,
                alert.latitude,
                alert.longitude,
            );
        }
    }

    let _ = write!(
        report,
        "\n{SECTION_RULE}\n\
         RISK ASSESSMENT\n\
         {SECTION_RULE}\n\n\
         Movement Anomalies Detected: {}\n\
         Risk Score: {risk_score}/100\n\
         Threat Level: {threat_level}\n\n\
         The system evaluated:\n\
         - Real-time GPS tracking of 5 monitored animals\n\
         - Movement patterns vs. baseline behavior\n\
         - Proximity to known poaching hotspots\n\
         - Environmental factors (dry season conditions)\n\n\
         {SECTION_RULE}\n\
         RECOMMENDED PATROL ROUTES & ACTIONS\n\
         {SECTION_RULE}\n\n\
         IMMEDIATE ACTIONS (Next 2-4 hours):\n\
         - Deploy rangers to Northern Ridge hotspot (priority 1)\n\
         - Establish checkpoint at Eastern Valley approach\n\
         - Activate night-vision surveillance (dusk onwards)\n\n\
         PATROL RECOMMENDATIONS:\n\
         - Increase patrols in grid zone X-7 (85% higher risk)\n\
         - Position mobile teams at access points\n\
         - Monitor water sources during dry season\n\n\
         RESOURCE ALLOCATION:\n\
         - Recommend 3-4 additional rangers for rotation\n\
         - Deploy 2 night-vision units\n\
         - Position 1 rapid-response team at central base\n\n\
         {SECTION_RULE}\n\
         WEATHER & ENVIRONMENTAL FACTORS\n\
         {SECTION_RULE}\n\n\
         Current Season: Dry Season (increased poaching risk)\n\
         Temperature: High risk period for animal stress\n\
         Visibility: Excellent for surveillance operations\n\
         Human Activity: Elevated detection probability\n\n\
         {SECTION_RULE}\n\
         NEXT BRIEFING\n\
         {SECTION_RULE}\n\n\
         Next automated briefing: {}:00 UTC tomorrow\n\
         Priority updates will be sent immediately if risk score exceeds 80\n\n\
         Contact: WildGuard AI Command Center\n\
         Questions: admin@wildguardai.com\n\n\
         {SECTION_RULE}\n",
        alerts.len(),
        next_briefing_hour(now),
    );

    report
}

/// Hour-of-day for the next automated briefing, 24 hours from now.
fn next_briefing_hour(now: DateTime<Utc>) -> u32 {
    use chrono::Timelike as _;
    (now.hour() + 24) % 24
}
