#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Weighted composite poaching-risk scoring.
//!
//! Combines movement alert counts and vision-finding severities into a
//! single 0-100 score with fixed weights, then maps the score to a threat
//! band with a canned recommendation list per band. The function is pure
//! and stateless; there is no configuration surface.

use wildguard_wildlife_models::{MovementAlert, RiskAssessment, ThreatLevel, VisionFinding};

/// Weight of the movement-alert component.
const MOVEMENT_WEIGHT: f64 = 0.40;
/// Weight of the vision-finding component.
const VISION_WEIGHT: f64 = 0.35;
/// Weight of the hotspot-proximity component.
const HOTSPOT_WEIGHT: f64 = 0.15;
/// Weight of the environmental component.
const ENVIRONMENT_WEIGHT: f64 = 0.10;

/// Flat contribution applied when any movement alert exists — the alerts
/// already encode which records were near hotspots.
const HOTSPOT_COMPONENT: f64 = 30.0;

/// Fixed dry-season bias; not derived from any live input.
const ENVIRONMENT_COMPONENT: f64 = 15.0;

/// Computes the composite risk assessment from movement alerts and vision
/// findings.
///
/// Components, each capped at 100 before weighting:
/// - movement: 10 points per alert;
/// - vision: the sum of finding severities × 100;
/// - hotspot: flat 30 when at least one alert exists;
/// - environment: constant 15 (dry-season conditions).
///
/// The weighted composite is capped at 100 and truncated to an integer.
#[must_use]
pub fn compute_score(
    movement_alerts: &[MovementAlert],
    vision_findings: &[VisionFinding],
) -> RiskAssessment {
    #[allow(clippy::cast_precision_loss)]
    let movement_component = (movement_alerts.len() as f64 * 10.0).min(100.0);

    let severity_sum: f64 = vision_findings.iter().map(|f| f.severity).sum();
    let vision_component = (severity_sum * 100.0).min(100.0);

    let hotspot_component = if movement_alerts.is_empty() {
        0.0
    } else {
        HOTSPOT_COMPONENT
    };

    let composite = movement_component * MOVEMENT_WEIGHT
        + vision_component * VISION_WEIGHT
        + hotspot_component * HOTSPOT_WEIGHT
        + ENVIRONMENT_COMPONENT * ENVIRONMENT_WEIGHT;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let risk_score = composite.min(100.0) as u8;

    let threat_level = ThreatLevel::from_score(risk_score);

    log::debug!(
        "Risk score {risk_score} ({threat_level}) from {} alerts, {} findings",
        movement_alerts.len(),
        vision_findings.len()
    );

    RiskAssessment {
        risk_score,
        threat_level,
        justification: format!(
            "Based on {} movement alerts and {} visual findings during dry season conditions.",
            movement_alerts.len(),
            vision_findings.len()
        ),
        recommendations: recommendations(threat_level),
    }
}

/// Fixed three-action list per threat band.
fn recommendations(level: ThreatLevel) -> Vec<String> {
    let actions: [&str; 3] = match level {
        ThreatLevel::Critical => [
            "URGENT: Deploy rangers to hotspot zones immediately",
            "Activate night-vision surveillance in critical areas",
            "Notify regional anti-poaching unit for backup",
        ],
        ThreatLevel::High => [
            "Increase patrol frequency in monitored zones",
            "Deploy additional rangers at dusk",
            "Review movement patterns for coordinated response",
        ],
        ThreatLevel::Medium => [
            "Continue standard monitoring protocols",
            "Maintain data collection for pattern analysis",
            "Schedule routine ranger patrols",
        ],
    };
    actions.iter().map(ToString::to_string).collect()
}
