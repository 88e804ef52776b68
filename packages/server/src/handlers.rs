//! HTTP handler functions for the `WildGuard` API.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use futures::{StreamExt as _, TryStreamExt as _};
use wildguard_ai::agents::{AGENT_NAMES, AgentSuite};
use wildguard_server_models::{
    AgentAnalyzeRequest, ApiHealth, MovementRequest, MovementResponse, ReportRequest,
    ReportResponse, ScoreRequest, VisionFileResult, VisionResponse,
};
use wildguard_wildlife_models::VisionFinding;

use crate::{AppState, pipeline};

/// Enrichment notes longer than this are truncated with an ellipsis.
const ENRICHMENT_NOTES_LIMIT: usize = 200;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        status: "WildGuard AI Backend Running".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/data`
///
/// Returns the full wildlife tracking fixture.
pub async fn data(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.tracks)
}

/// `GET /api/hotspots`
///
/// Returns the poaching hotspot fixture.
pub async fn hotspots(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.hotspots)
}

/// `POST /api/movement`
///
/// Runs anomaly detection over the posted track batch, or over the startup
/// fixture when the body carries no data.
pub async fn movement(
    state: web::Data<AppState>,
    req: web::Json<MovementRequest>,
) -> HttpResponse {
    let records = req.data.as_deref().unwrap_or(&state.tracks);
    let alerts = wildguard_detect::detect_anomalies(records, &state.hotspots.hotspots);

    let total_alerts = alerts.len();
    HttpResponse::Ok().json(MovementResponse {
        movement_alerts: alerts,
        timestamp: Utc::now().to_rfc3339(),
        total_alerts,
    })
}

/// `POST /api/vision`
///
/// Accepts a multipart `file` upload and returns placeholder findings plus
/// one enrichment entry. There is no real vision model; the placeholder
/// findings are fixed, and the enrichment entry degrades to a labeled
/// error/unavailable record when the agent call fails.
pub async fn vision(state: web::Data<AppState>, mut payload: Multipart) -> HttpResponse {
    let mut uploaded: Option<String> = None;

    loop {
        match payload.try_next().await {
            Ok(Some(mut field)) => {
                let Some(cd) = field.content_disposition() else {
                    continue;
                };
                if cd.get_name() != Some("file") {
                    continue;
                }
                let filename = cd.get_filename().unwrap_or("upload").to_string();

                // Drain the field; the bytes themselves are not inspected.
                while let Some(chunk) = field.next().await {
                    if let Err(e) = chunk {
                        log::error!("Failed to read uploaded file: {e}");
                        return HttpResponse::BadRequest()
                            .json(serde_json::json!({ "error": format!("Upload failed: {e}") }));
                    }
                }
                uploaded = Some(filename);
            }
            Ok(None) => break,
            Err(e) => {
                log::error!("Malformed multipart payload: {e}");
                return HttpResponse::BadRequest()
                    .json(serde_json::json!({ "error": format!("Upload failed: {e}") }));
            }
        }
    }

    let Some(filename) = uploaded else {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "No file provided"
        }));
    };

    let findings = build_findings(state.agents.as_ref()).await;

    HttpResponse::Ok().json(VisionResponse {
        vision_results: vec![VisionFileResult {
            file: filename,
            findings,
        }],
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// The fixed placeholder findings plus the enrichment entry.
async fn build_findings(agents: Option<&AgentSuite>) -> Vec<VisionFinding> {
    let mut findings = vec![
        VisionFinding {
            label: "tire tracks".to_string(),
            confidence: 0.87,
            severity: 0.75,
            notes: "Fresh vehicle tracks detected near animal location".to_string(),
        },
        VisionFinding {
            label: "human presence".to_string(),
            confidence: 0.62,
            severity: 0.65,
            notes: "Possible human figures in background".to_string(),
        },
    ];

    let enrichment = match agents {
        Some(suite) => match suite.vision_analyst_agent(&findings).await {
            Ok(analysis) => VisionFinding {
                label: "ai_analysis".to_string(),
                confidence: 0.95,
                severity: 0.8,
                notes: truncate_notes(&analysis),
            },
            Err(e) => VisionFinding {
                label: "ai_analysis_error".to_string(),
                confidence: 0.0,
                severity: 0.0,
                notes: format!("Agent analysis failed: {e}"),
            },
        },
        None => VisionFinding {
            label: "ai_analysis_unavailable".to_string(),
            confidence: 0.0,
            severity: 0.0,
            notes: "AI agent analysis not available (mode: none)".to_string(),
        },
    };
    findings.push(enrichment);
    findings
}

/// Caps enrichment notes at [`ENRICHMENT_NOTES_LIMIT`] characters.
fn truncate_notes(analysis: &str) -> String {
    if analysis.chars().count() > ENRICHMENT_NOTES_LIMIT {
        let truncated: String = analysis.chars().take(ENRICHMENT_NOTES_LIMIT).collect();
        format!("{truncated}...")
    } else {
        analysis.to_string()
    }
}

/// `POST /api/score`
///
/// Computes the composite risk assessment from posted alerts and findings.
/// Missing fields default to empty rather than rejecting the request.
pub async fn score(req: web::Json<ScoreRequest>) -> HttpResponse {
    let assessment = wildguard_scoring::compute_score(&req.alerts, &req.vision_findings);
    HttpResponse::Ok().json(assessment)
}

/// `POST /api/report`
///
/// Renders the ranger briefing for the posted alerts and score.
pub async fn report(req: web::Json<ReportRequest>) -> HttpResponse {
    let briefing = wildguard_report::generate_briefing(&req.alerts, req.risk_score);
    HttpResponse::Ok().json(ReportResponse {
        ranger_report: briefing,
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// `POST /api/orchestrate`
///
/// Runs the full analysis pipeline: detection, scoring, reporting, and
/// multi-agent enrichment.
pub async fn orchestrate(
    state: web::Data<AppState>,
    req: web::Json<wildguard_server_models::OrchestrateRequest>,
) -> HttpResponse {
    let records = req.data.as_deref().unwrap_or(&state.tracks);
    let result =
        pipeline::run_pipeline(records, &state.hotspots.hotspots, state.agents.as_ref()).await;
    HttpResponse::Ok().json(result)
}

/// `GET /api/agents/status`
///
/// Reports the enrichment subsystem status, running a planner test call to
/// prove the configured provider responds.
pub async fn agents_status(state: web::Data<AppState>) -> HttpResponse {
    let Some(suite) = state.agents.as_ref() else {
        return agents_unavailable();
    };

    match suite.planner_agent(&[], &[], &[]).await {
        Ok(test_response) => HttpResponse::Ok().json(serde_json::json!({
            "status": "operational",
            "agent_type": suite.mode(),
            "model": suite.model(),
            "agents": AGENT_NAMES,
            "test_response_length": test_response.len(),
            "timestamp": Utc::now().to_rfc3339(),
        })),
        Err(e) => {
            log::error!("Agent status check failed: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "status": "error",
                "error": e.to_string(),
                "timestamp": Utc::now().to_rfc3339(),
            }))
        }
    }
}

/// `POST /api/agents/analyze`
///
/// Runs the full multi-agent orchestration over caller-provided inputs.
pub async fn agents_analyze(
    state: web::Data<AppState>,
    req: web::Json<AgentAnalyzeRequest>,
) -> HttpResponse {
    let Some(suite) = state.agents.as_ref() else {
        return agents_unavailable();
    };

    let results = suite
        .orchestrate_agents(
            &req.wildlife_data,
            &req.hotspots.hotspots,
            &req.movement_alerts,
            &req.vision_findings,
            req.risk_score,
        )
        .await;

    HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "agent_results": results,
        "agent_type": suite.mode(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Catch-all for unknown routes.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "Endpoint not found"
    }))
}

/// 503 payload for the explicitly disabled enrichment subsystem.
fn agents_unavailable() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(serde_json::json!({
        "status": "unavailable",
        "message": "AI agents not available (mode: none)",
        "setup_instructions": [
            "Set GROQ_API_KEY in the server environment",
            "Optionally set AI_MODEL and AI_BASE_URL",
            "Restart the server",
        ],
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use wildguard_wildlife_models::{Hotspot, HotspotSet, TrackRecord};

    fn test_state(agents: Option<AgentSuite>) -> web::Data<AppState> {
        web::Data::new(AppState {
            tracks: vec![
                TrackRecord {
                    entity_id: "rhino_001".to_string(),
                    timestamp_utc: "2024-06-01T06:00:00Z".to_string(),
                    latitude: -25.7461,
                    longitude: 28.1881,
                    speed_kmh: 0.05,
                },
                TrackRecord {
                    entity_id: "rhino_001".to_string(),
                    timestamp_utc: "2024-06-01T07:00:00Z".to_string(),
                    latitude: -25.7461,
                    longitude: 28.1881,
                    speed_kmh: 0.05,
                },
            ],
            hotspots: HotspotSet {
                hotspots: vec![Hotspot {
                    id: "HS001".to_string(),
                    name: "Northern Ridge".to_string(),
                    latitude: -25.7460,
                    longitude: 28.1880,
                }],
            },
            agents,
        })
    }

    #[actix_web::test]
    async fn health_reports_running() {
        let app = test::init_service(
            App::new().route("/api/health", web::get().to(health)),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "WildGuard AI Backend Running");
    }

    #[actix_web::test]
    async fn movement_detects_fixture_anomalies() {
        let app = test::init_service(
            App::new()
                .app_data(test_state(None))
                .route("/api/movement", web::post().to(movement)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/movement")
            .set_json(serde_json::json!({}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        // Both fixture records sit on the hotspot with near-zero speed.
        assert_eq!(body["total_alerts"], 2);
        assert_eq!(
            body["movement_alerts"][0]["reasons"][1],
            "near_hotspot"
        );
    }

    #[actix_web::test]
    async fn movement_accepts_posted_batch() {
        let app = test::init_service(
            App::new()
                .app_data(test_state(None))
                .route("/api/movement", web::post().to(movement)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/movement")
            .set_json(serde_json::json!({ "data": [] }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total_alerts"], 0);
    }

    #[actix_web::test]
    async fn score_defaults_to_environment_only() {
        let app = test::init_service(
            App::new().route("/api/score", web::post().to(score)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/score")
            .set_json(serde_json::json!({}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["risk_score"], 1);
        assert_eq!(body["threat_level"], "MEDIUM");
    }

    #[actix_web::test]
    async fn report_labels_threat_band() {
        let app = test::init_service(
            App::new().route("/api/report", web::post().to(report)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/report")
            .set_json(serde_json::json!({ "alerts": [], "riskScore": 75 }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let text = body["ranger_report"].as_str().unwrap();
        assert!(text.contains("CRITICAL"));
    }

    #[actix_web::test]
    async fn orchestrate_runs_full_pipeline() {
        let app = test::init_service(
            App::new()
                .app_data(test_state(Some(AgentSuite::Simulated)))
                .route("/api/orchestrate", web::post().to(orchestrate)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/orchestrate")
            .set_json(serde_json::json!({}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["pipeline_status"], "complete");
        assert_eq!(body["agent_analysis"]["mode"], "simulated");
        assert!(body["risk_assessment"]["risk_score"].is_u64());
    }

    #[actix_web::test]
    async fn agents_status_operational_when_simulated() {
        let app = test::init_service(
            App::new()
                .app_data(test_state(Some(AgentSuite::Simulated)))
                .route("/api/agents/status", web::get().to(agents_status)),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/api/agents/status")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "operational");
        assert_eq!(body["agent_type"], "simulated");
        assert_eq!(body["agents"].as_array().unwrap().len(), 5);
    }

    #[actix_web::test]
    async fn agents_endpoints_return_503_when_disabled() {
        let app = test::init_service(
            App::new()
                .app_data(test_state(None))
                .route("/api/agents/status", web::get().to(agents_status))
                .route("/api/agents/analyze", web::post().to(agents_analyze)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/agents/status")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::SERVICE_UNAVAILABLE);

        let req = test::TestRequest::post()
            .uri("/api/agents/analyze")
            .set_json(serde_json::json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn agents_analyze_returns_results() {
        let app = test::init_service(
            App::new()
                .app_data(test_state(Some(AgentSuite::Simulated)))
                .route("/api/agents/analyze", web::post().to(agents_analyze)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/agents/analyze")
            .set_json(serde_json::json!({ "risk_score": 65 }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["agent_results"]["mode"], "simulated");
    }

    #[actix_web::test]
    async fn unknown_route_is_json_404() {
        let app = test::init_service(
            App::new().default_service(web::route().to(not_found)),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/nothing").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn findings_include_enrichment_entry() {
        let suite = AgentSuite::Simulated;
        let findings = build_findings(Some(&suite)).await;
        assert_eq!(findings.len(), 3);
        assert_eq!(findings[0].label, "tire tracks");
        assert_eq!(findings[2].label, "ai_analysis");
        assert!((findings[2].confidence - 0.95).abs() < f64::EPSILON);
        assert!(findings[2].notes.len() <= ENRICHMENT_NOTES_LIMIT + 3);
    }

    #[tokio::test]
    async fn findings_label_missing_agents() {
        let findings = build_findings(None).await;
        assert_eq!(findings[2].label, "ai_analysis_unavailable");
        assert!(findings[2].severity.abs() < f64::EPSILON);
    }

    #[::core::prelude::v1::test]
    fn notes_truncation_appends_ellipsis() {
        let long = "x".repeat(250);
        let truncated = truncate_notes(&long);
        assert_eq!(truncated.chars().count(), 203);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_notes("short"), "short");
    }
}
