#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Rule-based movement anomaly detection over wildlife GPS tracks.
//!
//! The detector scans each tracked animal's time-ordered records and flags
//! three heuristic indicators of possible poaching activity: sudden speed
//! drops relative to the animal's baseline, proximity to known hotspots,
//! and prolonged immobility. Each triggered rule tags the record; the
//! record's confidence is the maximum across triggered rules. Alerts are
//! recomputed from scratch per request — there is no retained state.

use wildguard_wildlife_models::{AlertReason, Hotspot, MovementAlert, TrackRecord};

/// Maximum number of alerts returned per detection pass.
pub const MAX_ALERTS: usize = 10;

/// Speeds at or below this (km/h) are treated as "not moving" — excluded
/// from the baseline mean and used as the immobility cutoff.
const NEAR_ZERO_SPEED_KMH: f64 = 0.1;

/// Baseline used for entities with no recorded speed above the near-zero
/// cutoff.
const DEFAULT_BASELINE_KMH: f64 = 1.0;

/// A speed below this fraction of the entity baseline is a sudden drop.
const SPEED_DROP_FRACTION: f64 = 0.2;

/// Hotspot proximity threshold in raw latitude/longitude degrees (~1 km at
/// equatorial scale). Planar Euclidean distance, deliberately not geodesic.
const HOTSPOT_RADIUS_DEG: f64 = 0.01;

const SPEED_DROP_CONFIDENCE: f64 = 0.85;
const HOTSPOT_CONFIDENCE: f64 = 0.92;
const IMMOBILITY_CONFIDENCE: f64 = 0.88;

/// Detects movement anomalies across all tracked entities.
///
/// Records are partitioned by `entity_id` preserving input order, a
/// per-entity baseline speed is computed as the mean of speeds strictly
/// above the near-zero cutoff (defaulting to 1.0 km/h when none qualify),
/// and each record is evaluated against the three rules independently. The
/// result is the top [`MAX_ALERTS`] alerts by descending confidence; ties
/// keep input encounter order (stable sort).
#[must_use]
pub fn detect_anomalies(records: &[TrackRecord], hotspots: &[Hotspot]) -> Vec<MovementAlert> {
    let tracks = partition_by_entity(records);

    let mut alerts: Vec<MovementAlert> = Vec::new();

    for (entity_id, tracks) in &tracks {
        let baseline = baseline_speed(tracks);

        for (i, track) in tracks.iter().enumerate() {
            let mut reasons: Vec<AlertReason> = Vec::new();
            let mut confidence: f64 = 0.0;

            if track.speed_kmh < baseline * SPEED_DROP_FRACTION {
                reasons.push(AlertReason::SuddenSpeedDrop);
                confidence = confidence.max(SPEED_DROP_CONFIDENCE);
            }

            if near_any_hotspot(track, hotspots) {
                reasons.push(AlertReason::NearHotspot);
                confidence = confidence.max(HOTSPOT_CONFIDENCE);
            }

            // The first record has no predecessor, so it can never be
            // flagged as prolonged immobility.
            if i > 0
                && track.speed_kmh < NEAR_ZERO_SPEED_KMH
                && tracks[i - 1].speed_kmh < NEAR_ZERO_SPEED_KMH
            {
                reasons.push(AlertReason::ProlongedImmobility);
                confidence = confidence.max(IMMOBILITY_CONFIDENCE);
            }

            if !reasons.is_empty() {
                alerts.push(MovementAlert {
                    entity_id: (*entity_id).to_string(),
                    timestamp: track.timestamp_utc.clone(),
                    latitude: track.latitude,
                    longitude: track.longitude,
                    observed_metric: format!("speed_kmh={}", track.speed_kmh),
                    reasons,
                    confidence: round2(confidence),
                });
            }
        }
    }

    log::debug!(
        "Detected {} raw alerts across {} entities",
        alerts.len(),
        tracks.len()
    );

    // Stable sort keeps input encounter order for equal confidences.
    alerts.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    alerts.truncate(MAX_ALERTS);
    alerts
}

/// Groups records by entity id, preserving both per-entity record order and
/// first-seen entity order so detection output is deterministic.
fn partition_by_entity(records: &[TrackRecord]) -> Vec<(&str, Vec<&TrackRecord>)> {
    let mut tracks: Vec<(&str, Vec<&TrackRecord>)> = Vec::new();

    for record in records {
        match tracks.iter_mut().find(|(id, _)| *id == record.entity_id) {
            Some((_, group)) => group.push(record),
            None => tracks.push((record.entity_id.as_str(), vec![record])),
        }
    }

    tracks
}

/// Mean of speeds strictly above the near-zero cutoff. Excluding near-zero
/// speeds from the mean is what guards the speed-drop rule against a
/// near-zero baseline — there is no clamping.
fn baseline_speed(tracks: &[&TrackRecord]) -> f64 {
    let moving: Vec<f64> = tracks
        .iter()
        .map(|t| t.speed_kmh)
        .filter(|s| *s > NEAR_ZERO_SPEED_KMH)
        .collect();

    if moving.is_empty() {
        DEFAULT_BASELINE_KMH
    } else {
        #[allow(clippy::cast_precision_loss)]
        let mean = moving.iter().sum::<f64>() / moving.len() as f64;
        mean
    }
}

/// Planar Euclidean distance in raw degrees against every hotspot. A coarse
/// ~1 km approximation at equatorial scale; preserved as the documented
/// behavior rather than replaced with a geodesic distance.
fn near_any_hotspot(track: &TrackRecord, hotspots: &[Hotspot]) -> bool {
    hotspots.iter().any(|h| {
        let d_lat = track.latitude - h.latitude;
        let d_lon = track.longitude - h.longitude;
        (d_lat * d_lat + d_lon * d_lon).sqrt() < HOTSPOT_RADIUS_DEG
    })
}

/// Rounds to two decimal places, matching the confidence precision of the
/// alert wire format.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entity_id: &str, lat: f64, lon: f64, speed: f64) -> TrackRecord {
        TrackRecord {
            entity_id: entity_id.to_string(),
            timestamp_utc: "2024-06-01T06:00:00Z".to_string(),
            latitude: lat,
            longitude: lon,
            speed_kmh: speed,
        }
    }

    fn hotspot(lat: f64, lon: f64) -> Hotspot {
        Hotspot {
            id: "HS001".to_string(),
            name: "Northern Ridge".to_string(),
            latitude: lat,
            longitude: lon,
        }
    }

    #[test]
    fn empty_input_yields_no_alerts() {
        assert!(detect_anomalies(&[], &[]).is_empty());
    }

    #[test]
    fn steady_movement_yields_no_alerts() {
        let records: Vec<TrackRecord> = (0..5)
            .map(|i| record("rhino_001", -25.0 + f64::from(i), 28.0, 4.0))
            .collect();
        assert!(detect_anomalies(&records, &[]).is_empty());
    }

    #[test]
    fn single_zero_speed_record_triggers_speed_drop() {
        // No speeds above the cutoff, so the baseline defaults to 1.0 and
        // 0 < 1.0 * 0.2 trips the rule.
        let records = vec![record("rhino_001", -25.0, 28.0, 0.0)];
        let alerts = detect_anomalies(&records, &[]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].reasons, vec![AlertReason::SuddenSpeedDrop]);
        assert!((alerts[0].confidence - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn speed_drop_relative_to_baseline() {
        // Baseline = mean(5.0, 5.0, 5.0) = 5.0; 0.9 < 1.0 triggers.
        let records = vec![
            record("rhino_001", -25.0, 28.0, 5.0),
            record("rhino_001", -25.1, 28.0, 5.0),
            record("rhino_001", -25.2, 28.0, 5.0),
            record("rhino_001", -25.3, 28.0, 0.9),
        ];
        let alerts = detect_anomalies(&records, &[]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].reasons, vec![AlertReason::SuddenSpeedDrop]);
        assert_eq!(alerts[0].observed_metric, "speed_kmh=0.9");
    }

    #[test]
    fn hotspot_proximity_flags_record() {
        let records = vec![record("rhino_001", -25.7461, 28.1881, 4.0)];
        let hotspots = vec![hotspot(-25.7460, 28.1880)];
        let alerts = detect_anomalies(&records, &hotspots);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].reasons, vec![AlertReason::NearHotspot]);
        assert!(alerts[0].confidence >= 0.92);
    }

    #[test]
    fn record_outside_hotspot_radius_not_flagged() {
        let records = vec![record("rhino_001", -25.0, 28.0, 4.0)];
        let hotspots = vec![hotspot(-25.02, 28.0)];
        assert!(detect_anomalies(&records, &hotspots).is_empty());
    }

    #[test]
    fn immobility_triggers_on_second_record_only() {
        let records = vec![
            record("rhino_001", -25.0, 28.0, 5.0),
            record("rhino_001", -25.0, 28.0, 0.05),
            record("rhino_001", -25.0, 28.0, 0.05),
        ];
        let alerts = detect_anomalies(&records, &[]);
        // Both near-zero records trip the speed-drop rule, but only the
        // second one (with a near-zero predecessor) adds immobility.
        assert_eq!(alerts.len(), 2);
        let with_immobility: Vec<&MovementAlert> = alerts
            .iter()
            .filter(|a| a.reasons.contains(&AlertReason::ProlongedImmobility))
            .collect();
        assert_eq!(with_immobility.len(), 1);
        assert!(
            with_immobility[0]
                .reasons
                .contains(&AlertReason::SuddenSpeedDrop)
        );
        assert!((with_immobility[0].confidence - 0.88).abs() < f64::EPSILON);
    }

    #[test]
    fn immobility_needs_consecutive_near_zero_speeds() {
        let records = vec![
            record("rhino_001", -25.0, 28.0, 5.0),
            record("rhino_001", -25.0, 28.0, 0.05),
            record("rhino_001", -25.0, 28.0, 5.0),
            record("rhino_001", -25.0, 28.0, 0.05),
        ];
        let alerts = detect_anomalies(&records, &[]);
        assert!(
            alerts
                .iter()
                .all(|a| !a.reasons.contains(&AlertReason::ProlongedImmobility))
        );
    }

    #[test]
    fn multiple_rules_accumulate_reasons_and_keep_max_confidence() {
        let records = vec![
            record("rhino_001", -25.7461, 28.1881, 0.05),
            record("rhino_001", -25.7461, 28.1881, 0.05),
        ];
        let hotspots = vec![hotspot(-25.7460, 28.1880)];
        let alerts = detect_anomalies(&records, &hotspots);
        assert_eq!(alerts.len(), 2);
        // Second record trips all three rules; confidence is the hotspot max.
        let full = alerts
            .iter()
            .find(|a| a.reasons.len() == 3)
            .expect("record with all three reasons");
        assert_eq!(
            full.reasons,
            vec![
                AlertReason::SuddenSpeedDrop,
                AlertReason::NearHotspot,
                AlertReason::ProlongedImmobility,
            ]
        );
        assert!((full.confidence - 0.92).abs() < f64::EPSILON);
    }

    #[test]
    fn caps_output_at_ten_sorted_by_confidence() {
        // 15 entities each parked on a hotspot: 15 raw alerts.
        let hotspots = vec![hotspot(-25.0, 28.0)];
        let mut records = Vec::new();
        for i in 0..15 {
            records.push(record(&format!("rhino_{i:03}"), -25.0, 28.0, 4.0));
        }
        let alerts = detect_anomalies(&records, &hotspots);
        assert_eq!(alerts.len(), MAX_ALERTS);
        for pair in alerts.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        // Stable sort: equal confidences keep encounter order.
        assert_eq!(alerts[0].entity_id, "rhino_000");
        assert_eq!(alerts[9].entity_id, "rhino_009");
    }

    #[test]
    fn entities_are_isolated_for_baseline_and_immobility() {
        // rhino_002's fast records must not raise rhino_001's baseline, and
        // immobility must not chain across entities.
        let records = vec![
            record("rhino_001", -25.0, 28.0, 0.05),
            record("rhino_002", -26.0, 29.0, 40.0),
            record("rhino_001", -25.0, 28.0, 0.05),
            record("rhino_002", -26.1, 29.0, 40.0),
        ];
        let alerts = detect_anomalies(&records, &[]);
        assert!(alerts.iter().all(|a| a.entity_id == "rhino_001"));
        assert_eq!(
            alerts
                .iter()
                .filter(|a| a.reasons.contains(&AlertReason::ProlongedImmobility))
                .count(),
            1
        );
    }
}
