//! Shared test fixtures for proctor-db unit tests.

use chrono::{Duration, TimeZone, Utc};
use proctor_core::entities::{
    Alert, BoundingBox, Detection, SessionInput, SuspiciousFinding,
};
use proctor_core::enums::AlertKind;

/// A ten-minute session with one suspicious object and two alerts.
pub fn sample_input(candidate: &str) -> SessionInput {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    SessionInput {
        candidate_name: candidate.to_string(),
        start_time: start,
        end_time: start + Duration::minutes(10),
        duration: 600,
        focus_lost_count: 2,
        no_face_count: 1,
        multiple_faces_count: 0,
        suspicious_objects: vec![SuspiciousFinding {
            detection: Detection::new("cell phone", 0.82, BoundingBox::new(4.0, 8.0, 60.0, 120.0)),
            keyword: "cell phone".into(),
        }],
        integrity_score: 81.5,
        alerts: vec![
            Alert {
                kind: AlertKind::FocusLost,
                message: Some("Window lost focus".into()),
                timestamp: start + Duration::minutes(3),
            },
            Alert {
                kind: AlertKind::SuspiciousObject,
                message: Some("cell phone detected".into()),
                timestamp: start + Duration::minutes(6),
            },
        ],
    }
}
