//! Integration tests for the Nexus Index public API.
//!
//! Snapshots are built relative to a fixed "now" so every pillar, the trend
//! and the global score can be asserted exactly.

use chrono::{DateTime, Duration, TimeZone, Utc};
use nexus_index::{
    FetchError, IndexDataSource, IndexLevel, InMemorySource, JsonFileSource, NexusIndexData,
    PillarKey, ReportData, SessionData, SessionStatus, StudentRecord, Trend, compute_from_data_at,
    compute_nexus_index_at,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

fn session(status: SessionStatus, attended: Option<bool>, ago: i64) -> SessionData {
    SessionData {
        status,
        scheduled_date: days_ago(ago),
        rating: None,
        student_attended: attended,
        completed_at: (status == SessionStatus::Completed).then(|| days_ago(ago)),
    }
}

fn attended(ago: i64) -> SessionData {
    session(SessionStatus::Completed, Some(true), ago)
}

fn report(rating: u8, ago: i64) -> ReportData {
    ReportData {
        performance_rating: rating,
        engagement_level: None,
        created_at: days_ago(ago),
    }
}

fn student(account_age_days: i64) -> Option<StudentRecord> {
    Some(StudentRecord {
        id: "student-1".to_string(),
        created_at: days_ago(account_age_days),
    })
}

/// Weekly attendee over two months with one recent no-show.
fn steady_student() -> NexusIndexData {
    let mut sessions: Vec<SessionData> = [3, 10, 17, 24, 31, 38, 45, 52]
        .into_iter()
        .map(attended)
        .collect();
    sessions.push(session(SessionStatus::NoShow, None, 20));
    sessions.push(session(SessionStatus::Scheduled, None, -4));

    NexusIndexData {
        sessions,
        reports: vec![report(4, 5), report(5, 12), report(3, 40), report(4, 50)],
        aria_conversation_count: 6,
        aria_feedback_count: 4,
        diagnostic_count: 1,
        student: student(90),
    }
}

/// Student who was irregular a month ago and has attended every week since.
fn improving_student() -> NexusIndexData {
    let mut sessions: Vec<SessionData> = [2, 9, 16, 23].into_iter().map(attended).collect();
    sessions.push(session(SessionStatus::NoShow, None, 37));
    sessions.push(attended(44));
    sessions.push(session(SessionStatus::Cancelled, None, 51));

    NexusIndexData {
        sessions,
        reports: vec![report(4, 3), report(4, 17), report(2, 45)],
        aria_conversation_count: 2,
        aria_feedback_count: 1,
        diagnostic_count: 2,
        student: student(60),
    }
}

fn pillar_scores(data: &NexusIndexData) -> Vec<u32> {
    let result = compute_from_data_at(data, now()).unwrap();
    PillarKey::ALL
        .iter()
        .map(|key| result.pillar(*key).unwrap().score)
        .collect()
}

#[test]
fn steady_student_scores_excellent() {
    let result = compute_from_data_at(&steady_student(), now()).unwrap();

    assert_eq!(pillar_scores(&steady_student()), vec![89, 79, 76, 77]);
    let weighted: Vec<u32> = result.pillars.iter().map(|p| p.weighted).collect();
    assert_eq!(weighted, vec![27, 24, 15, 15]);
    assert_eq!(result.global_score, 81);
    assert_eq!(result.level, IndexLevel::Excellent);
    // The no-show and the upcoming booking both land in the recent window.
    assert_eq!(result.trend, Trend::Down);
    assert_eq!(result.data_points, 21);
    assert_eq!(result.computed_at, now());
}

#[test]
fn improving_student_trends_up() {
    let result = compute_from_data_at(&improving_student(), now()).unwrap();

    assert_eq!(pillar_scores(&improving_student()), vec![71, 65, 48, 65]);
    assert_eq!(result.global_score, 64);
    assert_eq!(result.level, IndexLevel::Bon);
    assert_eq!(result.trend, Trend::Up);
    assert_eq!(result.data_points, 14);
}

#[test]
fn global_score_is_sum_of_weighted_pillars() {
    for data in [steady_student(), improving_student()] {
        let result = compute_from_data_at(&data, now()).unwrap();

        let sum: u32 = result.pillars.iter().map(|p| p.weighted).sum();
        assert_eq!(result.global_score, sum.min(100));
        let weights: f64 = result.pillars.iter().map(|p| p.weight).sum();
        assert_eq!(weights, 1.0);
        for pillar in &result.pillars {
            assert!(pillar.score <= 100);
            assert_eq!(
                pillar.weighted,
                (f64::from(pillar.score) * pillar.weight).round() as u32
            );
        }
    }
}

#[test]
fn fewer_than_three_sessions_hits_the_floor() {
    let data = NexusIndexData {
        sessions: vec![attended(1), attended(8)],
        reports: vec![report(5, 2)],
        aria_conversation_count: 10,
        aria_feedback_count: 10,
        diagnostic_count: 2,
        student: student(30),
    };

    let result = compute_from_data_at(&data, now()).unwrap();

    assert!(result.pillars.iter().all(|p| p.score == 0 && p.weighted == 0));
    assert_eq!(result.global_score, 0);
    assert_eq!(result.level, IndexLevel::Debutant);
    assert_eq!(result.trend, Trend::Stable);
    assert_eq!(result.data_points, 2);
}

#[test]
fn snapshot_without_student_has_no_index() {
    let mut data = steady_student();
    data.student = None;

    assert!(compute_from_data_at(&data, now()).is_none());
}

#[test]
fn session_order_does_not_change_the_index() {
    let data = steady_student();
    let mut shuffled = data.clone();
    shuffled.sessions.reverse();
    shuffled.reports.rotate_left(2);

    assert_eq!(
        compute_from_data_at(&data, now()),
        compute_from_data_at(&shuffled, now())
    );
}

#[test]
fn computation_is_deterministic_for_a_fixed_now() {
    let data = improving_student();

    let first = serde_json::to_string(&compute_from_data_at(&data, now())).unwrap();
    let second = serde_json::to_string(&compute_from_data_at(&data, now())).unwrap();

    assert_eq!(first, second);
}

#[test]
fn result_serializes_with_downstream_field_names() {
    let result = compute_from_data_at(&steady_student(), now()).unwrap();

    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["globalScore"], 81);
    assert_eq!(value["level"], "excellent");
    assert_eq!(value["trend"], "down");
    assert_eq!(value["dataPoints"], 21);
    assert_eq!(value["computedAt"], "2026-03-01T12:00:00Z");
    assert_eq!(value["pillars"][0]["key"], "assiduite");
    assert_eq!(value["pillars"][0]["label"], "Assiduité");
    assert_eq!(value["pillars"][3]["key"], "regularite");
    assert_eq!(value["pillars"][3]["weight"], 0.2);
}

#[tokio::test]
async fn in_memory_source_feeds_the_index() {
    let source = InMemorySource::new();
    source.insert("student-1", steady_student()).await;

    let result = compute_nexus_index_at(&source, "student-1", now())
        .await
        .unwrap();

    assert_eq!(result.global_score, 81);
}

#[tokio::test]
async fn json_file_source_reads_snapshots_from_disk() {
    let dir = tempfile::TempDir::new().unwrap();
    let json = serde_json::to_string_pretty(&improving_student()).unwrap();
    tokio::fs::write(dir.path().join("student-1.json"), json)
        .await
        .unwrap();
    let source = JsonFileSource::new(dir.path());

    let data = source.fetch("student-1").await.unwrap();
    let result = compute_nexus_index_at(&source, "student-1", now())
        .await
        .unwrap();

    assert_eq!(data, improving_student());
    assert_eq!(result.global_score, 64);
    assert_eq!(result.trend, Trend::Up);
}

#[tokio::test]
async fn json_file_source_rejects_path_traversal() {
    let dir = tempfile::TempDir::new().unwrap();
    let source = JsonFileSource::new(dir.path());

    let result = compute_nexus_index_at(&source, "../secrets", now()).await;

    assert!(matches!(result, Err(FetchError::InvalidStudentId(_))));
}

#[tokio::test]
async fn snapshot_with_null_student_is_not_found() {
    let dir = tempfile::TempDir::new().unwrap();
    tokio::fs::write(dir.path().join("orphan.json"), r#"{"student": null}"#)
        .await
        .unwrap();
    let source = JsonFileSource::new(dir.path());

    let result = compute_nexus_index_at(&source, "orphan", now()).await;

    assert!(matches!(result, Err(FetchError::StudentNotFound(id)) if id == "orphan"));
}
