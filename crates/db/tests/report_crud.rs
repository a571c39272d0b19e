//! Integration tests for report persistence.
//!
//! Exercises the repository against a real database:
//! - Serialization round-trip fidelity for every field
//! - Partial update semantics
//! - Missing-id behaviour for find, update, and delete

use assert_matches::assert_matches;
use chrono::{DurationRound, FixedOffset, TimeDelta, Utc};
use fieldreport_core::category::Category;
use fieldreport_core::types::Timestamp;
use fieldreport_db::models::report::{CreateReport, UpdateReport};
use fieldreport_db::repositories::ReportRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn reference_now() -> Timestamp {
    let manila = FixedOffset::east_opt(8 * 3600).unwrap();
    // Truncated to microseconds so values survive the TIMESTAMPTZ
    // round-trip unchanged.
    Utc::now()
        .with_timezone(&manila)
        .duration_trunc(TimeDelta::microseconds(1))
        .unwrap()
}

fn full_create(worker: &str) -> CreateReport {
    serde_json::from_value(serde_json::json!({
        "month_of": "January 2024",
        "worker_name": worker,
        "area_of_assignment": "Pampanga",
        "name_of_church": "Grace Fellowship",
        "narrative_report": "A fruitful month of ministry.",
        "challenges_and_problem_encountered": "Heavy rains cancelled one outreach.",
        "prayer_request": "For the upcoming youth camp.",
        "worship_service": [40, 45, 50, 42],
        "sunday_school": [15, 18, 20, 17],
        "prayer_meetings": [8, 9],
        "tithes_and_offerings": [5200, 4800, 5100, 5000],
        "home_visited": [3, 2, 4],
        "person_led_to_christ": [1, 0, 2],
        "names": ["Ana Reyes", "Ben Ocampo"],
        "average_attendance": 44.25
    }))
    .unwrap()
}

fn minimal_create(worker: &str) -> CreateReport {
    serde_json::from_value(serde_json::json!({
        "month_of": "February 2024",
        "worker_name": worker,
        "area_of_assignment": "Cebu",
        "name_of_church": "Hope Chapel",
        "narrative_report": "Quiet but steady.",
        "challenges_and_problem_encountered": "None of note.",
        "prayer_request": "Continued strength.",
        "worship_service": [30, 28],
        "sunday_school": [12, 11]
    }))
    .unwrap()
}

// ---------------------------------------------------------------------------
// Round-trip fidelity
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn saved_report_round_trips_every_field(pool: PgPool) {
    let now = reference_now();
    let input = full_create("Juan Dela Cruz");
    let saved = ReportRepo::create(&pool, &input, now).await.unwrap();

    assert!(saved.id > 0);
    assert_eq!(saved.created_at, now);
    assert_eq!(saved.updated_at, now);

    let fetched = ReportRepo::find_by_id(&pool, saved.id)
        .await
        .unwrap()
        .expect("saved report must be fetchable");

    assert_eq!(fetched, saved);
    assert_eq!(fetched.month_of, "January 2024");
    assert_eq!(
        fetched.counts.get(Category::WorshipService),
        Some(&vec![40, 45, 50, 42])
    );
    assert_eq!(
        fetched.counts.get(Category::TithesAndOfferings),
        Some(&vec![5200, 4800, 5100, 5000])
    );
    assert_eq!(
        fetched.counts.get(Category::PersonLedToChrist),
        Some(&vec![1, 0, 2])
    );
    assert_eq!(
        fetched.names,
        Some(vec!["Ana Reyes".to_string(), "Ben Ocampo".to_string()])
    );
    assert_eq!(fetched.average_attendance, 44.25);
}

#[sqlx::test]
async fn absent_categories_stay_absent(pool: PgPool) {
    let saved = ReportRepo::create(&pool, &minimal_create("Maria Santos"), reference_now())
        .await
        .unwrap();
    let fetched = ReportRepo::find_by_id(&pool, saved.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(fetched.counts.get(Category::Outreach), None);
    assert_eq!(fetched.counts.get(Category::FamilyDays), None);
    assert_eq!(fetched.names, None);
    // Unsupplied scalar defaults to zero, not NULL.
    assert_eq!(fetched.average_attendance, 0.0);
}

#[sqlx::test]
async fn empty_sequence_is_distinct_from_absent(pool: PgPool) {
    let mut input = minimal_create("Maria Santos");
    input.counts.insert(Category::Outreach, vec![]);

    let saved = ReportRepo::create(&pool, &input, reference_now())
        .await
        .unwrap();
    let fetched = ReportRepo::find_by_id(&pool, saved.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(fetched.counts.get(Category::Outreach), Some(&vec![]));
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn list_returns_every_row_in_id_order(pool: PgPool) {
    let now = reference_now();
    let first = ReportRepo::create(&pool, &full_create("First Worker"), now)
        .await
        .unwrap();
    let second = ReportRepo::create(&pool, &minimal_create("Second Worker"), now)
        .await
        .unwrap();

    let all = ReportRepo::list(&pool).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first.id);
    assert_eq!(all[1].id, second.id);
}

#[sqlx::test]
async fn list_on_empty_table_is_empty(pool: PgPool) {
    assert!(ReportRepo::list(&pool).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn descriptive_update_leaves_sequences_and_narratives_intact(pool: PgPool) {
    let created_at = reference_now();
    let mut report = ReportRepo::create(&pool, &full_create("Juan Dela Cruz"), created_at)
        .await
        .unwrap();
    let before = report.clone();

    let patch: UpdateReport = serde_json::from_value(serde_json::json!({
        "worker_name": "Pedro Reyes",
        "area_of_assignment": "Tarlac"
    }))
    .unwrap();
    report.apply(patch);

    let updated_at = reference_now();
    let stored = ReportRepo::update(&pool, &report, updated_at)
        .await
        .unwrap()
        .expect("row must still exist");

    assert_eq!(stored.worker_name, "Pedro Reyes");
    assert_eq!(stored.area_of_assignment, "Tarlac");
    assert_eq!(stored.counts, before.counts);
    assert_eq!(stored.narrative_report, before.narrative_report);
    assert_eq!(stored.prayer_request, before.prayer_request);
    assert_eq!(stored.names, before.names);
    assert_eq!(stored.created_at, created_at);
    assert_eq!(stored.updated_at, updated_at);
}

#[sqlx::test]
async fn category_update_overwrites_only_named_sequences(pool: PgPool) {
    let mut report = ReportRepo::create(&pool, &full_create("Juan Dela Cruz"), reference_now())
        .await
        .unwrap();

    let patch: UpdateReport = serde_json::from_value(serde_json::json!({
        "sunday_school": [19, 21, 22, 20]
    }))
    .unwrap();
    report.apply(patch);

    let stored = ReportRepo::update(&pool, &report, reference_now())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        stored.counts.get(Category::SundaySchool),
        Some(&vec![19, 21, 22, 20])
    );
    assert_eq!(
        stored.counts.get(Category::WorshipService),
        Some(&vec![40, 45, 50, 42])
    );
}

#[sqlx::test]
async fn update_of_missing_id_returns_none(pool: PgPool) {
    let mut report = ReportRepo::create(&pool, &minimal_create("Ghost"), reference_now())
        .await
        .unwrap();
    ReportRepo::delete(&pool, report.id).await.unwrap();

    report.worker_name = "Nobody".into();
    let result = ReportRepo::update(&pool, &report, reference_now())
        .await
        .unwrap();
    assert_matches!(result, None);
}

// ---------------------------------------------------------------------------
// Find / delete
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn find_missing_id_returns_none_not_error(pool: PgPool) {
    let result = ReportRepo::find_by_id(&pool, 999_999).await.unwrap();
    assert_matches!(result, None);
}

#[sqlx::test]
async fn delete_removes_the_row(pool: PgPool) {
    let saved = ReportRepo::create(&pool, &minimal_create("Maria Santos"), reference_now())
        .await
        .unwrap();

    assert!(ReportRepo::delete(&pool, saved.id).await.unwrap());
    assert_matches!(ReportRepo::find_by_id(&pool, saved.id).await.unwrap(), None);
}

#[sqlx::test]
async fn delete_of_missing_id_is_idempotent(pool: PgPool) {
    assert!(!ReportRepo::delete(&pool, 999_999).await.unwrap());
}
