//! Repository for the `reports` table.
//!
//! Scalar and string fields are native columns; each activity category
//! is a nullable JSONB column holding its count sequence. Query text is
//! assembled from [`Category::ALL`] so the column set has a single
//! source of truth. Every operation is one SQL statement and therefore
//! one atomic transaction.

use fieldreport_core::category::Category;
use fieldreport_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::report::{CreateReport, Report};

/// Scalar columns written on insert and update, in bind order.
const SCALAR_COLUMNS: [&str; 9] = [
    "month_of",
    "worker_name",
    "area_of_assignment",
    "name_of_church",
    "narrative_report",
    "challenges_and_problem_encountered",
    "prayer_request",
    "names",
    "average_attendance",
];

/// Full SELECT column list: id, scalars, one JSONB column per
/// category, then the timestamps.
fn select_columns() -> String {
    let mut columns = vec!["id"];
    columns.extend(SCALAR_COLUMNS);
    columns.extend(Category::ALL.iter().map(|c| c.key()));
    columns.extend(["created_at", "updated_at"]);
    columns.join(", ")
}

/// `$1, $2, ..., $n` for a parameter list starting at `first`.
fn placeholders(first: usize, count: usize) -> String {
    (first..first + count)
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Provides CRUD operations for reports.
pub struct ReportRepo;

impl ReportRepo {
    /// Insert a new report stamped with `now`, returning the stored row
    /// with its assigned id.
    pub async fn create(
        pool: &PgPool,
        input: &CreateReport,
        now: Timestamp,
    ) -> Result<Report, sqlx::Error> {
        let mut insert_columns: Vec<&str> = SCALAR_COLUMNS.to_vec();
        insert_columns.extend(Category::ALL.iter().map(|c| c.key()));
        insert_columns.extend(["created_at", "updated_at"]);

        let query = format!(
            "INSERT INTO reports ({}) VALUES ({}) RETURNING {}",
            insert_columns.join(", "),
            placeholders(1, insert_columns.len()),
            select_columns(),
        );

        let mut q = sqlx::query_as::<_, Report>(&query)
            .bind(&input.month_of)
            .bind(&input.worker_name)
            .bind(&input.area_of_assignment)
            .bind(&input.name_of_church)
            .bind(&input.narrative_report)
            .bind(&input.challenges_and_problem_encountered)
            .bind(&input.prayer_request)
            .bind(input.names.as_ref().map(Json))
            .bind(input.average_attendance);
        for category in Category::ALL {
            q = q.bind(input.counts.get(category).map(Json));
        }
        q.bind(now).bind(now).fetch_one(pool).await
    }

    /// Find a report by id. `None` when the id does not exist; decode
    /// or connectivity failures surface as `Err`.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {} FROM reports WHERE id = $1", select_columns());
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every report, ordered by id for stable enumeration.
    pub async fn list(pool: &PgPool) -> Result<Vec<Report>, sqlx::Error> {
        let query = format!("SELECT {} FROM reports ORDER BY id", select_columns());
        sqlx::query_as::<_, Report>(&query).fetch_all(pool).await
    }

    /// Overwrite the row matching `report.id` with every field of
    /// `report`, setting updated_at to `now`. `created_at` is never
    /// touched. Returns the stored row, or `None` when the id vanished.
    pub async fn update(
        pool: &PgPool,
        report: &Report,
        now: Timestamp,
    ) -> Result<Option<Report>, sqlx::Error> {
        let mut set_columns: Vec<&str> = SCALAR_COLUMNS.to_vec();
        set_columns.extend(Category::ALL.iter().map(|c| c.key()));
        set_columns.push("updated_at");

        let assignments = set_columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ${}", i + 2))
            .collect::<Vec<_>>()
            .join(", ");

        let query = format!(
            "UPDATE reports SET {assignments} WHERE id = $1 RETURNING {}",
            select_columns(),
        );

        let mut q = sqlx::query_as::<_, Report>(&query)
            .bind(report.id)
            .bind(&report.month_of)
            .bind(&report.worker_name)
            .bind(&report.area_of_assignment)
            .bind(&report.name_of_church)
            .bind(&report.narrative_report)
            .bind(&report.challenges_and_problem_encountered)
            .bind(&report.prayer_request)
            .bind(report.names.as_ref().map(Json))
            .bind(report.average_attendance);
        for category in Category::ALL {
            q = q.bind(report.counts.get(category).map(Json));
        }
        q.bind(now).fetch_optional(pool).await
    }

    /// Delete a report by id. Returns `true` if a row was deleted;
    /// deleting an absent id is not an error here, the existence check
    /// happens one layer up via an explicit fetch.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
