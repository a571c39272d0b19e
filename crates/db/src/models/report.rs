//! Monthly activity report entity model, DTOs, and read view.

use fieldreport_core::category::{Category, CategoryAverages, CategoryCounts};
use fieldreport_core::report::{
    validate_descriptive_field, validate_narrative_field, validate_required_categories,
};
use fieldreport_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{FromRow, Row};

/// A row from the `reports` table.
///
/// Category count sequences live in one [`CategoryCounts`] map rather
/// than a field per category; the row decoder walks [`Category::ALL`]
/// to fill it from the per-category JSONB columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub id: DbId,
    pub month_of: String,
    pub worker_name: String,
    pub area_of_assignment: String,
    pub name_of_church: String,
    pub narrative_report: String,
    pub challenges_and_problem_encountered: String,
    pub prayer_request: String,
    #[serde(flatten)]
    pub counts: CategoryCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,
    pub average_attendance: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FromRow<'_, PgRow> for Report {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let mut counts = CategoryCounts::new();
        for category in Category::ALL {
            let column: Option<Json<Vec<u32>>> = row.try_get(category.key())?;
            if let Some(Json(sequence)) = column {
                counts.insert(category, sequence);
            }
        }

        let names: Option<Json<Vec<String>>> = row.try_get("names")?;

        Ok(Report {
            id: row.try_get("id")?,
            month_of: row.try_get("month_of")?,
            worker_name: row.try_get("worker_name")?,
            area_of_assignment: row.try_get("area_of_assignment")?,
            name_of_church: row.try_get("name_of_church")?,
            narrative_report: row.try_get("narrative_report")?,
            challenges_and_problem_encountered: row
                .try_get("challenges_and_problem_encountered")?,
            prayer_request: row.try_get("prayer_request")?,
            counts,
            names: names.map(|Json(names)| names),
            average_attendance: row.try_get("average_attendance")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl Report {
    /// Merge an update into this report. Fields absent from the update
    /// (including categories it does not mention) keep their current
    /// value; present fields overwrite.
    pub fn apply(&mut self, input: UpdateReport) {
        if let Some(month_of) = input.month_of {
            self.month_of = month_of;
        }
        if let Some(worker_name) = input.worker_name {
            self.worker_name = worker_name;
        }
        if let Some(area_of_assignment) = input.area_of_assignment {
            self.area_of_assignment = area_of_assignment;
        }
        if let Some(name_of_church) = input.name_of_church {
            self.name_of_church = name_of_church;
        }
        if let Some(narrative_report) = input.narrative_report {
            self.narrative_report = narrative_report;
        }
        if let Some(challenges) = input.challenges_and_problem_encountered {
            self.challenges_and_problem_encountered = challenges;
        }
        if let Some(prayer_request) = input.prayer_request {
            self.prayer_request = prayer_request;
        }
        if let Some(names) = input.names {
            self.names = Some(names);
        }
        if let Some(average_attendance) = input.average_attendance {
            self.average_attendance = average_attendance;
        }
        self.counts.merge(input.counts);
    }
}

/// DTO for creating a new report.
#[derive(Debug, Deserialize)]
pub struct CreateReport {
    pub month_of: String,
    pub worker_name: String,
    pub area_of_assignment: String,
    pub name_of_church: String,
    pub narrative_report: String,
    pub challenges_and_problem_encountered: String,
    pub prayer_request: String,
    #[serde(flatten)]
    pub counts: CategoryCounts,
    #[serde(default)]
    pub names: Option<Vec<String>>,
    #[serde(default)]
    pub average_attendance: f64,
}

impl CreateReport {
    /// Check every creation-time rule, returning the first violation.
    pub fn validate(&self) -> Result<(), String> {
        validate_descriptive_field("month_of", &self.month_of)?;
        validate_descriptive_field("worker_name", &self.worker_name)?;
        validate_descriptive_field("area_of_assignment", &self.area_of_assignment)?;
        validate_descriptive_field("name_of_church", &self.name_of_church)?;
        validate_narrative_field("narrative_report", &self.narrative_report)?;
        validate_narrative_field(
            "challenges_and_problem_encountered",
            &self.challenges_and_problem_encountered,
        )?;
        validate_narrative_field("prayer_request", &self.prayer_request)?;
        validate_required_categories(&self.counts)
    }
}

/// DTO for updating a report. Every field is optional; the update is a
/// partial merge, never a replacement.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateReport {
    pub month_of: Option<String>,
    pub worker_name: Option<String>,
    pub area_of_assignment: Option<String>,
    pub name_of_church: Option<String>,
    pub narrative_report: Option<String>,
    pub challenges_and_problem_encountered: Option<String>,
    pub prayer_request: Option<String>,
    #[serde(flatten)]
    pub counts: CategoryCounts,
    pub names: Option<Vec<String>>,
    pub average_attendance: Option<f64>,
}

impl UpdateReport {
    /// Validate the fields this update carries. Absent fields are not
    /// checked since they will keep their stored value.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref month_of) = self.month_of {
            validate_descriptive_field("month_of", month_of)?;
        }
        if let Some(ref worker_name) = self.worker_name {
            validate_descriptive_field("worker_name", worker_name)?;
        }
        if let Some(ref area_of_assignment) = self.area_of_assignment {
            validate_descriptive_field("area_of_assignment", area_of_assignment)?;
        }
        if let Some(ref name_of_church) = self.name_of_church {
            validate_descriptive_field("name_of_church", name_of_church)?;
        }
        if let Some(ref narrative_report) = self.narrative_report {
            validate_narrative_field("narrative_report", narrative_report)?;
        }
        if let Some(ref challenges) = self.challenges_and_problem_encountered {
            validate_narrative_field("challenges_and_problem_encountered", challenges)?;
        }
        if let Some(ref prayer_request) = self.prayer_request {
            validate_narrative_field("prayer_request", prayer_request)?;
        }
        Ok(())
    }
}

/// Read-facing representation of a report: every entity field plus one
/// derived average per category, computed fresh from the same snapshot.
#[derive(Debug, Serialize)]
pub struct ReportView {
    #[serde(flatten)]
    pub report: Report,
    #[serde(flatten)]
    pub averages: CategoryAverages,
}

impl ReportView {
    pub fn from_report(report: Report) -> Self {
        let averages = report.counts.averages();
        ReportView { report, averages }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
