//! Handlers for the `/api` report resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;

use fieldreport_core::error::CoreError;
use fieldreport_core::types::{DbId, Timestamp};
use fieldreport_db::models::report::{CreateReport, ReportView, UpdateReport};
use fieldreport_db::repositories::ReportRepo;

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Current instant in the configured reference timezone.
fn report_now(state: &AppState) -> Timestamp {
    Utc::now().with_timezone(&state.config.report_timezone)
}

/// POST /api
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateReport>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    input.validate().map_err(AppError::BadRequest)?;

    let report = ReportRepo::create(&state.pool, &input, report_now(&state)).await?;

    tracing::info!(
        report_id = report.id,
        month_of = %report.month_of,
        worker_name = %report.worker_name,
        "Report created"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Report created successfully",
        }),
    ))
}

/// GET /api
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<ReportView>>>> {
    let reports = ReportRepo::list(&state.pool).await?;
    let views = reports.into_iter().map(ReportView::from_report).collect();
    Ok(Json(DataResponse { data: views }))
}

/// GET /api/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ReportView>>> {
    let report = ReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Report",
            id,
        }))?;

    Ok(Json(DataResponse {
        data: ReportView::from_report(report),
    }))
}

/// PUT /api/{id}
///
/// Partial merge: fields absent from the body keep their stored value.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReport>,
) -> AppResult<Json<MessageResponse>> {
    input.validate().map_err(AppError::BadRequest)?;

    let mut report = ReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Report",
            id,
        }))?;

    report.apply(input);

    ReportRepo::update(&state.pool, &report, report_now(&state))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Report",
            id,
        }))?;

    tracing::info!(report_id = id, "Report updated");

    Ok(Json(MessageResponse {
        message: "Report updated successfully",
    }))
}

/// DELETE /api/{id}
///
/// Fetch-then-delete: deleting an id that does not exist is a 404, even
/// though the storage-layer delete itself is idempotent.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let report = ReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Report",
            id,
        }))?;

    ReportRepo::delete(&state.pool, report.id).await?;

    tracing::info!(report_id = id, "Report deleted");

    Ok(Json(MessageResponse {
        message: "Report deleted successfully",
    }))
}
