//! Daily and multi-day sales reports, plus file exports.
//!
//! Every report is recomputed on request from the full transaction
//! history; a bad date or a failed read aborts the whole report. The PDF
//! and Excel exports reuse the exact same aggregate and only differ in
//! rendering.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde::Deserialize;

use warung_core::report::{daily_report, parse_report_date, revenue_by_day, DailyReport};
use warung_core::DEFAULT_REPORT_DAYS;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::render;
use crate::state::AppState;

use super::success;

#[derive(Debug, Deserialize)]
pub struct DailyParams {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AggregateParams {
    pub days: Option<String>,
}

/// Builds the daily aggregate for the (optional) requested date.
async fn build_daily(state: &AppState, date: Option<&str>) -> Result<DailyReport, ApiError> {
    let date = parse_report_date(date)?;
    let transactions = state.db.transactions().list().await?;
    Ok(daily_report(date, &transactions))
}

/// GET /api/reports/daily?date=YYYY-MM-DD
pub async fn daily(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(params): Query<DailyParams>,
) -> Result<impl IntoResponse, ApiError> {
    let report = build_daily(&state, params.date.as_deref()).await?;
    Ok(success(report))
}

/// GET /api/reports/aggregate?days=N
pub async fn aggregate(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(params): Query<AggregateParams>,
) -> Result<impl IntoResponse, ApiError> {
    // Anything that is not a positive integer silently falls back to
    // the default window, matching the lenient query contract.
    let days = params
        .days
        .as_deref()
        .and_then(|raw| raw.parse::<i64>().ok())
        .unwrap_or(DEFAULT_REPORT_DAYS);
    let transactions = state.db.transactions().list().await?;
    Ok(success(revenue_by_day(days, &transactions)))
}

/// GET /api/reports/daily/pdf?date=YYYY-MM-DD
pub async fn export_pdf(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(params): Query<DailyParams>,
) -> Result<impl IntoResponse, ApiError> {
    let report = build_daily(&state, params.date.as_deref()).await?;
    let bytes = render::pdf::render_pdf(&report)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"laporan-{}.pdf\"", report.date),
            ),
        ],
        bytes,
    ))
}

/// GET /api/reports/daily/excel?date=YYYY-MM-DD
pub async fn export_excel(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(params): Query<DailyParams>,
) -> Result<impl IntoResponse, ApiError> {
    let report = build_daily(&state, params.date.as_deref()).await?;
    let bytes = render::excel::render_excel(&report)?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"laporan-{}.xlsx\"", report.date),
            ),
        ],
        bytes,
    ))
}
