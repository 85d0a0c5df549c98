//! NID lookup handlers.

use std::time::Instant;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};

use crate::api::extract::FindBody;
use crate::http::response::{
    ApiError, Envelope, DISTRICT_FAILED, DIVISION_FAILED, FETCH_FAILED, SEARCH_FAILED,
};
use crate::http::AppState;
use crate::lookup::{execute, LookupError, Outcome, Query};
use crate::observability::metrics;

/// Load the dataset, run the query and wrap the result.
///
/// `failure` is the message returned if the query faults on a malformed record.
async fn run_query(
    state: &AppState,
    query: Query,
    failure: &'static str,
) -> Result<Response, ApiError> {
    let start = Instant::now();
    let dataset = state.source.snapshot().await;

    let result = execute(&query, &dataset);
    metrics::record_lookup(query.operation(), outcome_label(&result), start);

    match result {
        Ok(Outcome::Single(record)) => Ok(Json(Envelope::single(record)).into_response()),
        Ok(Outcome::Many(records)) => Ok(Json(Envelope::many(records)).into_response()),
        Err(e) => {
            tracing::debug!(operation = query.operation(), error = %e, "Lookup failed");
            Err(ApiError::from_lookup(e, failure))
        }
    }
}

fn outcome_label(result: &Result<Outcome<'_>, LookupError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(e) => error_label(e),
    }
}

fn error_label(error: &LookupError) -> &'static str {
    match error {
        LookupError::Validation => "invalid",
        LookupError::NotFound => "not_found",
        LookupError::Fault(_) => "fault",
    }
}

/// GET /api/nid
pub async fn list_all(State(state): State<AppState>) -> Result<Response, ApiError> {
    run_query(&state, Query::All, FETCH_FAILED).await
}

/// GET /id/{id}
///
/// An id that does not parse as an integer is simply not found.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    run_query(&state, Query::by_id(&id), FETCH_FAILED).await
}

/// POST /find with `{nidnumber, dob}`
pub async fn find_by_nid_and_dob(
    State(state): State<AppState>,
    body: FindBody,
) -> Result<Response, ApiError> {
    let query = match Query::nid_and_dob(body.get("nidnumber"), body.get("dob")) {
        Ok(query) => query,
        Err(e) => {
            metrics::record_lookup("by_nid_and_dob", error_label(&e), Instant::now());
            return Err(ApiError::from_lookup(e, FETCH_FAILED));
        }
    };
    run_query(&state, query, FETCH_FAILED).await
}

/// GET /find/{nid_number}
pub async fn get_by_nid_number(
    State(state): State<AppState>,
    Path(nid_number): Path<String>,
) -> Result<Response, ApiError> {
    run_query(&state, Query::ByNidNumber(nid_number), FETCH_FAILED).await
}

/// GET /search/name/{name}
pub async fn search_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    run_query(&state, Query::SearchByName(name), SEARCH_FAILED).await
}

/// GET /district/{district}
pub async fn list_by_district(
    State(state): State<AppState>,
    Path(district): Path<String>,
) -> Result<Response, ApiError> {
    run_query(&state, Query::ByDistrict(district), DISTRICT_FAILED).await
}

/// GET /division/{division}
pub async fn list_by_division(
    State(state): State<AppState>,
    Path(division): Path<String>,
) -> Result<Response, ApiError> {
    run_query(&state, Query::ByDivision(division), DIVISION_FAILED).await
}
