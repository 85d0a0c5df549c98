//! Route dispatch.
//!
//! The NID routes are mounted twice: under `/api/nid` and at the root, so both
//! `/api/nid/id/1` and `/id/1` reach the same handler. The root welcome page is
//! registered first and shadows the root-level "all records" listing, which stays
//! reachable at `/api/nid`.
//!
//! Paths are matched without regard to a trailing slash or the case of their
//! literal segments; see `http::request::canonicalize_path`.

pub mod extract;
pub mod handlers;
pub mod system;

use axum::{
    routing::{get, post},
    Router,
};

use crate::http::AppState;
use self::handlers::*;
use self::system::{api_status, health, not_found, welcome};

pub const NID_PREFIX: &str = "/api/nid";

const HEALTH: &str = "/health";
const STATUS: &str = "/api/status";

const BY_ID: &str = "/id/{id}";
const FIND: &str = "/find";
const FIND_BY_NID: &str = "/find/{nid_number}";
const SEARCH_BY_NAME: &str = "/search/name/{name}";
const BY_DISTRICT: &str = "/district/{district}";
const BY_DIVISION: &str = "/division/{division}";

const LOOKUP_PATHS: [&str; 6] = [BY_ID, FIND, FIND_BY_NID, SEARCH_BY_NAME, BY_DISTRICT, BY_DIVISION];

/// Every path template the router serves, across both mounts.
pub fn route_templates() -> Vec<String> {
    let mut templates: Vec<String> = ["/", HEALTH, STATUS, NID_PREFIX]
        .iter()
        .map(|path| path.to_string())
        .collect();
    for path in LOOKUP_PATHS {
        templates.push(format!("{}{}", NID_PREFIX, path));
        templates.push(path.to_string());
    }
    templates
}

/// Record lookup routes, relative to their mount point.
fn nid_routes() -> Router<AppState> {
    Router::new()
        .route(BY_ID, get(get_by_id))
        .route(FIND, post(find_by_nid_and_dob))
        .route(FIND_BY_NID, get(get_by_nid_number))
        .route(SEARCH_BY_NAME, get(search_by_name))
        .route(BY_DISTRICT, get(list_by_district))
        .route(BY_DIVISION, get(list_by_division))
}

/// The complete application router, before middleware.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route(HEALTH, get(health))
        .route(STATUS, get(api_status))
        .route(NID_PREFIX, get(list_all))
        .nest(NID_PREFIX, nid_routes())
        .merge(nid_routes())
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .with_state(state)
}
