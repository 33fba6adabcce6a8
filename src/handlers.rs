// Handler function imports
use axum::body::Bytes;
use axum::debug_handler;
use axum::extract::{Json, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::get, routing::post};
use axum_extra::extract::{Query, QueryRejection};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::error::AppError;
use crate::record::{Record, Table};
use crate::stats::{self, LatencyQuery, RegionStats};

#[derive(Clone)]
pub struct AppState {
	pub table: Table,
}

// ?class=A&class=B
#[derive(Debug, Default, Deserialize)]
pub struct ClassFilter {
	#[serde(default, rename = "class")]
	pub classes: Vec<String>,
}

#[derive(Serialize)]
pub struct StudentsResponse<'a> {
	pub students: Vec<&'a Record>,
}

// Handler for /api
#[debug_handler]
async fn get_students(
	State(state): State<AppState>,
	filter: Result<Query<ClassFilter>, QueryRejection>,
) -> Result<Response, AppError> {
	let Query(filter) = filter?;
	let students = state.table.with_classes(&filter.classes);
	debug!(classes = filter.classes.len(), matched = students.len(), "Filtered records");
	// Serialized here while the rows are still borrowed from the table
	Ok(Json(StudentsResponse { students }).into_response())
}

// Handler for /api/latency
// The body is decoded as JSON whatever the Content-Type header says
#[debug_handler]
async fn get_latency_metrics(
	State(state): State<AppState>,
	body: Bytes,
) -> Result<Json<IndexMap<String, RegionStats>>, AppError> {
	let query: LatencyQuery = serde_json::from_slice(&body)?;
	let results = stats::aggregate(&state.table, &query);
	debug!(requested = query.regions.len(), returned = results.len(), threshold_ms = query.threshold_ms, "Aggregated latency");
	Ok(Json(results))
}

// Handler for /api/health
#[debug_handler]
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
	Json(serde_json::json!({ "status": "ok", "records": state.table.len() }))
}

// Any origin may call the API with credentials, so the origin and headers are echoed back
fn cors() -> CorsLayer {
	CorsLayer::new()
		.allow_origin(AllowOrigin::mirror_request())
		.allow_methods([Method::GET, Method::POST, Method::OPTIONS])
		.allow_headers(AllowHeaders::mirror_request())
		.allow_credentials(true)
}

pub fn create_app(table: Table) -> Router {
	let state = AppState { table };

	Router::new()
		.route("/api", get(get_students))
		.route("/api/latency", post(get_latency_metrics))
		.route("/api/health", get(health))
		.with_state(state)
		.layer(cors())
		.layer(TraceLayer::new_for_http())
}
