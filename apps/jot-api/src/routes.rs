use axum::{
	Json, Router,
	extract::{Path, State, rejection::JsonRejection},
	http::{HeaderMap, StatusCode, header::AUTHORIZATION},
	response::{IntoResponse, Response},
	routing::{delete, get, post},
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::state::AppState;
use jot_service::{
	CreateNoteRequest, CreateNoteResponse, DeleteNoteResponse, Error as ServiceError, Identity,
	LoginRequest, LoginResponse, Note,
};

/// API routes only.
pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/api/login", post(login))
		.route("/api/notes", get(list_notes).post(create_note))
		.route("/api/notes/{id}", delete(delete_note))
		.with_state(state)
}

/// API routes plus the optional front-end directory and CORS headers.
pub fn app(state: AppState, cfg: &jot_config::Service) -> Router {
	let mut app = router(state);

	if let Some(dir) = cfg.static_dir.as_ref() {
		app = app.fallback_service(ServeDir::new(dir));
	}
	if cfg.cors_permissive {
		app = app.layer(CorsLayer::permissive());
	}

	app.layer(TraceLayer::new_for_http())
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn login(
	State(state): State<AppState>,
	payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
	let Json(payload) = payload?;
	let response = state.service.login(payload)?;
	Ok(Json(response))
}

async fn list_notes(
	State(state): State<AppState>,
	headers: HeaderMap,
) -> Result<Json<Vec<Note>>, ApiError> {
	let identity = identity_from_headers(&headers)?;
	let response = state.service.list(&identity).await?;
	Ok(Json(response))
}

async fn create_note(
	State(state): State<AppState>,
	headers: HeaderMap,
	payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<Json<CreateNoteResponse>, ApiError> {
	let identity = identity_from_headers(&headers)?;
	let Json(payload) = payload?;
	let response = state.service.create(&identity, payload).await?;
	Ok(Json(response))
}

async fn delete_note(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(id): Path<String>,
) -> Result<Json<DeleteNoteResponse>, ApiError> {
	let identity = identity_from_headers(&headers)?;
	let response = state.service.delete(&identity, &id).await?;
	Ok(Json(response))
}

/// The raw `Authorization` value is the identity. No scheme prefix is expected.
fn identity_from_headers(headers: &HeaderMap) -> Result<Identity, ApiError> {
	let raw = headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok());

	Ok(Identity::resolve(raw)?)
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, message: impl Into<String>) -> Self {
		Self { status, message: message.into() }
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let status = match &err {
			ServiceError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
			ServiceError::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
			ServiceError::Forbidden { .. } => StatusCode::FORBIDDEN,
			ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
			ServiceError::Storage { message } => {
				tracing::error!(error = %message, "Storage failure while handling request.");

				StatusCode::INTERNAL_SERVER_ERROR
			},
		};

		Self::new(status, err.to_string())
	}
}

impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		Self::new(StatusCode::BAD_REQUEST, format!("Invalid request: {}", rejection.body_text()))
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error: self.message };
		(self.status, Json(body)).into_response()
	}
}

#[cfg(test)]
mod tests {
	use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};

	use jot_service::Error as ServiceError;

	use crate::routes::ApiError;

	#[test]
	fn authorization_header_is_used_verbatim() {
		let mut headers = HeaderMap::new();

		headers.insert(AUTHORIZATION, "alice".parse().expect("valid header"));

		let identity = super::identity_from_headers(&headers).expect("Expected identity.");

		assert_eq!(identity.as_str(), "alice");
	}

	#[test]
	fn missing_authorization_header_is_unauthorized() {
		let err = super::identity_from_headers(&HeaderMap::new()).expect_err("Expected 401.");

		assert_eq!(err.status, StatusCode::UNAUTHORIZED);
	}

	#[test]
	fn service_errors_map_to_status_codes() {
		let cases = [
			(ServiceError::InvalidRequest { message: String::new() }, StatusCode::BAD_REQUEST),
			(ServiceError::Forbidden { message: String::new() }, StatusCode::FORBIDDEN),
			(ServiceError::NotFound { message: String::new() }, StatusCode::NOT_FOUND),
			(
				ServiceError::Storage { message: "down".to_string() },
				StatusCode::INTERNAL_SERVER_ERROR,
			),
		];

		for (err, status) in cases {
			assert_eq!(ApiError::from(err).status, status);
		}
	}
}
