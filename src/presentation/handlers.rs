use crate::application::auth_service::AuthService;
use crate::application::catalog_service::CatalogService;
use crate::application::family_service::FamilyService;
use crate::application::shopping_service::ShoppingListService;
use crate::data::memory::InMemoryStore;
use crate::domain::error::DomainError;
use crate::domain::ids::IdGenerator;
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, ResponseError};
use chrono::Utc;
use serde::Serialize;
use std::future::{Ready, ready};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

pub struct AppState {
    pub auth_service: AuthService<InMemoryStore>,
    pub family_service: FamilyService<InMemoryStore>,
    pub catalog_service: CatalogService<InMemoryStore>,
    pub shopping_service: ShoppingListService<InMemoryStore>,
}

impl AppState {
    pub fn new(
        store: Arc<InMemoryStore>,
        ids: Arc<dyn IdGenerator>,
        jwt_secret: String,
        token_ttl_secs: i64,
    ) -> Self {
        Self {
            auth_service: AuthService::new(store.clone(), ids.clone(), jwt_secret, token_ttl_secs),
            family_service: FamilyService::new(store.clone(), ids.clone()),
            catalog_service: CatalogService::new(store.clone(), ids.clone()),
            shopping_service: ShoppingListService::new(store, ids),
        }
    }
}

// Uniform error payload
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = self.to_string();

        match self {
            ApiError::Validation(_) => warn!(error = %error_msg, status = %status, "Validation error"),
            ApiError::NotFound(_) => warn!(error = %error_msg, status = %status, "Resource not found"),
            ApiError::Unauthorized(_) => warn!(error = %error_msg, status = %status, "Unauthorized"),
            ApiError::Storage(_) => error!(error = %error_msg, status = %status, "Storage error"),
            ApiError::Internal(_) => error!(error = %error_msg, status = %status, "Internal error"),
        }

        HttpResponse::build(status).json(ErrorResponse { error: error_msg })
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<DomainError>() {
            Some(DomainError::Validation(msg)) => ApiError::Validation(msg.clone()),
            Some(DomainError::NotFound(msg)) => ApiError::NotFound(msg.clone()),
            Some(DomainError::Unauthorized(msg)) => ApiError::Unauthorized(msg.clone()),
            Some(DomainError::Internal(msg)) => ApiError::Internal(msg.clone()),
            None => ApiError::Storage(format!("{:#}", err)),
        }
    }
}

/// Malformed or mistyped JSON bodies become 400s with the uniform payload.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Validation(format!("Invalid JSON: {}", err)).into()
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(user.ok_or_else(|| ApiError::Unauthorized("User not authenticated".to_string())))
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

#[instrument]
pub async fn health_check() -> HttpResponse {
    info!("Health check requested");
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound("Not found".to_string()))
}
