//! JSON API Handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use storefront_core::{CheckoutRequest, ClientSecret, ErrorBody, ProductList, SessionId};
use storefront_payments::{catalog, intent, session, PaymentError};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub gateway: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentResponse {
    pub client_secret: ClientSecret,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: SessionId,
}

// ============================================================================
// Errors
// ============================================================================

/// Anything a JSON handler can answer with instead of success
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error("Invalid request body: {0}")]
    Body(#[from] JsonRejection),

    #[error("Request carries neither Origin nor Host")]
    MissingOrigin,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Payment(e) => e.into_response(),
            Self::Body(rejection) => {
                tracing::warn!(error = %rejection, "Rejected request body");
                bad_request("Invalid request body")
            }
            Self::MissingOrigin => {
                tracing::warn!("Checkout request without Origin or Host header");
                bad_request("Unable to determine request origin")
            }
        }
    }
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody::new(message))).into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        gateway: state.gateway.name().to_string(),
    })
}

/// `GET /api/products`
pub async fn list_products(State(state): State<AppState>) -> Result<Json<ProductList>, ApiError> {
    let items = catalog::list_products(state.gateway.as_ref()).await?;
    Ok(Json(ProductList { items }))
}

/// `POST /api/create-payment-intent`
pub async fn create_payment_intent(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<IntentResponse>, ApiError> {
    let Json(request) = payload?;

    let client_secret = intent::create_intent(state.gateway.as_ref(), &request).await?;

    Ok(Json(IntentResponse { client_secret }))
}

/// `POST /api/checkout` (hosted checkout)
pub async fn create_checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let Json(request) = payload?;
    let origin = request_origin(&headers).ok_or(ApiError::MissingOrigin)?;

    let id = session::create_session(state.gateway.as_ref(), &request, &origin).await?;

    Ok(Json(SessionResponse { id }))
}

// ============================================================================
// Request Origin
// ============================================================================

/// Origin the browser called us from, for building return URLs
pub fn request_origin(headers: &HeaderMap) -> Option<String> {
    header_value(headers, header::ORIGIN.as_str())
        .filter(|origin| *origin != "null")
        .map(str::to_string)
        .or_else(|| base_url(headers))
}

/// `{proto}://{host}` of the current request, honouring a fronting proxy
pub fn base_url(headers: &HeaderMap) -> Option<String> {
    let host = header_value(headers, header::HOST.as_str())?;
    let proto = header_value(headers, "x-forwarded-proto").unwrap_or("http");
    Some(format!("{proto}://{host}"))
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
