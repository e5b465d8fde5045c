//! Conversion of domain and request errors into HTTP responses
//!
//! Every non-200 body is an [`ErrorResponse`]. Store and internal failures
//! are already logged by the coordinator, so nothing is logged here.

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    web, HttpRequest, HttpResponse, ResponseError,
};
use validator::ValidationErrors;

use ov_core::errors::DomainError;
use ov_shared::ErrorResponse;

/// Error returned by route handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
            })
            .collect();
        messages.sort();
        ApiError::Validation(messages.join("; "))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::InvalidInput { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(message) => ErrorResponse::new("invalid_input", message.clone()),
            ApiError::Domain(err) => {
                let message = match err {
                    DomainError::InvalidInput { message } => message.clone(),
                    DomainError::StoreUnavailable { .. } => {
                        "Verification store is unavailable, please retry".to_string()
                    }
                    DomainError::Internal { .. } => "An internal error occurred".to_string(),
                };
                ErrorResponse::new(err.error_code(), message)
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// JSON extractor settings: malformed bodies answer 400 `invalid_input`
///
/// The content type is not enforced; browser clients post JSON as text.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .content_type_required(false)
        .error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest()
        .json(ErrorResponse::new("invalid_input", format!("Invalid JSON body: {}", err)));
    InternalError::from_response(err, response).into()
}

/// Fallback for a known path called with the wrong method
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorResponse::code_only("method_not_allowed"))
}

/// Fallback for unknown paths
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "not_found",
        "The requested resource was not found",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::from(DomainError::invalid_input("bad")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(DomainError::store_unavailable("down")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::invalid_input("contact is required").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn test_store_details_are_not_exposed() {
        let response = ApiError::from(DomainError::store_unavailable("redis://10.0.0.3 refused"))
            .error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "store_unavailable");
        assert!(!body["message"].as_str().unwrap().contains("10.0.0.3"));
    }
}
