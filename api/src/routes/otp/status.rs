use actix_web::{web, HttpResponse};

use ov_shared::mask_contact;

use crate::app::AppState;
use crate::dto::{StatusQuery, StatusResponse};
use crate::handlers::ApiError;

/// Handler for `GET /otp/status?contact=...`
pub async fn status(
    state: web::Data<AppState>,
    query: web::Query<StatusQuery>,
) -> Result<HttpResponse, ApiError> {
    let contact = query
        .into_inner()
        .contact
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::invalid_input("contact is required"))?;

    let verified = state.otp_service.is_verified(&contact).await?;

    Ok(HttpResponse::Ok().json(StatusResponse {
        contact: mask_contact(contact.trim()),
        verified,
    }))
}
