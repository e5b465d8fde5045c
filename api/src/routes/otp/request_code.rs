use actix_web::{web, HttpResponse};
use validator::Validate;

use ov_core::domain::ContactType;

use crate::app::AppState;
use crate::dto::{RequestCodeRequest, RequestCodeResponse};
use crate::handlers::ApiError;

/// Handler for `POST /otp/request` (also `POST /api/send-otp`)
///
/// Issues a code for the contact and sends it out-of-band.
///
/// # Request Body
///
/// ```json
/// { "contact": "driver@example.com", "contactType": "email" }
/// ```
///
/// # Response
///
/// `200` with `{success: true, expiresAt, delivery, note?}` even when
/// delivery failed; the code stays valid until `expiresAt`. `400` for a
/// missing or malformed contact, `500` when the store is unavailable.
pub async fn request_code(
    state: web::Data<AppState>,
    request: web::Json<RequestCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.validate()?;

    let contact_type: ContactType = request.contact_type.parse()?;
    let result = state
        .otp_service
        .request_code(&request.contact, contact_type)
        .await?;

    Ok(HttpResponse::Ok().json(RequestCodeResponse::from(result)))
}
