use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::ApiError;

/// Handler for `POST /otp/verify` (also `POST /api/verify-otp`)
///
/// Every outcome, including a wrong or expired code, answers `200` with
/// `{success, message, remainingAttempts?}`. Only missing fields (`400`)
/// and store failures (`500`) are errors.
pub async fn verify_code(
    state: web::Data<AppState>,
    request: web::Json<VerifyCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.validate()?;

    let result = state
        .otp_service
        .submit_code(&request.contact, &request.otp_code)
        .await?;

    Ok(HttpResponse::Ok().json(VerifyCodeResponse::from(result)))
}
