//! Staff lookup controller.

use crate::{
    responses::{ok, AppError, ApiResult},
    state::AppState,
};
use booking_core::{AggregatedServiceView, BookingError, StaffMember};
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use tracing::debug;
use validator::ValidateEmail;

/// Creates the staff router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:email", get(get_staff_member))
        .route("/:email/services", get(get_staff_services))
}

/// Get a staff member by email.
async fn get_staff_member(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<StaffMember> {
    debug!("Get staff member request: {}", email);

    let email = validated_email(email)?;
    let staff_member = state
        .booking_service
        .find_staff_by_email(&email)
        .await?
        .ok_or_else(|| BookingError::not_found("StaffMember", &email))?;

    ok(staff_member)
}

/// Get the services of a staff member grouped by business.
async fn get_staff_services(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<AggregatedServiceView> {
    debug!("Get staff services request: {}", email);

    let email = validated_email(email)?;
    let view = state
        .booking_service
        .aggregate_services_by_email(&email)
        .await?;

    ok(view)
}

fn validated_email(email: String) -> Result<String, AppError> {
    if email.validate_email() {
        Ok(email)
    } else {
        Err(AppError(BookingError::validation(format!(
            "'{}' is not a valid email address",
            email
        ))))
    }
}
