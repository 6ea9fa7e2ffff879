//! Booking listings controller.

use crate::{
    responses::{listing, ApiResult},
    state::AppState,
};
use booking_core::{Business, Collection, Service, StaffMember};
use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::debug;

/// Optional business scope of a listing.
#[derive(Debug, Default, Deserialize)]
pub struct BusinessScope {
    pub business_id: Option<String>,
}

impl BusinessScope {
    /// The business id, treating an empty parameter as unscoped.
    fn business_id(&self) -> Option<&str> {
        self.business_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Creates the booking router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/businesses", get(list_businesses))
        .route("/staff", get(list_staff))
        .route("/services", get(list_services))
}

/// List every booking business.
async fn list_businesses(State(state): State<AppState>) -> ApiResult<Collection<Business>> {
    debug!("List businesses request");

    let businesses = state.booking_service.list_businesses().await?;
    listing(businesses)
}

/// List staff of one business, or of all businesses.
async fn list_staff(
    State(state): State<AppState>,
    Query(scope): Query<BusinessScope>,
) -> ApiResult<Collection<StaffMember>> {
    debug!("List staff request: {:?}", scope.business_id());

    let staff = state.booking_service.list_staff(scope.business_id()).await?;
    listing(staff)
}

/// List services of one business, or of all businesses.
async fn list_services(
    State(state): State<AppState>,
    Query(scope): Query<BusinessScope>,
) -> ApiResult<Collection<Service>> {
    debug!("List services request: {:?}", scope.business_id());

    let services = state
        .booking_service
        .list_services(scope.business_id())
        .await?;
    listing(services)
}
