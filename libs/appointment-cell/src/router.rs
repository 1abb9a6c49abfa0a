// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_utils::extractor::auth_middleware;

use crate::handlers;
use crate::state::AppointmentState;

pub fn appointment_routes(state: AppointmentState) -> Router {
    Router::new()
        .route("/", post(handlers::create_appointment))
        .route("/me", get(handlers::list_provider_appointments))
        .layer(middleware::from_fn_with_state(Arc::clone(&state.config), auth_middleware))
        .with_state(state)
}

pub fn provider_routes(state: AppointmentState) -> Router {
    Router::new()
        .route("/{provider_id}/day-availability", get(handlers::get_provider_day_availability))
        .route("/{provider_id}/month-availability", get(handlers::get_provider_month_availability))
        .layer(middleware::from_fn_with_state(Arc::clone(&state.config), auth_middleware))
        .with_state(state)
}
