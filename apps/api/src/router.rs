use axum::{
    Router,
    routing::get,
};

use appointment_cell::{appointment_routes, provider_routes, AppointmentState};

pub fn create_router(state: AppointmentState) -> Router {
    Router::new()
        .route("/", get(|| async { "Scheduling API is running!" }))
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/providers", provider_routes(state))
}
