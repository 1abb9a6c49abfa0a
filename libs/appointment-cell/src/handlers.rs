// libs/appointment-cell/src/handlers.rs
use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{AppointmentError, CreateAppointmentRequest, DayQuery, MonthQuery};
use crate::services::calendar;
use crate::services::{
    CreateAppointmentInput, CreateAppointmentService, ListProviderAppointmentsService,
    ListProviderDayAvailabilityService, ListProviderMonthAvailabilityService,
};
use crate::state::AppointmentState;

impl From<AppointmentError> for AppError {
    fn from(e: AppointmentError) -> Self {
        if e.is_validation() {
            return AppError::BadRequest(e.to_string());
        }

        match e {
            AppointmentError::Repository(inner) => AppError::Database(inner.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

// ==============================================================================
// APPOINTMENT HANDLERS
// ==============================================================================

/// Books the authenticated user with `provider_id` at `date`.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<AppointmentState>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let date = calendar::parse_request_date(&request.date, state.schedule().utc_offset)?;

    let service = CreateAppointmentService::new(&state);
    let appointment = service
        .execute(CreateAppointmentInput {
            provider_id: request.provider_id,
            user_id: user.id,
            date,
        })
        .await?;

    Ok(Json(json!(appointment)))
}

/// The authenticated provider's appointments for one day.
#[axum::debug_handler]
pub async fn list_provider_appointments(
    State(state): State<AppointmentState>,
    Extension(user): Extension<User>,
    Query(query): Query<DayQuery>,
) -> Result<Json<Value>, AppError> {
    let service = ListProviderAppointmentsService::new(&state);
    let appointments = service.execute(&user.id, query).await?;

    Ok(Json(json!(appointments)))
}

// ==============================================================================
// PROVIDER AVAILABILITY HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_provider_day_availability(
    State(state): State<AppointmentState>,
    Path(provider_id): Path<String>,
    Query(query): Query<DayQuery>,
) -> Result<Json<Value>, AppError> {
    let service = ListProviderDayAvailabilityService::new(&state);
    let availability = service.execute(&provider_id, query).await?;

    Ok(Json(json!(availability)))
}

#[axum::debug_handler]
pub async fn get_provider_month_availability(
    State(state): State<AppointmentState>,
    Path(provider_id): Path<String>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Value>, AppError> {
    let service = ListProviderMonthAvailabilityService::new(&state);
    let availability = service.execute(&provider_id, query).await?;

    Ok(Json(json!(availability)))
}
