pub mod handlers;
pub mod models;
pub mod repositories;
pub mod router;
pub mod services;
pub mod state;

pub use models::*;
pub use repositories::{AppointmentsRepository, InMemoryAppointmentsRepository, SupabaseAppointmentsRepository};
pub use router::{appointment_routes, provider_routes};
pub use state::AppointmentState;
