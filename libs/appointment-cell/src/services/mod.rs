pub mod calendar;
pub mod create_appointment;
pub mod day_availability;
pub mod month_availability;
pub mod provider_appointments;

pub use create_appointment::{CreateAppointmentInput, CreateAppointmentService};
pub use day_availability::ListProviderDayAvailabilityService;
pub use month_availability::ListProviderMonthAvailabilityService;
pub use provider_appointments::ListProviderAppointmentsService;
