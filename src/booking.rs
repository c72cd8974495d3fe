//! Appointment booking
//!
//! There is no booking backend; booking only confirms the facility chosen.

use crate::coord::Facility;

/// Confirmation shown when the user books at `facility`
pub fn book_appointment(facility: &Facility) -> String {
    format!("Booking appointment at: {}", facility.name)
}
