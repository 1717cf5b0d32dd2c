//! DTOs used by the owner's appointment screen.

use crate::domain::appointment::OwnAppointment;
use crate::domain::pet::Pet;

/// Data required to render the booking page.
#[derive(Debug, Default)]
pub struct BookingPageData {
    /// Pets the owner can book for.
    pub pets: Vec<Pet>,
    /// Appointments already booked by the owner.
    pub appointments: Vec<OwnAppointment>,
}

impl BookingPageData {
    /// A booking needs at least one registered pet.
    pub fn can_book(&self) -> bool {
        !self.pets.is_empty()
    }
}
