//! DTOs that bundle what one screen needs from several gateway calls.

pub mod appointments;
pub mod dashboard;
