//! Appointment workflows outside the management list: owner booking and
//! staff lookups.

use crate::domain::access::Capability;
use crate::domain::appointment::{Appointment, NewAppointment, OwnAppointment};
use crate::domain::types::{AppointmentId, PetId};
use crate::dto::appointments::BookingPageData;
use crate::forms::appointment::BookingForm;
use crate::gateway::{AppointmentGateway, PetGateway};
use crate::services::{ServiceError, ServiceResult, ensure_capability};
use crate::session::Session;

const LOAD_OWN_ERROR: &str = "Error al cargar tus citas";

/// Loads the owner's pets and appointments concurrently.
pub async fn booking_page<G>(gateway: &G, session: &Session) -> ServiceResult<BookingPageData>
where
    G: AppointmentGateway + PetGateway + ?Sized,
{
    ensure_capability(session, Capability::BookAppointment)?;

    let (pets, appointments) = futures::join!(gateway.my_pets(), gateway.my_appointments());

    let pets = pets.map_err(|err| {
        log::error!("Failed to load own pets: {err}");
        ServiceError::gateway(err, "Error al cargar las mascotas")
    })?;
    let appointments = appointments.map_err(|err| {
        log::error!("Failed to load own appointments: {err}");
        ServiceError::gateway(err, LOAD_OWN_ERROR)
    })?;

    Ok(BookingPageData { pets, appointments })
}

/// Validates and books an appointment, then returns the refreshed own list.
pub async fn book_appointment<G>(
    gateway: &G,
    session: &Session,
    form: BookingForm,
) -> ServiceResult<Vec<OwnAppointment>>
where
    G: AppointmentGateway + ?Sized,
{
    ensure_capability(session, Capability::BookAppointment)?;

    let appointment = NewAppointment::try_from(form)?;

    gateway.book_appointment(&appointment).await.map_err(|err| {
        log::error!("Failed to book appointment for pet {}: {err}", appointment.pet_id);
        ServiceError::gateway(err, "Error al crear la cita")
    })?;

    own_appointments(gateway).await
}

/// Cancels one of the owner's appointments and returns the refreshed list.
pub async fn cancel_own<G>(
    gateway: &G,
    session: &Session,
    id: AppointmentId,
) -> ServiceResult<Vec<OwnAppointment>>
where
    G: AppointmentGateway + ?Sized,
{
    ensure_capability(session, Capability::BookAppointment)?;

    gateway.cancel_own_appointment(id).await.map_err(|err| {
        log::error!("Failed to cancel appointment {id}: {err}");
        ServiceError::gateway(err, "Error al cancelar la cita")
    })?;

    own_appointments(gateway).await
}

async fn own_appointments<G>(gateway: &G) -> ServiceResult<Vec<OwnAppointment>>
where
    G: AppointmentGateway + ?Sized,
{
    gateway.my_appointments().await.map_err(|err| {
        log::error!("Failed to load own appointments: {err}");
        ServiceError::gateway(err, LOAD_OWN_ERROR)
    })
}

/// Loads one appointment with the pet details for the staff detail view.
pub async fn appointment_details<G>(
    gateway: &G,
    session: &Session,
    id: AppointmentId,
) -> ServiceResult<Appointment>
where
    G: AppointmentGateway + ?Sized,
{
    ensure_capability(session, Capability::ManageAppointments)?;

    gateway.appointment_details(id).await.map_err(|err| {
        log::error!("Failed to load appointment {id}: {err}");
        ServiceError::gateway(err, "Error al cargar los detalles de la cita")
    })
}

/// Loads every appointment of one pet.
pub async fn appointments_for_pet<G>(
    gateway: &G,
    session: &Session,
    pet: PetId,
) -> ServiceResult<Vec<Appointment>>
where
    G: AppointmentGateway + ?Sized,
{
    ensure_capability(session, Capability::ManageAppointments)?;

    gateway.appointments_for_pet(pet).await.map_err(|err| {
        log::error!("Failed to load appointments of pet {pet}: {err}");
        ServiceError::gateway(err, "Error al cargar las citas de la mascota")
    })
}
