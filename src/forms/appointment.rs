use serde::Deserialize;
use validator::Validate;

use crate::domain::appointment::{
    AppointmentKind, DEFAULT_DURATION_MINUTES, NewAppointment, Reschedule,
};
use crate::domain::types::{AppointmentReason, PetId};
use crate::forms::{FormError, not_blank, parse_date, parse_time};

/// Booking form on the owner's appointments screen.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct BookingForm {
    #[validate(range(min = 1, message = "Selecciona una mascota"))]
    pub pet_id: i32,
    #[validate(custom(function = "not_blank", message = "Selecciona una fecha"))]
    pub date: String,
    #[validate(custom(function = "not_blank", message = "Selecciona una hora"))]
    pub time: String,
    #[serde(default = "default_duration")]
    #[validate(range(min = 1, message = "Duración no válida"))]
    pub duration_minutes: u32,
    #[serde(default)]
    pub kind: String,
    #[validate(custom(function = "not_blank", message = "Ingresa el motivo de la cita"))]
    pub reason: String,
}

fn default_duration() -> u32 {
    DEFAULT_DURATION_MINUTES
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            pet_id: 0,
            date: String::new(),
            time: "08:00:00".to_string(),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            kind: AppointmentKind::default().code().to_string(),
            reason: String::new(),
        }
    }
}

impl TryFrom<BookingForm> for NewAppointment {
    type Error = FormError;

    fn try_from(form: BookingForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let kind = if form.kind.trim().is_empty() {
            AppointmentKind::default()
        } else {
            AppointmentKind::parse(&form.kind)
                .ok_or_else(|| FormError::invalid("kind", "Tipo de cita no válido"))?
        };

        Ok(NewAppointment {
            pet_id: PetId::new(form.pet_id)
                .map_err(|_| FormError::invalid("pet_id", "Selecciona una mascota"))?,
            date: parse_date(&form.date, "date", "Selecciona una fecha")?,
            time: parse_time(&form.time, "time", "Selecciona una hora")?,
            duration_minutes: form.duration_minutes,
            kind,
            reason: AppointmentReason::new(form.reason)
                .map_err(|_| FormError::invalid("reason", "Ingresa el motivo de la cita"))?,
        })
    }
}

/// Staff form moving an appointment to a new slot.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct RescheduleForm {
    #[validate(custom(function = "not_blank", message = "Selecciona una fecha"))]
    pub date: String,
    #[validate(custom(function = "not_blank", message = "Selecciona una hora"))]
    pub time: String,
    #[serde(default)]
    pub reason: String,
}

impl TryFrom<RescheduleForm> for Reschedule {
    type Error = FormError;

    fn try_from(form: RescheduleForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let reason = Some(form.reason.trim().to_string()).filter(|r| !r.is_empty());
        Ok(Reschedule {
            date: parse_date(&form.date, "date", "Selecciona una fecha")?,
            time: parse_time(&form.time, "time", "Selecciona una hora")?,
            reason,
        })
    }
}
