use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{AppointmentId, AppointmentReason, Note, PetId, VeterinarianId};

pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// Filter keys understood by `/cita/filtrar`.
pub const FILTER_DATE: &str = "fecha";
pub const FILTER_STATUS: &str = "estado";
pub const FILTER_KIND: &str = "tipo";
pub const FILTER_VETERINARIAN: &str = "veterinarioId";
pub const FILTER_PET: &str = "mascotaId";

pub const FILTER_KEYS: [&str; 5] = [
    FILTER_DATE,
    FILTER_STATUS,
    FILTER_KIND,
    FILTER_VETERINARIAN,
    FILTER_PET,
];

/// Workflow state of an appointment. States this client does not know decode
/// as [`AppointmentStatus::Unknown`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "&'static str")]
pub enum AppointmentStatus {
    Pending,
    Cancelled,
    Attended,
    Unknown,
}

impl From<String> for AppointmentStatus {
    fn from(value: String) -> Self {
        AppointmentStatus::parse(&value).unwrap_or(AppointmentStatus::Unknown)
    }
}

impl From<AppointmentStatus> for &'static str {
    fn from(value: AppointmentStatus) -> Self {
        value.label()
    }
}

impl AppointmentStatus {
    /// Label used both for display and as the `estado` filter value.
    pub fn label(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pendiente",
            AppointmentStatus::Cancelled => "Cancelada",
            AppointmentStatus::Attended => "Atendida",
            AppointmentStatus::Unknown => "Desconocido",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        [
            AppointmentStatus::Pending,
            AppointmentStatus::Cancelled,
            AppointmentStatus::Attended,
        ]
        .into_iter()
        .find(|status| status.label().eq_ignore_ascii_case(value.trim()))
    }
}

/// Kind of visit offered when booking.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AppointmentKind {
    #[default]
    #[serde(rename = "consulta")]
    Consultation,
    #[serde(rename = "vacunacion")]
    Vaccination,
    #[serde(rename = "cirugia")]
    Surgery,
    #[serde(rename = "emergencia")]
    Emergency,
    #[serde(rename = "estética")]
    Grooming,
    #[serde(rename = "otros")]
    Other,
}

impl AppointmentKind {
    pub const ALL: [AppointmentKind; 6] = [
        AppointmentKind::Consultation,
        AppointmentKind::Vaccination,
        AppointmentKind::Surgery,
        AppointmentKind::Emergency,
        AppointmentKind::Grooming,
        AppointmentKind::Other,
    ];

    pub fn code(self) -> &'static str {
        match self {
            AppointmentKind::Consultation => "consulta",
            AppointmentKind::Vaccination => "vacunacion",
            AppointmentKind::Surgery => "cirugia",
            AppointmentKind::Emergency => "emergencia",
            AppointmentKind::Grooming => "estética",
            AppointmentKind::Other => "otros",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        AppointmentKind::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(value))
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AppointmentPet {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "especie", default)]
    pub species: String,
    #[serde(rename = "sexo", default)]
    pub sex: Option<String>,
    #[serde(rename = "edad", default)]
    pub age: Option<String>,
    #[serde(rename = "raza", default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(rename = "peso", default)]
    pub weight: Option<f64>,
    #[serde(rename = "foto", default)]
    pub photo: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct VeterinarianRef {
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Appointment as shown to clinic staff.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: AppointmentId,
    #[serde(rename = "mascota")]
    pub pet: AppointmentPet,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "hora")]
    pub time: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "estado")]
    pub status: AppointmentStatus,
    #[serde(rename = "motivo", default)]
    pub reason: Option<String>,
    #[serde(rename = "observacionMedica", default)]
    pub medical_note: Option<String>,
    #[serde(rename = "veterinario", default)]
    pub veterinarian: Option<VeterinarianRef>,
}

/// Appointment as listed for the pet owner who booked it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OwnAppointment {
    pub id: AppointmentId,
    #[serde(rename = "mascota")]
    pub pet: AppointmentPet,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "hora")]
    pub time: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "estado")]
    pub status: AppointmentStatus,
    #[serde(rename = "motivo", default)]
    pub reason: Option<String>,
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,
    #[serde(rename = "veterinario", default)]
    pub veterinarian: Option<VeterinarianRef>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewAppointment {
    #[serde(rename = "MACT_ID")]
    pub pet_id: PetId,
    #[serde(rename = "CIT_FECHACITA")]
    pub date: NaiveDate,
    #[serde(rename = "CIT_HORA", serialize_with = "serialize_time")]
    pub time: NaiveTime,
    #[serde(rename = "CIT_DURACION")]
    pub duration_minutes: u32,
    #[serde(rename = "CIT_TIPO")]
    pub kind: AppointmentKind,
    #[serde(rename = "CIT_MOTIVOCITA")]
    pub reason: AppointmentReason,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Reschedule {
    #[serde(rename = "nuevaFecha")]
    pub date: NaiveDate,
    #[serde(rename = "nuevaHora", serialize_with = "serialize_time")]
    pub time: NaiveTime,
    #[serde(rename = "motivo", skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Staff commands closing an appointment.
#[derive(Clone, Debug, PartialEq)]
pub enum AppointmentAction {
    Cancel(Note),
    Attend(Note),
}

/// Typed view of the management filters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppointmentFilter {
    pub date: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
    pub kind: Option<String>,
    pub veterinarian: Option<VeterinarianId>,
    pub pet: Option<PetId>,
}

impl AppointmentFilter {
    /// Key/value pairs for every filter that is set.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(date) = self.date {
            pairs.push((FILTER_DATE, date.format("%Y-%m-%d").to_string()));
        }
        if let Some(status) = self.status {
            pairs.push((FILTER_STATUS, status.label().to_string()));
        }
        if let Some(kind) = self.kind.as_ref().filter(|k| !k.trim().is_empty()) {
            pairs.push((FILTER_KIND, kind.trim().to_string()));
        }
        if let Some(vet) = self.veterinarian {
            pairs.push((FILTER_VETERINARIAN, vet.to_string()));
        }
        if let Some(pet) = self.pet {
            pairs.push((FILTER_PET, pet.to_string()));
        }
        pairs
    }
}

/// Reply of the reschedule/cancel/attend endpoints.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ActionReply {
    #[serde(rename = "mensaje", default)]
    pub message: String,
}

fn serialize_time<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&time.format("%H:%M:%S").to_string())
}
