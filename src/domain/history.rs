use serde::{Deserialize, Serialize};

use crate::domain::types::{HistoryEntryId, Note, PetId, RequiredNote};

/// Kind of medical record.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RecordKind {
    #[serde(rename = "consulta")]
    Consultation,
    #[serde(rename = "vacunación")]
    Vaccination,
    #[serde(rename = "cirugía")]
    Surgery,
    #[serde(rename = "emergencia")]
    Emergency,
    #[serde(rename = "estética")]
    Grooming,
    #[serde(rename = "otros")]
    Other,
}

impl RecordKind {
    pub const ALL: [RecordKind; 6] = [
        RecordKind::Consultation,
        RecordKind::Vaccination,
        RecordKind::Surgery,
        RecordKind::Emergency,
        RecordKind::Grooming,
        RecordKind::Other,
    ];

    pub fn code(self) -> &'static str {
        match self {
            RecordKind::Consultation => "consulta",
            RecordKind::Vaccination => "vacunación",
            RecordKind::Surgery => "cirugía",
            RecordKind::Emergency => "emergencia",
            RecordKind::Grooming => "estética",
            RecordKind::Other => "otros",
        }
    }

    /// Accepts the accented codes as well as their unaccented spelling.
    pub fn parse(value: &str) -> Option<Self> {
        let folded = fold_accents(&value.trim().to_lowercase());
        RecordKind::ALL
            .into_iter()
            .find(|kind| fold_accents(kind.code()) == folded)
    }
}

fn fold_accents(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            other => other,
        })
        .collect()
}

/// Detailed record of one pet, optionally linked to the appointment that produced it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: HistoryEntryId,
    #[serde(rename = "fechaHistorial")]
    pub date: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,
    #[serde(rename = "veterinarioHistorial", default)]
    pub veterinarian: Option<String>,
    #[serde(rename = "nombreMascota", default)]
    pub pet_name: String,
    #[serde(rename = "especie", default)]
    pub species: String,
    #[serde(rename = "sexo", default)]
    pub sex: Option<String>,
    #[serde(rename = "edad", default)]
    pub age: Option<String>,
    #[serde(rename = "raza", default)]
    pub breed: Option<String>,
    #[serde(rename = "peso", default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(rename = "foto", default)]
    pub photo: Option<String>,
    #[serde(rename = "nombreDueno", default)]
    pub owner_name: Option<String>,
    #[serde(rename = "telefonoDueno", default)]
    pub owner_phone: Option<String>,
    #[serde(rename = "citaId", default)]
    pub appointment_id: Option<i32>,
    #[serde(rename = "duracion", default)]
    pub duration_minutes: Option<u32>,
    #[serde(rename = "tipoCita", default)]
    pub appointment_kind: Option<String>,
    #[serde(rename = "estadoCita", default)]
    pub appointment_status: Option<String>,
    #[serde(rename = "veterinarioCita", default)]
    pub appointment_veterinarian: Option<String>,
    #[serde(rename = "observacionCita", default)]
    pub appointment_note: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HistoryPet {
    pub id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Row of the clinic-wide history table.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HistoryOverview {
    pub id: HistoryEntryId,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,
    #[serde(rename = "veterinarioNombre", default)]
    pub veterinarian: Option<String>,
    #[serde(rename = "mascota", default)]
    pub pet: HistoryPet,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewHistoryEntry {
    #[serde(rename = "mascotaId")]
    pub pet_id: PetId,
    #[serde(rename = "tipo")]
    pub kind: RecordKind,
    #[serde(rename = "descripcion")]
    pub description: RequiredNote,
    #[serde(rename = "detalles")]
    pub details: Note,
    #[serde(rename = "observaciones")]
    pub notes: Note,
}
