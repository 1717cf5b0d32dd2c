use serde::Deserialize;
use validator::Validate;

use crate::domain::history::{NewHistoryEntry, RecordKind};
use crate::domain::types::{Note, PetId, RequiredNote};
use crate::forms::{FormError, not_blank};

const REQUIRED: &str = "Complete los campos requeridos";

#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct HistoryEntryForm {
    #[validate(range(min = 1, message = "Complete los campos requeridos"))]
    pub pet_id: i32,
    #[validate(custom(function = "not_blank", message = "Complete los campos requeridos"))]
    pub kind: String,
    #[validate(custom(function = "not_blank", message = "Complete los campos requeridos"))]
    pub description: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub notes: String,
}

impl TryFrom<HistoryEntryForm> for NewHistoryEntry {
    type Error = FormError;

    fn try_from(form: HistoryEntryForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(NewHistoryEntry {
            pet_id: PetId::new(form.pet_id).map_err(|_| FormError::invalid("pet_id", REQUIRED))?,
            kind: RecordKind::parse(&form.kind)
                .ok_or_else(|| FormError::invalid("kind", "Tipo de registro no válido"))?,
            description: RequiredNote::new(form.description)
                .map_err(|_| FormError::invalid("description", REQUIRED))?,
            details: Note::new(form.details),
            notes: Note::new(form.notes),
        })
    }
}

/// Observation typed when cancelling or attending an appointment.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ObservationForm {
    #[serde(default)]
    pub observation: String,
}

impl From<ObservationForm> for Note {
    fn from(form: ObservationForm) -> Self {
        Note::new(form.observation)
    }
}
