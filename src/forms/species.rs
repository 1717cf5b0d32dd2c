use serde::Deserialize;
use validator::Validate;

use crate::domain::species::SpeciesPayload;
use crate::domain::types::SpeciesName;
use crate::forms::{FormError, not_blank};

/// Form backing both "create species" and "edit species".
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct SpeciesForm {
    #[validate(custom(function = "not_blank", message = "El nombre es requerido"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl TryFrom<SpeciesForm> for SpeciesPayload {
    type Error = FormError;

    fn try_from(form: SpeciesForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let name = SpeciesName::new(form.name)
            .map_err(|_| FormError::invalid("name", "El nombre es requerido"))?;
        Ok(SpeciesPayload::new(name, Some(form.description)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        let form = SpeciesForm {
            name: "   ".into(),
            description: "Gatos".into(),
        };

        let err = SpeciesPayload::try_from(form).unwrap_err();
        assert_eq!(err.field_errors().get("name"), Some("El nombre es requerido"));
    }

    #[test]
    fn blank_description_is_dropped() {
        let form = SpeciesForm {
            name: " Felino ".into(),
            description: " ".into(),
        };

        let payload = SpeciesPayload::try_from(form).unwrap();
        assert_eq!(payload.name.as_str(), "Felino");
        assert_eq!(payload.description, None);
    }
}
