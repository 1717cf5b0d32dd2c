use serde::{Deserialize, Serialize};

use crate::domain::types::{SpeciesId, SpeciesName};

/// Filter key of the paginated species list.
pub const FILTER_SEARCH: &str = "search";

/// Catalog availability of a species.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SpeciesStatus {
    #[default]
    #[serde(rename = "activo")]
    Active,
    #[serde(rename = "inactivo")]
    Inactive,
}

impl SpeciesStatus {
    /// The status a toggle request moves the species to.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SpeciesStatus::Active => SpeciesStatus::Inactive,
            SpeciesStatus::Inactive => SpeciesStatus::Active,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpeciesStatus::Active => "activo",
            SpeciesStatus::Inactive => "inactivo",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Species {
    #[serde(rename = "ESP_ID")]
    pub id: SpeciesId,
    #[serde(rename = "ESP_NOMBRE")]
    pub name: String,
    #[serde(rename = "ESP_DESCRIPCION", default)]
    pub description: Option<String>,
    /// Missing on the lightweight list used by selects.
    #[serde(rename = "ESP_ESTADO", default)]
    pub status: SpeciesStatus,
    #[serde(rename = "ESP_FECHACAMBIO", default)]
    pub changed_at: Option<String>,
}

/// Body for both creating and updating a species.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SpeciesPayload {
    #[serde(rename = "ESP_NOMBRE")]
    pub name: SpeciesName,
    #[serde(rename = "ESP_DESCRIPCION", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SpeciesPayload {
    #[must_use]
    pub fn new(name: SpeciesName, description: Option<String>) -> Self {
        Self {
            name,
            description: description
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_record() {
        let species: Species = serde_json::from_str(
            r#"{"ESP_ID":3,"ESP_NOMBRE":"Canino","ESP_DESCRIPCION":null,"ESP_ESTADO":"inactivo"}"#,
        )
        .unwrap();

        assert_eq!(species.id.get(), 3);
        assert_eq!(species.name, "Canino");
        assert_eq!(species.description, None);
        assert_eq!(species.status, SpeciesStatus::Inactive);
    }

    #[test]
    fn payload_drops_blank_description() {
        let payload = SpeciesPayload::new(SpeciesName::new("Felino").unwrap(), Some("  ".into()));
        let body = serde_json::to_value(&payload).unwrap();

        assert_eq!(body, serde_json::json!({ "ESP_NOMBRE": "Felino" }));
    }
}
