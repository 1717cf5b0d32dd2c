use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Breed, Colour, PetId, PetName, PhotoUrl, SpeciesId};

pub const MIN_WEIGHT_KG: f64 = 0.1;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Sex {
    #[serde(rename = "Macho")]
    Male,
    #[serde(rename = "Hembra")]
    Female,
}

impl Sex {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "macho" => Some(Sex::Male),
            "hembra" => Some(Sex::Female),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PetSpecies {
    #[serde(rename = "ESP_NOMBRE")]
    pub name: String,
}

/// Pet as returned by `/mascotas/mis-mascotas`. `age` is computed by the server.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Pet {
    #[serde(rename = "MACT_ID")]
    pub id: PetId,
    #[serde(rename = "MACT_NOMBRE")]
    pub name: String,
    #[serde(rename = "MACT_SEXO", default)]
    pub sex: String,
    #[serde(rename = "MACT_FECHA_NACIMIENTO", default)]
    pub birth_date: String,
    #[serde(rename = "MACT_RAZA", default)]
    pub breed: String,
    #[serde(rename = "MACT_PESO", default)]
    pub weight: String,
    #[serde(rename = "MACT_COLOR", default)]
    pub colour: String,
    #[serde(rename = "MACT_FOTO", default)]
    pub photo: Option<String>,
    #[serde(rename = "Especie", default)]
    pub species: PetSpecies,
    #[serde(rename = "edad", default)]
    pub age: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewPet {
    #[serde(rename = "MACT_NOMBRE")]
    pub name: PetName,
    #[serde(rename = "ESP_ID")]
    pub species_id: SpeciesId,
    #[serde(rename = "MACT_SEXO")]
    pub sex: Sex,
    #[serde(rename = "MACT_FECHA_NACIMIENTO")]
    pub birth_date: NaiveDate,
    #[serde(rename = "MACT_RAZA")]
    pub breed: Breed,
    #[serde(rename = "MACT_PESO")]
    pub weight_kg: f64,
    #[serde(rename = "MACT_COLOR")]
    pub colour: Colour,
    #[serde(rename = "MACT_FOTO", skip_serializing_if = "Option::is_none")]
    pub photo: Option<PhotoUrl>,
}
