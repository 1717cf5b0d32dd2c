use serde::Deserialize;
use validator::Validate;

use crate::domain::pet::{MIN_WEIGHT_KG, NewPet, Sex};
use crate::domain::types::{Breed, Colour, PetName, PhotoUrl, SpeciesId};
use crate::forms::{FormError, not_blank, parse_date};

/// Pet registration form filled in by an owner.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct PetForm {
    #[validate(custom(function = "not_blank", message = "Nombre es requerido"))]
    pub name: String,
    #[validate(range(min = 1, message = "Especie es requerida"))]
    pub species_id: i32,
    #[validate(custom(function = "not_blank", message = "Sexo es requerido"))]
    pub sex: String,
    /// `YYYY-MM-DD`.
    #[validate(custom(function = "not_blank", message = "Fecha de nacimiento es requerida"))]
    pub birth_date: String,
    #[validate(custom(function = "not_blank", message = "Raza es requerida"))]
    pub breed: String,
    #[validate(range(min = 0.1, message = "Peso mínimo 0.1 kg"))]
    pub weight_kg: f64,
    #[validate(custom(function = "not_blank", message = "Color es requerido"))]
    pub colour: String,
    #[serde(default)]
    pub photo_url: String,
}

impl TryFrom<PetForm> for NewPet {
    type Error = FormError;

    fn try_from(form: PetForm) -> Result<Self, Self::Error> {
        form.validate()?;

        if form.weight_kg < MIN_WEIGHT_KG {
            return Err(FormError::invalid("weight_kg", "Peso mínimo 0.1 kg"));
        }
        let sex = Sex::parse(&form.sex)
            .ok_or_else(|| FormError::invalid("sex", "Sexo no válido"))?;
        let birth_date = parse_date(
            &form.birth_date,
            "birth_date",
            "Fecha de nacimiento no válida",
        )?;
        let photo = if form.photo_url.trim().is_empty() {
            None
        } else {
            Some(
                PhotoUrl::new(form.photo_url)
                    .map_err(|_| FormError::invalid("photo_url", "URL de foto no válida"))?,
            )
        };

        Ok(NewPet {
            name: PetName::new(form.name)
                .map_err(|_| FormError::invalid("name", "Nombre es requerido"))?,
            species_id: SpeciesId::new(form.species_id)
                .map_err(|_| FormError::invalid("species_id", "Especie es requerida"))?,
            sex,
            birth_date,
            breed: Breed::new(form.breed)
                .map_err(|_| FormError::invalid("breed", "Raza es requerida"))?,
            weight_kg: form.weight_kg,
            colour: Colour::new(form.colour)
                .map_err(|_| FormError::invalid("colour", "Color es requerido"))?,
            photo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> PetForm {
        PetForm {
            name: "Rex".into(),
            species_id: 1,
            sex: "Macho".into(),
            birth_date: "2021-01-10".into(),
            breed: "Labrador".into(),
            weight_kg: 28.5,
            colour: "Dorado".into(),
            photo_url: String::new(),
        }
    }

    #[test]
    fn converts_valid_form() {
        let pet = NewPet::try_from(valid_form()).unwrap();

        assert_eq!(pet.sex, Sex::Male);
        assert_eq!(pet.photo, None);
        assert_eq!(pet.birth_date.to_string(), "2021-01-10");
    }

    #[test]
    fn empty_required_fields_are_reported() {
        let form = PetForm {
            name: String::new(),
            species_id: 0,
            weight_kg: 0.0,
            ..valid_form()
        };

        let errors = NewPet::try_from(form).unwrap_err().field_errors();

        assert_eq!(errors.get("name"), Some("Nombre es requerido"));
        assert_eq!(errors.get("species_id"), Some("Especie es requerida"));
        assert_eq!(errors.get("weight_kg"), Some("Peso mínimo 0.1 kg"));
    }

    #[test]
    fn rejects_unknown_sex_and_bad_date() {
        let form = PetForm {
            sex: "otro".into(),
            ..valid_form()
        };
        assert_eq!(
            NewPet::try_from(form).unwrap_err().field_errors().get("sex"),
            Some("Sexo no válido")
        );

        let form = PetForm {
            birth_date: "10/01/2021".into(),
            ..valid_form()
        };
        assert!(NewPet::try_from(form).is_err());
    }
}
