//! Pet registration and the owner's pet list.

use crate::domain::access::Capability;
use crate::domain::pet::{NewPet, Pet};
use crate::domain::species::{Species, SpeciesStatus};
use crate::forms::pet::PetForm;
use crate::gateway::{PetGateway, SpeciesGateway};
use crate::services::{ServiceError, ServiceResult, ensure_capability};
use crate::session::Session;

/// Validates the form and registers the pet for the signed-in owner.
pub async fn register_pet<G>(gateway: &G, session: &Session, form: PetForm) -> ServiceResult<()>
where
    G: PetGateway + ?Sized,
{
    ensure_capability(session, Capability::RegisterPet)?;

    let pet = NewPet::try_from(form)?;

    gateway.register_pet(&pet).await.map_err(|err| {
        log::error!("Failed to register pet {}: {err}", pet.name);
        ServiceError::gateway(err, "Error al registrar la mascota")
    })
}

/// Loads the pets owned by the signed-in user.
pub async fn my_pets<G>(gateway: &G, session: &Session) -> ServiceResult<Vec<Pet>>
where
    G: PetGateway + ?Sized,
{
    ensure_capability(session, Capability::RegisterPet)?;

    gateway.my_pets().await.map_err(|err| {
        log::error!("Failed to load own pets: {err}");
        ServiceError::gateway(err, "Error al cargar las mascotas")
    })
}

/// Active species offered in the registration form.
pub async fn species_options<G>(gateway: &G, session: &Session) -> ServiceResult<Vec<Species>>
where
    G: SpeciesGateway + ?Sized,
{
    ensure_capability(session, Capability::RegisterPet)?;

    let species = gateway.list_species().await.map_err(|err| {
        log::error!("Failed to load species: {err}");
        ServiceError::gateway(err, "Error al cargar las especies")
    })?;

    Ok(species
        .into_iter()
        .filter(|s| s.status == SpeciesStatus::Active)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::SpeciesId;
    use crate::gateway::mock::MockGateway;
    use crate::services::test_support::signed_in;

    fn form() -> PetForm {
        PetForm {
            name: "Luna".into(),
            species_id: 1,
            sex: "Hembra".into(),
            birth_date: "2022-03-14".into(),
            breed: "Criolla".into(),
            weight_kg: 4.2,
            colour: "Negro".into(),
            photo_url: String::new(),
        }
    }

    fn species(id: i32, status: SpeciesStatus) -> Species {
        Species {
            id: SpeciesId::new(id).unwrap(),
            name: format!("Especie {id}"),
            description: None,
            status,
            changed_at: None,
        }
    }

    #[tokio::test]
    async fn registers_valid_pet() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_register_pet()
            .withf(|pet| pet.name.as_str() == "Luna" && pet.species_id.get() == 1)
            .times(1)
            .returning(|_| Ok(()));

        register_pet(&gateway, &signed_in(3), form()).await.unwrap();
    }

    #[tokio::test]
    async fn light_pet_is_rejected_locally() {
        let mut gateway = MockGateway::new();
        gateway.expect_register_pet().never();
        let form = PetForm {
            weight_kg: 0.05,
            ..form()
        };

        let err = register_pet(&gateway, &signed_in(3), form).await.unwrap_err();

        let ServiceError::Form(form_err) = err else {
            panic!("expected form error");
        };
        assert_eq!(form_err.field_errors().get("weight_kg"), Some("Peso mínimo 0.1 kg"));
    }

    #[tokio::test]
    async fn veterinarian_cannot_register_pets() {
        let mut gateway = MockGateway::new();
        gateway.expect_register_pet().never();

        let err = register_pet(&gateway, &signed_in(2), form()).await.unwrap_err();

        assert!(matches!(err, ServiceError::Forbidden));
    }

    #[tokio::test]
    async fn species_options_skip_inactive() {
        let mut gateway = MockGateway::new();
        gateway.expect_list_species().returning(|| {
            Ok(vec![
                species(1, SpeciesStatus::Active),
                species(2, SpeciesStatus::Inactive),
            ])
        });

        let options = species_options(&gateway, &signed_in(3)).await.unwrap();

        assert_eq!(options.len(), 1);
        assert_eq!(options[0].id.get(), 1);
    }
}
