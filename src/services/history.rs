//! Medical history browsing and record creation for clinic staff.

use crate::domain::access::Capability;
use crate::domain::history::{HistoryEntry, HistoryOverview, NewHistoryEntry, RecordKind};
use crate::domain::types::PetId;
use crate::forms::history::HistoryEntryForm;
use crate::gateway::HistoryGateway;
use crate::services::{ServiceError, ServiceResult, ensure_capability};
use crate::session::Session;

const LOAD_ERROR: &str = "No se pudo cargar el historial médico";

/// Loads the clinic-wide history table.
pub async fn history_overview<G>(
    gateway: &G,
    session: &Session,
) -> ServiceResult<Vec<HistoryOverview>>
where
    G: HistoryGateway + ?Sized,
{
    ensure_capability(session, Capability::MedicalHistory)?;
    load_overview(gateway).await
}

/// Loads the records of one pet, optionally restricted to one kind.
pub async fn pet_history<G>(
    gateway: &G,
    session: &Session,
    pet: PetId,
    kind: Option<RecordKind>,
) -> ServiceResult<Vec<HistoryEntry>>
where
    G: HistoryGateway + ?Sized,
{
    ensure_capability(session, Capability::MedicalHistory)?;

    let result = match kind {
        Some(kind) => gateway.pet_history_by_kind(pet, kind).await,
        None => gateway.pet_history(pet).await,
    };

    result.map_err(|err| {
        log::error!("Failed to load history of pet {pet}: {err}");
        ServiceError::gateway(err, LOAD_ERROR)
    })
}

/// Validates and stores a record, then returns the refreshed overview.
pub async fn add_history_entry<G>(
    gateway: &G,
    session: &Session,
    form: HistoryEntryForm,
) -> ServiceResult<Vec<HistoryOverview>>
where
    G: HistoryGateway + ?Sized,
{
    ensure_capability(session, Capability::MedicalHistory)?;

    let entry = NewHistoryEntry::try_from(form)?;

    gateway.create_history_entry(&entry).await.map_err(|err| {
        log::error!("Failed to create history entry for pet {}: {err}", entry.pet_id);
        ServiceError::gateway(err, "Error al crear el registro")
    })?;

    load_overview(gateway).await
}

async fn load_overview<G>(gateway: &G) -> ServiceResult<Vec<HistoryOverview>>
where
    G: HistoryGateway + ?Sized,
{
    gateway.history_overview().await.map_err(|err| {
        log::error!("Failed to load history overview: {err}");
        ServiceError::gateway(err, LOAD_ERROR)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::errors::GatewayError;
    use crate::gateway::mock::MockGateway;
    use crate::services::test_support::signed_in;

    #[tokio::test]
    async fn kind_filter_uses_kind_endpoint() {
        let mut gateway = MockGateway::new();
        gateway.expect_pet_history().never();
        gateway
            .expect_pet_history_by_kind()
            .withf(|pet, kind| pet.get() == 5 && *kind == RecordKind::Vaccination)
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let entries = pet_history(
            &gateway,
            &signed_in(2),
            PetId::new(5).unwrap(),
            Some(RecordKind::Vaccination),
        )
        .await
        .unwrap();

        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn new_entry_refetches_overview() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_create_history_entry()
            .withf(|entry| entry.description.as_str() == "Desparasitación")
            .times(1)
            .returning(|_| Ok(()));
        gateway
            .expect_history_overview()
            .times(1)
            .returning(|| Ok(Vec::new()));
        let form = HistoryEntryForm {
            pet_id: 5,
            kind: "consulta".into(),
            description: "Desparasitación".into(),
            ..HistoryEntryForm::default()
        };

        add_history_entry(&gateway, &signed_in(2), form).await.unwrap();
    }

    #[tokio::test]
    async fn overview_failure_uses_fallback() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_history_overview()
            .returning(|| Err(GatewayError::Decode("expected data".into())));

        let err = history_overview(&gateway, &signed_in(1)).await.unwrap_err();

        assert_eq!(err.user_message(), Some(LOAD_ERROR));
    }

    #[tokio::test]
    async fn clients_cannot_read_history() {
        let mut gateway = MockGateway::new();
        gateway.expect_history_overview().never();

        let err = history_overview(&gateway, &signed_in(3)).await.unwrap_err();

        assert!(matches!(err, ServiceError::Forbidden));
    }
}
