//! The three resources the clinic manages through list screens.

use std::convert::Infallible;

use async_trait::async_trait;

use crate::controller::{Operation, ResourceGateway};
use crate::domain::appointment::{Appointment, AppointmentAction, NewAppointment, Reschedule};
use crate::domain::species::{Species, SpeciesPayload};
use crate::domain::types::{AppointmentId, SpeciesId, UserId};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::gateway::errors::GatewayResult;
use crate::gateway::{AppointmentGateway, HttpGateway, SpeciesGateway, UserGateway};
use crate::pagination::{ListPage, ListQuery};

/// Species catalog: server-side pagination with a `search` filter.
pub struct SpeciesResource<G = HttpGateway> {
    gateway: G,
}

impl<G> SpeciesResource<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn inner(&self) -> &G {
        &self.gateway
    }
}

#[async_trait]
impl<G: SpeciesGateway> ResourceGateway for SpeciesResource<G> {
    type Item = Species;
    type Id = SpeciesId;
    type Create = SpeciesPayload;
    type Update = SpeciesPayload;
    type Action = Infallible;

    const NAME: &'static str = "species";

    async fn list(&self, query: &ListQuery) -> GatewayResult<ListPage<Species>> {
        self.gateway.list_species_page(query).await
    }

    async fn create(&self, payload: &SpeciesPayload) -> GatewayResult<()> {
        self.gateway.create_species(payload).await.map(|_| ())
    }

    async fn update(&self, id: SpeciesId, payload: &SpeciesPayload) -> GatewayResult<()> {
        self.gateway.update_species(id, payload).await.map(|_| ())
    }

    async fn toggle_status(&self, id: SpeciesId) -> GatewayResult<()> {
        self.gateway.toggle_species_status(id).await.map(|_| ())
    }

    async fn delete(&self, id: SpeciesId) -> GatewayResult<()> {
        self.gateway.delete_species(id).await
    }

    fn fallback_message(&self, operation: Operation) -> &'static str {
        match operation {
            Operation::Load => "Error al obtener especies paginadas",
            Operation::Create => "Error al crear especie",
            Operation::Update => "Error al actualizar especie",
            Operation::ToggleStatus => "Error al cambiar estado de especie",
            Operation::Delete => "Error al eliminar especie",
            Operation::Action => "Operación no disponible",
        }
    }
}

/// Clinic users administered by an administrator. Accounts are never
/// toggled or deleted from the list; deactivation goes through update.
pub struct UserResource<G = HttpGateway> {
    gateway: G,
}

impl<G> UserResource<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl<G: UserGateway> ResourceGateway for UserResource<G> {
    type Item = User;
    type Id = UserId;
    type Create = NewUser;
    type Update = UpdateUser;
    type Action = Infallible;

    const NAME: &'static str = "users";

    async fn list(&self, query: &ListQuery) -> GatewayResult<ListPage<User>> {
        self.gateway.list_users(query).await
    }

    async fn create(&self, user: &NewUser) -> GatewayResult<()> {
        self.gateway.create_user(user).await.map(|_| ())
    }

    async fn update(&self, id: UserId, user: &UpdateUser) -> GatewayResult<()> {
        self.gateway.update_user(id, user).await.map(|_| ())
    }

    fn fallback_message(&self, operation: Operation) -> &'static str {
        match operation {
            Operation::Load => "Error al listar usuarios",
            Operation::Create => "Error al registrar usuario",
            Operation::Update => "Error al actualizar usuario",
            Operation::ToggleStatus | Operation::Delete | Operation::Action => {
                "Operación no disponible"
            }
        }
    }
}

/// Appointment management. The API returns whole lists, so pages are cut
/// on the client; with no filter set the complete list is requested.
pub struct AppointmentResource<G = HttpGateway> {
    gateway: G,
}

impl<G> AppointmentResource<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl<G: AppointmentGateway> ResourceGateway for AppointmentResource<G> {
    type Item = Appointment;
    type Id = AppointmentId;
    type Create = NewAppointment;
    type Update = Reschedule;
    type Action = AppointmentAction;

    const NAME: &'static str = "appointments";

    async fn list(&self, query: &ListQuery) -> GatewayResult<ListPage<Appointment>> {
        let all = if query.has_filters() {
            self.gateway.filter_appointments(query.filters()).await?
        } else {
            self.gateway.list_appointments().await?
        };
        Ok(ListPage::slice(all, query))
    }

    async fn update(&self, id: AppointmentId, reschedule: &Reschedule) -> GatewayResult<()> {
        let reply = self.gateway.reschedule_appointment(id, reschedule).await?;
        log::info!("Appointment {id} rescheduled: {}", reply.message);
        Ok(())
    }

    async fn act(&self, id: AppointmentId, action: &AppointmentAction) -> GatewayResult<()> {
        let reply = match action {
            AppointmentAction::Cancel(note) => self.gateway.cancel_appointment(id, note).await?,
            AppointmentAction::Attend(note) => self.gateway.attend_appointment(id, note).await?,
        };
        log::info!("Appointment {id} updated: {}", reply.message);
        Ok(())
    }

    fn fallback_message(&self, operation: Operation) -> &'static str {
        match operation {
            Operation::Load => "Error al cargar citas",
            Operation::Update => "Error al reprogramar la cita",
            Operation::Action => "Error al realizar la acción",
            Operation::Create | Operation::ToggleStatus | Operation::Delete => {
                "Operación no disponible"
            }
        }
    }
}
