//! Typed access to the clinic REST API.
//!
//! Each endpoint family is a trait so services and list controllers can be
//! exercised against fakes. [`HttpGateway`] implements all of them on top of
//! an [`ApiClient`].

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::appointment::{
    ActionReply, Appointment, NewAppointment, OwnAppointment, Reschedule,
};
use crate::domain::auth::{Credentials, LoginResponse, RegisteredUser, Registration};
use crate::domain::history::{HistoryEntry, HistoryOverview, NewHistoryEntry, RecordKind};
use crate::domain::pet::{NewPet, Pet};
use crate::domain::species::{Species, SpeciesPayload};
use crate::domain::statistics::Statistics;
use crate::domain::types::{AppointmentId, Note, PetId, SpeciesId, UserId};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::gateway::api::ApiClient;
use crate::gateway::errors::GatewayResult;
use crate::pagination::{ListPage, ListQuery};

pub mod api;
pub mod appointment;
pub mod auth;
pub mod errors;
pub mod history;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod pet;
pub mod species;
pub mod statistics;
pub mod user;

#[async_trait]
pub trait SpeciesGateway: Send + Sync {
    /// Server-paginated catalog, honouring the `search` filter.
    async fn list_species_page(&self, query: &ListQuery) -> GatewayResult<ListPage<Species>>;
    /// Unpaginated list used to fill selects.
    async fn list_species(&self) -> GatewayResult<Vec<Species>>;
    async fn get_species(&self, id: SpeciesId) -> GatewayResult<Species>;
    async fn create_species(&self, payload: &SpeciesPayload) -> GatewayResult<Species>;
    async fn update_species(&self, id: SpeciesId, payload: &SpeciesPayload)
    -> GatewayResult<Species>;
    async fn toggle_species_status(&self, id: SpeciesId) -> GatewayResult<Species>;
    async fn delete_species(&self, id: SpeciesId) -> GatewayResult<()>;
}

#[async_trait]
pub trait UserGateway: Send + Sync {
    async fn list_users(&self, query: &ListQuery) -> GatewayResult<ListPage<User>>;
    async fn create_user(&self, user: &NewUser) -> GatewayResult<User>;
    async fn update_user(&self, id: UserId, user: &UpdateUser) -> GatewayResult<User>;
}

#[async_trait]
pub trait AppointmentGateway: Send + Sync {
    async fn list_appointments(&self) -> GatewayResult<Vec<Appointment>>;
    async fn filter_appointments(
        &self,
        filters: &BTreeMap<String, String>,
    ) -> GatewayResult<Vec<Appointment>>;
    async fn appointments_for_pet(&self, pet: PetId) -> GatewayResult<Vec<Appointment>>;
    async fn appointment_details(&self, id: AppointmentId) -> GatewayResult<Appointment>;
    async fn reschedule_appointment(
        &self,
        id: AppointmentId,
        reschedule: &Reschedule,
    ) -> GatewayResult<ActionReply>;
    async fn cancel_appointment(&self, id: AppointmentId, note: &Note)
    -> GatewayResult<ActionReply>;
    async fn attend_appointment(&self, id: AppointmentId, note: &Note)
    -> GatewayResult<ActionReply>;
    async fn book_appointment(&self, appointment: &NewAppointment) -> GatewayResult<()>;
    async fn my_appointments(&self) -> GatewayResult<Vec<OwnAppointment>>;
    async fn cancel_own_appointment(&self, id: AppointmentId) -> GatewayResult<()>;
}

#[async_trait]
pub trait PetGateway: Send + Sync {
    async fn register_pet(&self, pet: &NewPet) -> GatewayResult<()>;
    async fn my_pets(&self) -> GatewayResult<Vec<Pet>>;
}

#[async_trait]
pub trait HistoryGateway: Send + Sync {
    async fn history_overview(&self) -> GatewayResult<Vec<HistoryOverview>>;
    async fn pet_history(&self, pet: PetId) -> GatewayResult<Vec<HistoryEntry>>;
    async fn pet_history_by_kind(
        &self,
        pet: PetId,
        kind: RecordKind,
    ) -> GatewayResult<Vec<HistoryEntry>>;
    async fn create_history_entry(&self, entry: &NewHistoryEntry) -> GatewayResult<()>;
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> GatewayResult<LoginResponse>;
    async fn register(&self, registration: &Registration) -> GatewayResult<RegisteredUser>;
}

#[async_trait]
pub trait StatisticsGateway: Send + Sync {
    async fn general_statistics(&self) -> GatewayResult<Statistics>;
}

/// Gateway backed by the HTTP API.
#[derive(Clone)]
pub struct HttpGateway {
    api: ApiClient,
}

impl HttpGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}
