//! Paginated, filtered lists kept in sync with the API by refetching after
//! every mutation.
//!
//! A [`ListController`] owns the single held page of one resource. Every load
//! is numbered and a response is only applied while its number is still the
//! latest issued, so a slow answer never replaces the page of a newer load.

use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::forms::{FieldErrors, FormError};
use crate::gateway::errors::{GatewayError, GatewayResult};
use crate::pagination::{ListPage, ListQuery};

pub mod resources;

pub use resources::{AppointmentResource, SpeciesResource, UserResource};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Load,
    Create,
    Update,
    ToggleStatus,
    Delete,
    Action,
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Load => "load",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::ToggleStatus => "toggle",
            Operation::Delete => "delete",
            Operation::Action => "run action on",
        };
        f.write_str(name)
    }
}

/// List and mutation endpoints of one resource, as the controller sees them.
///
/// Mutations a resource does not offer keep the default implementation and
/// fail with [`GatewayError::Unsupported`] without contacting the server.
#[async_trait]
pub trait ResourceGateway: Send + Sync {
    type Item: Clone + Send + Sync;
    type Id: Copy + Display + Send + Sync;
    type Create: Send + Sync;
    type Update: Send + Sync;
    type Action: Send + Sync;

    /// Resource name used in log lines.
    const NAME: &'static str;

    async fn list(&self, query: &ListQuery) -> GatewayResult<ListPage<Self::Item>>;

    async fn create(&self, _payload: &Self::Create) -> GatewayResult<()> {
        Err(GatewayError::Unsupported("create"))
    }

    async fn update(&self, _id: Self::Id, _payload: &Self::Update) -> GatewayResult<()> {
        Err(GatewayError::Unsupported("update"))
    }

    async fn toggle_status(&self, _id: Self::Id) -> GatewayResult<()> {
        Err(GatewayError::Unsupported("toggle status"))
    }

    async fn delete(&self, _id: Self::Id) -> GatewayResult<()> {
        Err(GatewayError::Unsupported("delete"))
    }

    async fn act(&self, _id: Self::Id, _action: &Self::Action) -> GatewayResult<()> {
        Err(GatewayError::Unsupported("action"))
    }

    /// Message shown when a failure carries no server message.
    fn fallback_message(&self, operation: Operation) -> &'static str;
}

pub enum Mutation<R: ResourceGateway + ?Sized> {
    Create(R::Create),
    Update(R::Id, R::Update),
    ToggleStatus(R::Id),
    Delete(R::Id),
    Action(R::Id, R::Action),
}

impl<R: ResourceGateway + ?Sized> Mutation<R> {
    pub fn operation(&self) -> Operation {
        match self {
            Mutation::Create(_) => Operation::Create,
            Mutation::Update(..) => Operation::Update,
            Mutation::ToggleStatus(_) => Operation::ToggleStatus,
            Mutation::Delete(_) => Operation::Delete,
            Mutation::Action(..) => Operation::Action,
        }
    }
}

/// Progress of the last list load or mutation.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UiStatus {
    pub loading: bool,
    pub error: Option<String>,
    pub field_errors: FieldErrors,
}

impl UiStatus {
    fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    fn invalid(field_errors: FieldErrors) -> Self {
        Self {
            field_errors,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListState<T> {
    /// Query of the most recently requested load.
    pub query: ListQuery,
    /// Number of the most recently issued load.
    pub generation: u64,
    /// Last page applied. Failed loads leave it in place.
    pub page: Option<ListPage<T>>,
    pub list_status: UiStatus,
    pub mutation_status: UiStatus,
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Page and page size must be greater than zero")]
    InvalidQuery,

    /// A newer load was issued while this one was in flight.
    #[error("Response superseded by a newer load")]
    Superseded,

    #[error("{message}")]
    Gateway {
        message: String,
        #[source]
        source: GatewayError,
    },

    #[error(transparent)]
    Form(#[from] FormError),
}

pub type ControllerResult<T> = Result<T, ControllerError>;

impl ControllerError {
    /// Message to show to the user, if this error has one.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ControllerError::Gateway { message, .. } => Some(message),
            _ => None,
        }
    }
}

const INVALID_QUERY_MESSAGE: &str = "Página no válida";

pub struct ListController<R: ResourceGateway> {
    gateway: R,
    state: Mutex<ListState<R::Item>>,
}

impl<R: ResourceGateway> ListController<R> {
    pub fn new(gateway: R, page_size: usize) -> Self {
        Self {
            gateway,
            state: Mutex::new(ListState {
                query: ListQuery::new(page_size),
                generation: 0,
                page: None,
                list_status: UiStatus::default(),
                mutation_status: UiStatus::default(),
            }),
        }
    }

    pub fn gateway(&self) -> &R {
        &self.gateway
    }

    fn lock(&self) -> MutexGuard<'_, ListState<R::Item>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn page(&self) -> Option<ListPage<R::Item>> {
        self.lock().page.clone()
    }

    pub fn query(&self) -> ListQuery {
        self.lock().query.clone()
    }

    pub fn list_status(&self) -> UiStatus {
        self.lock().list_status.clone()
    }

    pub fn mutation_status(&self) -> UiStatus {
        self.lock().mutation_status.clone()
    }

    /// Fetches `query` and, if no other load was issued while it was in
    /// flight, replaces the held page with the answer.
    pub async fn load(&self, query: ListQuery) -> ControllerResult<ListPage<R::Item>> {
        if !query.is_valid() {
            self.lock().list_status = UiStatus::failed(INVALID_QUERY_MESSAGE);
            return Err(ControllerError::InvalidQuery);
        }

        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.query = query.clone();
            state.list_status = UiStatus::loading();
            state.generation
        };

        let result = self.gateway.list(&query).await;

        let mut state = self.lock();
        if state.generation != generation {
            log::warn!(
                "Discarding stale {} page {} (filters {:?})",
                R::NAME,
                query.page,
                query.filters()
            );
            return Err(ControllerError::Superseded);
        }

        match result {
            Ok(mut page) => {
                if page.items.len() > query.page_size {
                    log::warn!(
                        "Server returned {} {} for a page of {}, truncating",
                        page.items.len(),
                        R::NAME,
                        query.page_size
                    );
                    page.items.truncate(query.page_size);
                }
                state.page = Some(page.clone());
                state.list_status = UiStatus::default();
                Ok(page)
            }
            Err(err) => {
                log::error!("Failed to load {}: {err}", R::NAME);
                let message = err.user_message(self.gateway.fallback_message(Operation::Load));
                state.list_status = UiStatus::failed(message.clone());
                Err(ControllerError::Gateway {
                    message,
                    source: err,
                })
            }
        }
    }

    /// Reloads the current query.
    pub async fn refresh(&self) -> ControllerResult<ListPage<R::Item>> {
        let query = self.query();
        self.load(query).await
    }

    /// Sets a filter (a blank value clears it) and reloads from page 1.
    pub async fn set_filter(
        &self,
        key: &str,
        value: &str,
    ) -> ControllerResult<ListPage<R::Item>> {
        let query = self.query().filter(key, value).page(1);
        self.load(query).await
    }

    pub async fn clear_filter(&self, key: &str) -> ControllerResult<ListPage<R::Item>> {
        let query = self.query().without_filter(key).page(1);
        self.load(query).await
    }

    pub async fn set_page(&self, page: usize) -> ControllerResult<ListPage<R::Item>> {
        let query = self.query().page(page);
        self.load(query).await
    }

    /// Changes the page size and goes back to page 1.
    pub async fn set_page_size(&self, page_size: usize) -> ControllerResult<ListPage<R::Item>> {
        let query = self.query().page_size(page_size).page(1);
        self.load(query).await
    }

    /// Sends one mutation and, on success, refetches the current query.
    ///
    /// A failed refetch is reported on the list status; the mutation itself
    /// still counts as successful.
    pub async fn mutate(&self, mutation: Mutation<R>) -> ControllerResult<()> {
        let operation = mutation.operation();
        self.lock().mutation_status = UiStatus::loading();

        let result = match &mutation {
            Mutation::Create(payload) => self.gateway.create(payload).await,
            Mutation::Update(id, payload) => self.gateway.update(*id, payload).await,
            Mutation::ToggleStatus(id) => self.gateway.toggle_status(*id).await,
            Mutation::Delete(id) => self.gateway.delete(*id).await,
            Mutation::Action(id, action) => self.gateway.act(*id, action).await,
        };

        if let Err(err) = result {
            log::error!("Failed to {operation} {}: {err}", R::NAME);
            let message = err.user_message(self.gateway.fallback_message(operation));
            self.lock().mutation_status = UiStatus::failed(message.clone());
            return Err(ControllerError::Gateway {
                message,
                source: err,
            });
        }
        self.lock().mutation_status = UiStatus::default();

        match self.refresh().await {
            Ok(_) | Err(ControllerError::Superseded) => {}
            Err(err) => log::warn!("Refresh of {} after {operation} failed: {err}", R::NAME),
        }
        Ok(())
    }

    fn reject_form(&self, err: FormError) -> ControllerError {
        self.lock().mutation_status = UiStatus::invalid(err.field_errors());
        ControllerError::Form(err)
    }

    /// Validates a form into a create payload and submits it. Invalid forms
    /// never reach the gateway.
    pub async fn create_from<F>(&self, form: F) -> ControllerResult<()>
    where
        F: Send,
        R::Create: TryFrom<F, Error = FormError>,
    {
        let payload = match R::Create::try_from(form) {
            Ok(payload) => payload,
            Err(err) => return Err(self.reject_form(err)),
        };
        self.mutate(Mutation::Create(payload)).await
    }

    pub async fn update_from<F>(&self, id: R::Id, form: F) -> ControllerResult<()>
    where
        F: Send,
        R::Update: TryFrom<F, Error = FormError>,
    {
        let payload = match R::Update::try_from(form) {
            Ok(payload) => payload,
            Err(err) => return Err(self.reject_form(err)),
        };
        self.mutate(Mutation::Update(id, payload)).await
    }
}
