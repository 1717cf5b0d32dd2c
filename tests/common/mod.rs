//! In-memory stand-ins for the clinic API shared by the integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use vet_clinic::domain::access::Route;
use vet_clinic::domain::species::{FILTER_SEARCH, Species, SpeciesPayload, SpeciesStatus};
use vet_clinic::domain::types::SpeciesId;
use vet_clinic::gateway::SpeciesGateway;
use vet_clinic::gateway::errors::{GatewayError, GatewayResult};
use vet_clinic::gateway::http::{HttpClient, HttpRequest, HttpResponse};
use vet_clinic::pagination::{ListPage, ListQuery};
use vet_clinic::session::Navigator;

/// Species catalog that paginates and filters like the real endpoint.
#[derive(Default)]
pub struct FakeSpeciesApi {
    species: Mutex<Vec<Species>>,
    list_calls: AtomicUsize,
    mutation_calls: AtomicUsize,
    fail_lists: AtomicBool,
    ignore_page_size: AtomicBool,
    held: Mutex<Option<(Option<String>, oneshot::Receiver<()>)>>,
}

pub fn species(id: i32, name: &str) -> Species {
    Species {
        id: SpeciesId::new(id).unwrap(),
        name: name.to_string(),
        description: None,
        status: SpeciesStatus::Active,
        changed_at: None,
    }
}

impl FakeSpeciesApi {
    /// Catalog with `count` active species named `Especie 1..=count`.
    pub fn seeded(count: i32) -> Self {
        let api = Self::default();
        *api.species.lock().unwrap() = (1..=count)
            .map(|id| species(id, &format!("Especie {id}")))
            .collect();
        api
    }

    pub fn with_species(list: Vec<Species>) -> Self {
        let api = Self::default();
        *api.species.lock().unwrap() = list;
        api
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn mutation_calls(&self) -> usize {
        self.mutation_calls.load(Ordering::SeqCst)
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    /// Answer with every match instead of one page.
    pub fn ignore_page_size(&self) {
        self.ignore_page_size.store(true, Ordering::SeqCst);
    }

    /// The next list searching for `term` answers only once `release` fires.
    pub fn hold_search(&self, term: &str, release: oneshot::Receiver<()>) {
        *self.held.lock().unwrap() = Some((Some(term.to_string()), release));
    }

    /// The next list of any query answers only once `release` fires.
    pub fn hold_next_list(&self, release: oneshot::Receiver<()>) {
        *self.held.lock().unwrap() = Some((None, release));
    }

    pub fn status_of(&self, id: i32) -> Option<SpeciesStatus> {
        self.species
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id.get() == id)
            .map(|s| s.status)
    }

    fn find(&self, id: SpeciesId) -> GatewayResult<usize> {
        self.species
            .lock()
            .unwrap()
            .iter()
            .position(|s| s.id == id)
            .ok_or(GatewayError::Server {
                status: 404,
                message: Some("Especie no encontrada".into()),
            })
    }

    fn gate_for(&self, query: &ListQuery) -> Option<oneshot::Receiver<()>> {
        let mut held = self.held.lock().unwrap();
        let matches = held.as_ref().is_some_and(|(term, _)| {
            term.as_deref()
                .is_none_or(|term| query.filter_value(FILTER_SEARCH) == Some(term))
        });
        if matches { held.take().map(|(_, rx)| rx) } else { None }
    }

    /// The page the catalog holds for `query` right now.
    fn current_page(&self, query: &ListQuery) -> GatewayResult<ListPage<Species>> {
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(GatewayError::Transport("connection reset".into()));
        }

        let search = query.filter_value(FILTER_SEARCH).map(str::to_lowercase);
        let matching: Vec<Species> = self
            .species
            .lock()
            .unwrap()
            .iter()
            .filter(|s| {
                search
                    .as_deref()
                    .is_none_or(|term| s.name.to_lowercase().contains(term))
            })
            .cloned()
            .collect();
        let total = matching.len();

        let items = if self.ignore_page_size.load(Ordering::SeqCst) {
            matching
        } else {
            matching
                .into_iter()
                .skip(query.offset())
                .take(query.page_size)
                .collect()
        };
        Ok(ListPage::new(items, total, query.page, query.page_size))
    }
}

#[async_trait]
impl SpeciesGateway for FakeSpeciesApi {
    async fn list_species_page(&self, query: &ListQuery) -> GatewayResult<ListPage<Species>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate_for(query);
        let page = self.current_page(query);

        if let Some(release) = gate {
            let _ = release.await;
        }
        page
    }

    async fn list_species(&self) -> GatewayResult<Vec<Species>> {
        Ok(self.species.lock().unwrap().clone())
    }

    async fn get_species(&self, id: SpeciesId) -> GatewayResult<Species> {
        let index = self.find(id)?;
        Ok(self.species.lock().unwrap()[index].clone())
    }

    async fn create_species(&self, payload: &SpeciesPayload) -> GatewayResult<Species> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        let mut list = self.species.lock().unwrap();
        let next = list.iter().map(|s| s.id.get()).max().unwrap_or(0) + 1;
        let mut created = species(next, payload.name.as_str());
        created.description = payload.description.clone();
        list.push(created.clone());
        Ok(created)
    }

    async fn update_species(
        &self,
        id: SpeciesId,
        payload: &SpeciesPayload,
    ) -> GatewayResult<Species> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        let index = self.find(id)?;
        let mut list = self.species.lock().unwrap();
        list[index].name = payload.name.as_str().to_string();
        list[index].description = payload.description.clone();
        Ok(list[index].clone())
    }

    async fn toggle_species_status(&self, id: SpeciesId) -> GatewayResult<Species> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        let index = self.find(id)?;
        let mut list = self.species.lock().unwrap();
        list[index].status = list[index].status.toggled();
        Ok(list[index].clone())
    }

    async fn delete_species(&self, id: SpeciesId) -> GatewayResult<()> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        let index = self.find(id)?;
        self.species.lock().unwrap().remove(index);
        Ok(())
    }
}

/// Navigator remembering every redirect.
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    redirects: Arc<Mutex<Vec<Route>>>,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> Vec<Route> {
        self.redirects.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, route: Route) {
        self.redirects.lock().unwrap().push(route);
    }
}

/// HTTP client answering every request with one canned response.
pub struct CannedHttp {
    pub status: u16,
    pub body: String,
    pub requests: Mutex<Vec<HttpRequest>>,
}

impl CannedHttp {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl HttpClient for CannedHttp {
    async fn send(&self, request: HttpRequest) -> GatewayResult<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(HttpResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}
