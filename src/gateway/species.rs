use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::species::{FILTER_SEARCH, Species, SpeciesPayload};
use crate::domain::types::SpeciesId;
use crate::gateway::errors::GatewayResult;
use crate::gateway::{HttpGateway, SpeciesGateway};
use crate::pagination::{ListPage, ListQuery};

#[derive(Deserialize)]
struct SpeciesPageBody {
    #[serde(default)]
    total: usize,
    #[serde(default)]
    especies: Vec<Species>,
}

#[async_trait]
impl SpeciesGateway for HttpGateway {
    async fn list_species_page(&self, query: &ListQuery) -> GatewayResult<ListPage<Species>> {
        let mut params = vec![
            ("page", query.page.to_string()),
            ("pageSize", query.page_size.to_string()),
        ];
        if let Some(search) = query.filter_value(FILTER_SEARCH) {
            params.push(("search", search.to_string()));
        }

        let body: SpeciesPageBody = self.api.get("/especie/getEspecie", &params).await?;
        Ok(ListPage::new(
            body.especies,
            body.total,
            query.page,
            query.page_size,
        ))
    }

    async fn list_species(&self) -> GatewayResult<Vec<Species>> {
        self.api.get("/especie/getEspecies", &[]).await
    }

    async fn get_species(&self, id: SpeciesId) -> GatewayResult<Species> {
        self.api.get(&format!("/especie/getEspecie/{id}"), &[]).await
    }

    async fn create_species(&self, payload: &SpeciesPayload) -> GatewayResult<Species> {
        self.api.post("/especie/crearEspecie", payload).await
    }

    async fn update_species(
        &self,
        id: SpeciesId,
        payload: &SpeciesPayload,
    ) -> GatewayResult<Species> {
        self.api
            .put(&format!("/especie/actualizar/{id}"), payload)
            .await
    }

    async fn toggle_species_status(&self, id: SpeciesId) -> GatewayResult<Species> {
        self.api.patch(&format!("/especie/toggle/{id}/status")).await
    }

    async fn delete_species(&self, id: SpeciesId) -> GatewayResult<()> {
        self.api.delete(&format!("/especie/eliminar/{id}")).await
    }
}
