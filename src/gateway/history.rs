use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::history::{HistoryEntry, HistoryOverview, NewHistoryEntry, RecordKind};
use crate::domain::types::PetId;
use crate::gateway::errors::GatewayResult;
use crate::gateway::{HistoryGateway, HttpGateway};

/// `/cita/historial` wraps its rows in `{ data: [...] }`.
#[derive(Deserialize)]
struct Wrapped<T> {
    data: T,
}

#[async_trait]
impl HistoryGateway for HttpGateway {
    async fn history_overview(&self) -> GatewayResult<Vec<HistoryOverview>> {
        let body: Wrapped<Vec<HistoryOverview>> = self.api.get("/cita/historial", &[]).await?;
        Ok(body.data)
    }

    async fn pet_history(&self, pet: PetId) -> GatewayResult<Vec<HistoryEntry>> {
        self.api.get(&format!("/cita/historial/{pet}"), &[]).await
    }

    async fn pet_history_by_kind(
        &self,
        pet: PetId,
        kind: RecordKind,
    ) -> GatewayResult<Vec<HistoryEntry>> {
        self.api
            .get(&format!("/cita/historial/{pet}/tipo/{}", kind.code()), &[])
            .await
    }

    async fn create_history_entry(&self, entry: &NewHistoryEntry) -> GatewayResult<()> {
        self.api.post_unit("/cita/historial/crear", entry).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::gateway::api::ApiClient;
    use crate::gateway::http::{HttpResponse, MockHttpClient};
    use crate::session::Session;

    #[tokio::test]
    async fn overview_unwraps_data_envelope() {
        let mut http = MockHttpClient::new();
        http.expect_send()
            .withf(|req| req.url == "http://api.test/cita/historial")
            .returning(|_| {
                Box::pin(async {
                    Ok(HttpResponse {
                        status: 200,
                        body: r#"{"data":[{"id":1,"fecha":"2026-02-01","tipo":"consulta",
                            "descripcion":"Control","mascota":{"id":3,"nombre":"Toby"}}]}"#
                            .to_string(),
                    })
                })
            });

        let gateway = HttpGateway::new(ApiClient::new(
            "http://api.test",
            Arc::new(http),
            Session::in_memory(),
        ));
        let rows = gateway.history_overview().await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].pet.name, "Toby");
    }
}
