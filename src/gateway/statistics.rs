use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::statistics::Statistics;
use crate::gateway::errors::GatewayResult;
use crate::gateway::{HttpGateway, StatisticsGateway};

#[derive(Deserialize)]
struct StatisticsBody {
    data: Statistics,
}

#[async_trait]
impl StatisticsGateway for HttpGateway {
    async fn general_statistics(&self) -> GatewayResult<Statistics> {
        let body: StatisticsBody = self.api.get("/estadisticas/general", &[]).await?;
        Ok(body.data)
    }
}
