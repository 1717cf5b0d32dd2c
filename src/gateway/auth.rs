use async_trait::async_trait;

use crate::domain::auth::{Credentials, LoginResponse, RegisteredUser, Registration};
use crate::gateway::errors::GatewayResult;
use crate::gateway::{AuthGateway, HttpGateway};

#[async_trait]
impl AuthGateway for HttpGateway {
    async fn login(&self, credentials: &Credentials) -> GatewayResult<LoginResponse> {
        self.api.post("/auth/login", credentials).await
    }

    async fn register(&self, registration: &Registration) -> GatewayResult<RegisteredUser> {
        self.api.post("/auth/register", registration).await
    }
}
