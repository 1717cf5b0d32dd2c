use async_trait::async_trait;

use crate::domain::pet::{NewPet, Pet};
use crate::gateway::errors::GatewayResult;
use crate::gateway::{HttpGateway, PetGateway};

#[async_trait]
impl PetGateway for HttpGateway {
    async fn register_pet(&self, pet: &NewPet) -> GatewayResult<()> {
        self.api.post_unit("/mascotas/registrar", pet).await
    }

    async fn my_pets(&self) -> GatewayResult<Vec<Pet>> {
        self.api.get("/mascotas/mis-mascotas", &[]).await
    }
}
