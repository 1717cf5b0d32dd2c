use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::types::UserId;
use crate::domain::user::{FILTER_ROLE, FILTER_SEARCH, NewUser, UpdateUser, User};
use crate::gateway::errors::GatewayResult;
use crate::gateway::{HttpGateway, UserGateway};
use crate::pagination::{ListPage, ListQuery};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserPageBody {
    #[serde(default)]
    total_usuarios: usize,
    #[serde(default)]
    usuarios: Vec<User>,
}

#[async_trait]
impl UserGateway for HttpGateway {
    async fn list_users(&self, query: &ListQuery) -> GatewayResult<ListPage<User>> {
        let mut params = vec![
            ("pagina", query.page.to_string()),
            ("porPagina", query.page_size.to_string()),
        ];
        if let Some(role) = query.filter_value(FILTER_ROLE) {
            params.push(("rol", role.to_string()));
        }
        if let Some(search) = query.filter_value(FILTER_SEARCH) {
            params.push(("busqueda", search.to_string()));
        }

        let body: UserPageBody = self.api.get("/auth/admin/listar", &params).await?;
        Ok(ListPage::new(
            body.usuarios,
            body.total_usuarios,
            query.page,
            query.page_size,
        ))
    }

    async fn create_user(&self, user: &NewUser) -> GatewayResult<User> {
        self.api.post("/auth/admin/register", user).await
    }

    async fn update_user(&self, id: UserId, user: &UpdateUser) -> GatewayResult<User> {
        self.api
            .put(&format!("/auth/admin/actualizar/{id}"), user)
            .await
    }
}
