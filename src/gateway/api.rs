use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::gateway::errors::{GatewayError, GatewayResult};
use crate::gateway::http::{HttpClient, HttpRequest, Method, ReqwestHttpClient};
use crate::session::Session;

/// JSON client for the clinic API.
///
/// Every request carries the session's bearer token when there is one. A 401
/// answer from any endpoint clears the session before the error is returned.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, http: Arc<dyn HttpClient>, session: Session) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http,
            session,
        }
    }

    pub fn with_reqwest(
        base_url: impl Into<String>,
        timeout: Duration,
        session: Session,
    ) -> GatewayResult<Self> {
        let http = ReqwestHttpClient::new(timeout)?;
        Ok(Self::new(base_url, Arc::new(http), session))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> GatewayResult<String> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url = reqwest::Url::parse(&raw)
            .map_err(|e| GatewayError::Transport(format!("Invalid url {raw}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url.into())
    }

    /// Sends a request and returns the raw body of a successful response.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> GatewayResult<String> {
        let request = HttpRequest {
            method,
            url: self.url(path, query)?,
            bearer: self.session.token(),
            body,
        };

        let response = self.http.send(request).await?;
        if response.is_success() {
            return Ok(response.body);
        }

        let err = GatewayError::from_response(response.status, &response.body);
        if let GatewayError::Unauthorized(_) = err {
            log::warn!("{method} {path} answered 401, clearing session");
            self.session.on_unauthorized();
        }
        Err(err)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> GatewayResult<T> {
        let raw = self.execute(method, path, query, body).await?;
        serde_json::from_str(&raw).map_err(|e| {
            log::debug!("Undecodable body from {method} {path}: {raw}");
            GatewayError::Decode(format!("{method} {path}: {e}"))
        })
    }

    fn encode<B: Serialize + ?Sized>(body: &B) -> GatewayResult<serde_json::Value> {
        serde_json::to_value(body)
            .map_err(|e| GatewayError::Decode(format!("Encoding request body: {e}")))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> GatewayResult<T> {
        self.request(Method::Get, path, query, None).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = Self::encode(body)?;
        self.request(Method::Post, path, &[], Some(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = Self::encode(body)?;
        self.request(Method::Put, path, &[], Some(body)).await
    }

    /// PATCH without a body.
    pub async fn patch<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        self.request(Method::Patch, path, &[], None).await
    }

    /// POST whose response body is not needed.
    pub async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> GatewayResult<()> {
        let body = Self::encode(body)?;
        self.execute(Method::Post, path, &[], Some(body)).await.map(|_| ())
    }

    /// PATCH without a body whose response body is not needed.
    pub async fn patch_unit(&self, path: &str) -> GatewayResult<()> {
        self.execute(Method::Patch, path, &[], None).await.map(|_| ())
    }

    /// DELETE; any body of the response is ignored.
    pub async fn delete(&self, path: &str) -> GatewayResult<()> {
        self.execute(Method::Delete, path, &[], None).await.map(|_| ())
    }
}
