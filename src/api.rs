use log::{debug, error, warn};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{ApiErrorBody, InventoryRecord, RecordPayload, SearchCriteria, Statistics};

/// REST resource consumed by the controller. One attempt per call, no retries.
#[allow(async_fn_in_trait)]
pub trait InventoryApi {
    async fn list(&self) -> Result<Vec<InventoryRecord>, ApiError>;
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<InventoryRecord>, ApiError>;
    async fn get(&self, id: i64) -> Result<InventoryRecord, ApiError>;
    /// Any 2xx is a success; the echoed record is only returned when the
    /// body decodes.
    async fn create(&self, payload: &RecordPayload) -> Result<Option<InventoryRecord>, ApiError>;
    async fn update(
        &self,
        id: i64,
        payload: &RecordPayload,
    ) -> Result<Option<InventoryRecord>, ApiError>;
    async fn delete(&self, id: i64) -> Result<(), ApiError>;
    async fn statistics(&self) -> Result<Statistics, ApiError>;
    async fn low_stock(&self) -> Result<Vec<InventoryRecord>, ApiError>;
}

pub struct HttpInventoryApi {
    client: Client,
    collection_url: String,
}

impl HttpInventoryApi {
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &ApiConfig) -> Self {
        Self {
            client,
            collection_url: config.collection_url(),
        }
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn member_url(&self, segment: impl std::fmt::Display) -> String {
        format!("{}/{}", self.collection_url, segment)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        read_json(response).await
    }
}

/// Turns non-2xx into `ApiError::Status`, keeping the body's message if any.
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    let message = ApiErrorBody::parse(&body);
    error!("Respuesta {} de {}: {:?}", status, url, message);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Status decides success; an empty or unexpected body on a 2xx yields `None`.
async fn read_written(response: Response) -> Result<Option<InventoryRecord>, ApiError> {
    let response = check(response).await?;
    let url = response.url().clone();
    let record = match response.bytes().await {
        Ok(body) => serde_json::from_slice(&body).ok(),
        Err(e) => {
            warn!("Cuerpo ilegible en {}: {}", url, e);
            None
        }
    };
    if record.is_none() {
        debug!("Escritura aceptada por {} sin registro en la respuesta", url);
    }
    Ok(record)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = check(response).await?;
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

impl InventoryApi for HttpInventoryApi {
    async fn list(&self) -> Result<Vec<InventoryRecord>, ApiError> {
        self.fetch(self.collection_url.clone()).await
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<InventoryRecord>, ApiError> {
        let url = self.member_url("buscar");
        debug!("GET {} {:?}", url, criteria);
        let response = self
            .client
            .get(&url)
            .query(&criteria.query_pairs())
            .send()
            .await?;
        read_json(response).await
    }

    async fn get(&self, id: i64) -> Result<InventoryRecord, ApiError> {
        self.fetch(self.member_url(id)).await
    }

    async fn create(&self, payload: &RecordPayload) -> Result<Option<InventoryRecord>, ApiError> {
        debug!("POST {}: {:?}", self.collection_url, payload);
        let response = self
            .client
            .post(&self.collection_url)
            .json(payload)
            .send()
            .await?;
        read_written(response).await
    }

    async fn update(
        &self,
        id: i64,
        payload: &RecordPayload,
    ) -> Result<Option<InventoryRecord>, ApiError> {
        let url = self.member_url(id);
        debug!("PUT {}: {:?}", url, payload);
        let response = self.client.put(&url).json(payload).send().await?;
        read_written(response).await
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let url = self.member_url(id);
        debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        check(response).await.map(|_| ())
    }

    async fn statistics(&self) -> Result<Statistics, ApiError> {
        self.fetch(self.member_url("estadisticas")).await
    }

    async fn low_stock(&self) -> Result<Vec<InventoryRecord>, ApiError> {
        self.fetch(self.member_url("stock-bajo")).await
    }
}
