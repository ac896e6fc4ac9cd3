use crate::config::Config;
use crate::domain::models::availability::AvailabilityMap;
use crate::domain::ports::{AvailabilityApi, AvailabilityView};
use crate::error::AppError;
use crate::infra::http::client::ApiClient;
use crate::infra::http::dtos::responses::{ApiEnvelope, ProviderAvailabilityDto};
use crate::infra::http::status::ensure_acknowledged;
use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

pub struct HttpAvailabilityApi {
    client: ApiClient,
    config: Config,
}

impl HttpAvailabilityApi {
    pub fn new(client: ApiClient, config: Config) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl AvailabilityApi for HttpAvailabilityApi {
    async fn fetch(&self, provider_id: &str, view: AvailabilityView) -> Result<AvailabilityMap, AppError> {
        let envelope: ApiEnvelope<ProviderAvailabilityDto> = self.client
            .get_json(&format!("/services/availability/{}", provider_id))
            .await?;

        if !envelope.success {
            return Err(AppError::Rejected(envelope.failure_reason()));
        }

        let dto = envelope.data
            .ok_or_else(|| AppError::Decode("Availability response without data".into()))?;
        Ok(dto.into_map(view))
    }

    async fn commit(&self, provider_id: &str, availability: &AvailabilityMap) -> Result<(), AppError> {
        let records = availability.to_records();
        info!("Committing {} availability record(s) for provider {}", records.len(), provider_id);

        let body = self.client
            .send_json(Method::PUT, &self.config.commit_path_for(provider_id), &records)
            .await?;
        ensure_acknowledged(&body)
    }
}
