use crate::domain::models::pet::PetRecord;
use crate::domain::ports::PetApi;
use crate::error::AppError;
use crate::infra::http::client::ApiClient;
use crate::infra::http::dtos::responses::PetListResponse;
use async_trait::async_trait;

pub struct HttpPetApi {
    client: ApiClient,
}

impl HttpPetApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PetApi for HttpPetApi {
    async fn list_pets(&self) -> Result<Vec<PetRecord>, AppError> {
        match self.client.get_json::<PetListResponse>("/myanimal").await? {
            PetListResponse::Bare(pets) => Ok(pets),
            PetListResponse::Wrapped(envelope) if envelope.success => Ok(envelope.data.unwrap_or_default()),
            PetListResponse::Wrapped(envelope) => Err(AppError::Rejected(envelope.failure_reason())),
        }
    }
}
