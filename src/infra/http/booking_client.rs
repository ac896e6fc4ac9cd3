use crate::domain::models::booking::BookingRequest;
use crate::domain::ports::BookingApi;
use crate::error::AppError;
use crate::infra::http::client::ApiClient;
use crate::infra::http::dtos::requests::CreateBookingBody;
use crate::infra::http::status::ensure_acknowledged;
use async_trait::async_trait;
use reqwest::Method;

pub struct HttpBookingApi {
    client: ApiClient,
}

impl HttpBookingApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn book(&self, provider_id: &str, request: &BookingRequest) -> Result<(), AppError> {
        let payload = CreateBookingBody::from(request);
        let body = self.client
            .send_json(Method::POST, &format!("/service/{}", provider_id), &payload)
            .await?;
        ensure_acknowledged(&body)
    }
}
