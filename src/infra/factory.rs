use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::domain::models::session::UserSession;
use crate::error::AppError;
use crate::infra::http::{
    availability_client::HttpAvailabilityApi, booking_client::HttpBookingApi,
    client::ApiClient, pet_client::HttpPetApi,
};
use crate::state::AppState;

pub fn bootstrap_state(config: &Config, session: UserSession) -> Result<AppState, AppError> {
    info!("Initializing API client for {} (timeout {:?})", config.api_base_url, config.api_timeout);

    if !session.is_authenticated() {
        info!("No auth token in session; requests will be sent anonymously");
    }

    let client = ApiClient::new(config, session.auth_token.clone())?;

    Ok(AppState {
        config: config.clone(),
        session,
        availability_api: Arc::new(HttpAvailabilityApi::new(client.clone(), config.clone())),
        booking_api: Arc::new(HttpBookingApi::new(client.clone())),
        pet_api: Arc::new(HttpPetApi::new(client)),
    })
}
