use std::sync::Arc;
use crate::config::Config;
use crate::domain::models::session::UserSession;
use crate::domain::ports::{AvailabilityApi, BookingApi, PetApi};
use crate::domain::services::{availability_editor::AvailabilityEditor, booking_flow::BookingFlow};
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub session: UserSession,
    pub availability_api: Arc<dyn AvailabilityApi>,
    pub booking_api: Arc<dyn BookingApi>,
    pub pet_api: Arc<dyn PetApi>,
}

impl AppState {
    /// Customer-side flow for booking `provider_id`.
    pub fn booking_flow(&self, provider_id: &str) -> BookingFlow {
        BookingFlow::new(provider_id, self.session.clone())
    }

    /// Provider-side editor seeded with the persisted availability.
    pub async fn availability_editor(&self, provider_id: &str) -> Result<AvailabilityEditor, AppError> {
        let mut editor = AvailabilityEditor::default();
        editor.load(self.availability_api.as_ref(), provider_id).await?;
        Ok(editor)
    }
}
