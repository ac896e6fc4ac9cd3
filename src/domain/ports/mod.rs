use crate::domain::models::{
    availability::AvailabilityMap, booking::BookingRequest, pet::PetRecord,
};
use crate::error::AppError;
use async_trait::async_trait;

/// Which slots of a provider's persisted availability to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityView {
    /// Slots still open for booking, on days marked available. Consumer calendar.
    Bookable,
    /// Every configured slot, booked or not. Provider editor.
    Configured,
}

#[async_trait]
pub trait AvailabilityApi: Send + Sync {
    async fn fetch(&self, provider_id: &str, view: AvailabilityView) -> Result<AvailabilityMap, AppError>;
    /// Replaces the provider's persisted availability with `availability`.
    async fn commit(&self, provider_id: &str, availability: &AvailabilityMap) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn book(&self, provider_id: &str, request: &BookingRequest) -> Result<(), AppError>;
}

#[async_trait]
pub trait PetApi: Send + Sync {
    async fn list_pets(&self) -> Result<Vec<PetRecord>, AppError>;
}
