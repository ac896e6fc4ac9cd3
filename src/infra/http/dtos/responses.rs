use crate::domain::models::{availability::AvailabilityMap, pet::PetRecord, slot::TimeSlot};
use crate::domain::ports::AvailabilityView;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

/// `{ success, data?, error? }` wrapper used by most endpoints.
#[derive(Deserialize, Debug)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn failure_reason(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "The server reported a failure".to_string())
    }
}

/// `{ success, error? }` acknowledgement of a write.
#[derive(Deserialize, Debug)]
pub struct StatusResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailabilityDto {
    pub date: String,
    #[serde(default)]
    pub all_time_slots: Vec<String>,
    #[serde(default)]
    pub available_time_slots: Vec<String>,
    #[serde(default)]
    pub is_available: bool,
}

/// `data` of the availability endpoint. `providerId` and `bookedTimeSlots`
/// are not needed and left undeserialized.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAvailabilityDto {
    #[serde(default)]
    pub availability: Vec<DayAvailabilityDto>,
}

impl ProviderAvailabilityDto {
    /// Converts to the domain map. Entries with a malformed date or time are
    /// skipped and logged.
    pub fn into_map(self, view: AvailabilityView) -> AvailabilityMap {
        let mut map = AvailabilityMap::new();

        for day in self.availability {
            let Ok(date) = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d") else {
                warn!("Skipping availability entry with malformed date '{}'", day.date);
                continue;
            };

            let raw_slots = match view {
                AvailabilityView::Bookable if !day.is_available => continue,
                AvailabilityView::Bookable => day.available_time_slots,
                AvailabilityView::Configured => day.all_time_slots,
            };

            for raw in raw_slots {
                match TimeSlot::parse(&raw) {
                    Ok(slot) => {
                        map.insert_slot(date, slot);
                    }
                    Err(e) => warn!("Skipping slot on {}: {}", date, e),
                }
            }
        }
        map
    }
}

/// `GET /myanimal` answers either with a bare list or an envelope.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum PetListResponse {
    Bare(Vec<PetRecord>),
    Wrapped(ApiEnvelope<Vec<PetRecord>>),
}
