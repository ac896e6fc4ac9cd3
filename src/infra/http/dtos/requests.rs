use crate::domain::models::{booking::BookingRequest, slot::TimeSlot};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetailsBody {
    pub pet_id: String,
    pub description: String,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
}

/// `POST /service/{providerId}`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingBody {
    pub times: Vec<TimeSlot>,
    pub date: NaiveDate,
    pub booking_details: BookingDetailsBody,
}

impl From<&BookingRequest> for CreateBookingBody {
    fn from(request: &BookingRequest) -> Self {
        Self {
            times: vec![request.time],
            date: request.date,
            booking_details: BookingDetailsBody {
                pet_id: request.pet_id.clone(),
                description: request.description.clone(),
                owner_name: request.owner_name.clone(),
                owner_email: request.owner_email.clone(),
                owner_phone: request.owner_phone.clone(),
            },
        }
    }
}
