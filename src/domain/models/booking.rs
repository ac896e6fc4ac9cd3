use crate::domain::models::slot::TimeSlot;
use chrono::NaiveDate;
use serde::Serialize;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingField {
    PetId,
    Description,
    OwnerName,
    OwnerEmail,
    OwnerPhone,
}

impl BookingField {
    pub const ALL: [BookingField; 5] = [
        BookingField::PetId,
        BookingField::Description,
        BookingField::OwnerName,
        BookingField::OwnerEmail,
        BookingField::OwnerPhone,
    ];

    /// Name of the matching `BookingForm` struct field.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingField::PetId => "pet_id",
            BookingField::Description => "description",
            BookingField::OwnerName => "owner_name",
            BookingField::OwnerEmail => "owner_email",
            BookingField::OwnerPhone => "owner_phone",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

pub const PET_REQUIRED_MESSAGE: &str = "Please select a pet";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// Raw values of the booking dialog, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct BookingForm {
    #[validate(length(min = 1, message = "Please select a pet"))]
    pub pet_id: String,
    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub owner_name: String,
    #[validate(
        email(message = "Please enter a valid email address"),
        custom(function = "validate_email_domain")
    )]
    pub owner_email: String,
    #[validate(length(min = 10, message = "Phone number must be at least 10 characters"))]
    pub owner_phone: String,
}

impl BookingForm {
    pub fn get(&self, field: BookingField) -> &str {
        match field {
            BookingField::PetId => &self.pet_id,
            BookingField::Description => &self.description,
            BookingField::OwnerName => &self.owner_name,
            BookingField::OwnerEmail => &self.owner_email,
            BookingField::OwnerPhone => &self.owner_phone,
        }
    }

    pub fn set(&mut self, field: BookingField, value: String) {
        match field {
            BookingField::PetId => self.pet_id = value,
            BookingField::Description => self.description = value,
            BookingField::OwnerName => self.owner_name = value,
            BookingField::OwnerEmail => self.owner_email = value,
            BookingField::OwnerPhone => self.owner_phone = value,
        }
    }
}

/// Requires a dotted domain part (`local@domain.tld`).
fn validate_email_domain(email: &str) -> Result<(), ValidationError> {
    let has_tld = email
        .rsplit_once('@')
        .and_then(|(_, domain)| domain.rsplit_once('.'))
        .is_some_and(|(name, tld)| !name.is_empty() && !tld.is_empty());

    if has_tld {
        Ok(())
    } else {
        let mut err = ValidationError::new("email_domain");
        err.message = Some(Cow::Borrowed(INVALID_EMAIL_MESSAGE));
        Err(err)
    }
}

/// A validated booking, ready to be sent once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub pet_id: String,
    pub description: String,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
}

impl BookingRequest {
    pub fn from_form(date: NaiveDate, time: TimeSlot, form: &BookingForm) -> Self {
        Self {
            date,
            time,
            pet_id: form.pet_id.clone(),
            description: form.description.clone(),
            owner_name: form.owner_name.clone(),
            owner_email: form.owner_email.clone(),
            owner_phone: form.owner_phone.clone(),
        }
    }
}
