use crate::domain::models::{
    booking::{BookingField, BookingForm, BookingRequest, PET_REQUIRED_MESSAGE},
    notification::Notification,
    pet::PetRecord,
    session::UserSession,
    slot::TimeSlot,
};
use crate::domain::ports::{BookingApi, PetApi};
use crate::error::AppError;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{error, info, warn};
use validator::Validate;

pub const BOOKING_SUCCESS_MESSAGE: &str = "Booking request sent successfully!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    SetField { field: BookingField, value: String },
    SelectPet(String),
    PrefillContact { name: String, email: String, phone: String },
    Reset,
}

impl FormAction {
    pub fn set(field: BookingField, value: impl Into<String>) -> Self {
        FormAction::SetField { field, value: value.into() }
    }

    /// Fills owner fields from the signed-in user; absent details become empty.
    pub fn prefill_from(session: &UserSession) -> Self {
        FormAction::PrefillContact {
            name: session.display_name.clone(),
            email: session.email.clone().unwrap_or_default(),
            phone: session.phone.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PetListState {
    #[default]
    NotLoaded,
    Empty,
    Loaded(Vec<PetRecord>),
}

impl PetListState {
    pub fn pets(&self) -> &[PetRecord] {
        match self {
            PetListState::Loaded(pets) => pets,
            _ => &[],
        }
    }
}

/// A submission that passed validation and is waiting on the network.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub request: BookingRequest,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid,
    InFlight,
    Booked(Notification),
    Failed(Notification),
    /// The dialog was closed while the request was out.
    Discarded,
}

/// Booking dialog for one picked date and time.
#[derive(Debug, Clone)]
pub struct BookingFormController {
    date: NaiveDate,
    time: TimeSlot,
    form: BookingForm,
    errors: BTreeMap<BookingField, String>,
    pets: PetListState,
    in_flight: bool,
    is_open: bool,
    generation: u64,
    notification: Option<Notification>,
}

impl BookingFormController {
    pub fn new(date: NaiveDate, time: TimeSlot) -> Self {
        Self {
            date,
            time,
            form: BookingForm::default(),
            errors: BTreeMap::new(),
            pets: PetListState::NotLoaded,
            in_flight: false,
            is_open: true,
            generation: 0,
            notification: None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> TimeSlot {
        self.time
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn value(&self, field: BookingField) -> &str {
        self.form.get(field)
    }

    pub fn errors(&self) -> &BTreeMap<BookingField, String> {
        &self.errors
    }

    pub fn error(&self, field: BookingField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn pets(&self) -> &PetListState {
        &self.pets
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    /// Submit and cancel are disabled while a request is out.
    pub fn controls_disabled(&self) -> bool {
        self.in_flight
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    /// (Re)opens the dialog and loads the user's pets.
    pub async fn open(&mut self, pet_api: &dyn PetApi) -> Result<(), AppError> {
        self.is_open = true;
        match pet_api.list_pets().await {
            Ok(pets) if pets.is_empty() => {
                self.pets = PetListState::Empty;
                Ok(())
            }
            Ok(pets) => {
                self.pets = PetListState::Loaded(pets);
                Ok(())
            }
            Err(e) => {
                error!("Failed to load pets: {}", e);
                self.notification = Some(Notification::error(e.user_message()));
                Err(e)
            }
        }
    }

    pub fn set_pets(&mut self, pets: Vec<PetRecord>) {
        self.pets = if pets.is_empty() { PetListState::Empty } else { PetListState::Loaded(pets) };
    }

    pub fn dispatch(&mut self, action: FormAction) {
        match action {
            FormAction::SetField { field, value } => self.set_field(field, value),
            FormAction::SelectPet(id) => self.set_field(BookingField::PetId, id),
            FormAction::PrefillContact { name, email, phone } => {
                self.set_field(BookingField::OwnerName, name);
                self.set_field(BookingField::OwnerEmail, email);
                self.set_field(BookingField::OwnerPhone, phone);
            }
            FormAction::Reset => {
                self.form = BookingForm::default();
                self.errors.clear();
            }
        }
    }

    fn set_field(&mut self, field: BookingField, value: String) {
        self.form.set(field, value);
        self.errors.remove(&field);
    }

    /// Runs every rule and records all failures at once.
    pub fn validate(&mut self) -> bool {
        let mut errors = BTreeMap::new();

        if let Err(report) = self.form.validate() {
            for (name, field_errors) in report.field_errors() {
                let Some(field) = BookingField::from_name(&name) else {
                    continue;
                };
                let message = field_errors
                    .iter()
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("Invalid {}", field.as_str()));
                errors.insert(field, message);
            }
        }

        if !errors.contains_key(&BookingField::PetId) && !self.pet_is_known() {
            errors.insert(BookingField::PetId, PET_REQUIRED_MESSAGE.to_string());
        }

        self.errors = errors;
        self.errors.is_empty()
    }

    fn pet_is_known(&self) -> bool {
        match &self.pets {
            PetListState::NotLoaded => true,
            PetListState::Empty => false,
            PetListState::Loaded(pets) => pets.iter().any(|p| p.id == self.form.pet_id),
        }
    }

    pub fn begin_submit(&mut self) -> Result<PendingSubmission, AppError> {
        if self.in_flight {
            return Err(AppError::SubmissionInFlight);
        }
        if !self.is_open {
            return Err(AppError::Validation("The booking form is closed".into()));
        }
        if !self.validate() {
            return Err(AppError::InvalidForm(self.errors.len()));
        }

        self.in_flight = true;
        Ok(PendingSubmission {
            request: BookingRequest::from_form(self.date, self.time, &self.form),
            generation: self.generation,
        })
    }

    /// Applies the result of a submission. Returns `None` when the dialog was
    /// closed after the request left.
    pub fn complete_submit(
        &mut self,
        pending: PendingSubmission,
        result: Result<(), AppError>,
    ) -> Option<Notification> {
        if pending.generation != self.generation {
            info!("Discarding booking result for a closed form ({} {})", pending.request.date, pending.request.time);
            return None;
        }

        self.in_flight = false;
        let notification = match result {
            Ok(()) => {
                self.dispatch(FormAction::Reset);
                self.is_open = false;
                self.generation += 1;
                Notification::success(BOOKING_SUCCESS_MESSAGE)
            }
            Err(e) => {
                warn!("Booking submission failed: {}", e);
                Notification::error(e.user_message())
            }
        };
        self.notification = Some(notification.clone());
        Some(notification)
    }

    pub async fn submit(&mut self, api: &dyn BookingApi, provider_id: &str) -> SubmitOutcome {
        let pending = match self.begin_submit() {
            Ok(pending) => pending,
            Err(AppError::SubmissionInFlight) => return SubmitOutcome::InFlight,
            Err(_) => return SubmitOutcome::Invalid,
        };

        info!("Submitting booking for {} {} (pet {})", pending.request.date, pending.request.time, pending.request.pet_id);
        let result = api.book(provider_id, &pending.request).await;
        let succeeded = result.is_ok();

        match self.complete_submit(pending, result) {
            None => SubmitOutcome::Discarded,
            Some(notification) if succeeded => SubmitOutcome::Booked(notification),
            Some(notification) => SubmitOutcome::Failed(notification),
        }
    }

    /// Cancel button. Disabled while a request is out.
    pub fn cancel(&mut self) -> Result<(), AppError> {
        if self.in_flight {
            return Err(AppError::SubmissionInFlight);
        }
        self.shut();
        Ok(())
    }

    /// Teardown of the dialog, even mid-request. A result that arrives later
    /// is discarded.
    pub fn discard(&mut self) {
        if self.in_flight {
            info!("Booking form discarded with a request in flight");
        }
        self.shut();
    }

    fn shut(&mut self) {
        self.dispatch(FormAction::Reset);
        self.is_open = false;
        self.in_flight = false;
        self.generation += 1;
    }
}
