use crate::domain::models::{
    availability::AvailabilityMap,
    calendar::{MonthStep, YearMonth},
    notification::Notification,
    session::UserSession,
    slot::TimeSlot,
};
use crate::domain::ports::{AvailabilityApi, AvailabilityView, BookingApi, PetApi};
use crate::domain::services::{
    booking_form::{BookingFormController, FormAction, SubmitOutcome},
    calendar_grid::CalendarGrid,
    time_slots::TimeSlotPicker,
};
use crate::error::AppError;
use chrono::NaiveDate;
use tracing::{debug, error, info};

/// Ticket for an availability fetch started with `begin_load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Customer booking flow for one provider: calendar, then time, then form.
#[derive(Debug)]
pub struct BookingFlow {
    provider_id: String,
    session: UserSession,
    calendar: CalendarGrid,
    picker: Option<TimeSlotPicker>,
    form: Option<BookingFormController>,
    notification: Option<Notification>,
    load_generation: u64,
}

impl BookingFlow {
    pub fn new(provider_id: impl Into<String>, session: UserSession) -> Self {
        let calendar = CalendarGrid::starting_today(AvailabilityMap::new(), session.today());
        Self {
            provider_id: provider_id.into(),
            session,
            calendar,
            picker: None,
            form: None,
            notification: None,
            load_generation: 0,
        }
    }

    /// Opens on `month` with `today` pinned, instead of the session clock.
    pub fn with_month(mut self, month: YearMonth, today: NaiveDate) -> Self {
        self.calendar = CalendarGrid::new(month, self.calendar.availability().clone(), today);
        self
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn session(&self) -> &UserSession {
        &self.session
    }

    pub fn calendar(&self) -> &CalendarGrid {
        &self.calendar
    }

    pub fn picker(&self) -> Option<&TimeSlotPicker> {
        self.picker.as_ref()
    }

    pub fn form(&self) -> Option<&BookingFormController> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut BookingFormController> {
        self.form.as_mut()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        LoadTicket(self.load_generation)
    }

    /// Installs a fetched snapshot unless a newer load has started since.
    /// On failure the previous snapshot stays in place.
    pub fn apply_load(&mut self, ticket: LoadTicket, result: Result<AvailabilityMap, &AppError>) -> bool {
        if ticket.0 != self.load_generation {
            info!("Discarding stale availability for provider {}", self.provider_id);
            return false;
        }

        match result {
            Ok(snapshot) => {
                info!("Availability loaded for provider {} ({} days)", self.provider_id, snapshot.len());
                self.calendar.set_availability(snapshot);
                self.refresh_picker();
                true
            }
            Err(e) => {
                error!("Failed to load availability for provider {}: {}", self.provider_id, e);
                self.notification = Some(Notification::error(e.user_message()));
                false
            }
        }
    }

    pub async fn load_availability(&mut self, api: &dyn AvailabilityApi) -> Result<(), AppError> {
        let ticket = self.begin_load();
        match api.fetch(&self.provider_id, AvailabilityView::Bookable).await {
            Ok(snapshot) => {
                self.apply_load(ticket, Ok(snapshot));
                Ok(())
            }
            Err(e) => {
                self.apply_load(ticket, Err(&e));
                Err(e)
            }
        }
    }

    pub fn navigate_month(&mut self, step: MonthStep) {
        self.calendar.navigate_month(step);
    }

    /// Picks a day and offers its slots. Unavailable days are ignored, and so
    /// is any change while a booking request is out. An open form for the
    /// previous pick is dropped.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        if self.submission_in_flight() || !self.calendar.select_date(date) {
            return false;
        }
        self.drop_form();
        let slots = self.calendar.availability().slots(date).to_vec();
        self.picker = Some(TimeSlotPicker::new(slots));
        true
    }

    pub fn select_time(&mut self, slot: TimeSlot) -> bool {
        if self.submission_in_flight() {
            return false;
        }
        let accepted = self.picker.as_mut().is_some_and(|picker| picker.select_time(slot));
        if accepted && self.form.as_ref().is_some_and(|form| form.time() != slot) {
            self.drop_form();
        }
        accepted
    }

    pub fn selected_time(&self) -> Option<TimeSlot> {
        self.picker.as_ref().and_then(TimeSlotPicker::selected_time)
    }

    /// Opens the booking dialog for the picked date and time.
    pub async fn open_booking_form(&mut self, pet_api: &dyn PetApi) -> Result<(), AppError> {
        if self.submission_in_flight() {
            return Err(AppError::SubmissionInFlight);
        }
        let date = self.calendar.selected_date().ok_or(AppError::NoDateSelected)?;
        let time = self.selected_time().ok_or(AppError::SlotNotSelected)?;

        let mut form = BookingFormController::new(date, time);
        form.dispatch(FormAction::prefill_from(&self.session));
        let loaded = form.open(pet_api).await;
        if let Err(ref e) = loaded {
            self.notification = Some(Notification::error(e.user_message()));
        }
        self.form = Some(form);
        loaded
    }

    pub async fn submit_booking(&mut self, api: &dyn BookingApi) -> Result<SubmitOutcome, AppError> {
        let form = self.form.as_mut().ok_or(AppError::Validation("No booking form is open".into()))?;
        let outcome = form.submit(api, &self.provider_id).await;

        match &outcome {
            SubmitOutcome::Booked(notification) => {
                self.notification = Some(notification.clone());
                self.form = None;
                if let Some(picker) = self.picker.as_mut() {
                    picker.clear_selection();
                }
            }
            SubmitOutcome::Failed(notification) => {
                self.notification = Some(notification.clone());
            }
            _ => {}
        }
        Ok(outcome)
    }

    /// Cancel button of the dialog. Refused while the request is out.
    pub fn close_booking_form(&mut self) -> Result<(), AppError> {
        if let Some(form) = self.form.as_mut() {
            form.cancel()?;
        }
        self.form = None;
        Ok(())
    }

    fn submission_in_flight(&self) -> bool {
        self.form.as_ref().is_some_and(BookingFormController::is_submitting)
    }

    fn drop_form(&mut self) {
        if let Some(mut form) = self.form.take() {
            debug!("Dropping booking form for {} {}", form.date(), form.time());
            form.discard();
        }
    }

    fn refresh_picker(&mut self) {
        let Some(date) = self.calendar.selected_date() else {
            return;
        };
        if self.calendar.availability().slot_count(date) == 0 {
            info!("Selected date {} is no longer available", date);
            self.calendar.clear_selection();
            self.picker = None;
            if !self.submission_in_flight() {
                self.drop_form();
            }
            return;
        }
        let slots = self.calendar.availability().slots(date).to_vec();
        let previous = self.selected_time();
        let mut picker = TimeSlotPicker::new(slots);
        if let Some(slot) = previous {
            picker.select_time(slot);
        }
        self.picker = Some(picker);
    }
}
