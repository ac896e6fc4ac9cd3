use crate::domain::models::{availability::AvailabilityMap, slot::TimeSlot};
use crate::domain::ports::{AvailabilityApi, AvailabilityView};
use crate::error::AppError;
use chrono::NaiveDate;
use tracing::{debug, error, info};

/// Slots written by "quick fill": a fixed ascending day plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTemplate {
    slots: Vec<TimeSlot>,
}

impl SlotTemplate {
    pub fn new(mut slots: Vec<TimeSlot>) -> Self {
        slots.sort();
        slots.dedup();
        Self { slots }
    }

    /// Slots every `step_min` minutes in each `[start, end)` range, given in
    /// minutes since midnight.
    pub fn stepped(ranges: &[(u32, u32)], step_min: u32) -> Self {
        let step = step_min.max(1) as usize;
        let slots = ranges
            .iter()
            .flat_map(|&(start, end)| (start..end).step_by(step))
            .filter_map(|minute| TimeSlot::from_hm(minute / 60, minute % 60))
            .collect();
        Self::new(slots)
    }

    /// Half-hourly 09:00-18:00 with the 12:00-14:00 lunch break left out.
    pub fn business_hours() -> Self {
        Self::stepped(&[(9 * 60, 12 * 60), (14 * 60, 18 * 60)], 30)
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }
}

impl Default for SlotTemplate {
    fn default() -> Self {
        Self::business_hours()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Unselected,
    Selected { date: NaiveDate, modified: bool },
}

/// Provider-side availability editing. Edits stay local until `commit`.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityEditor {
    committed: AvailabilityMap,
    staged: AvailabilityMap,
    selected: Option<NaiveDate>,
    template: SlotTemplate,
}

impl AvailabilityEditor {
    pub fn new(committed: AvailabilityMap) -> Self {
        Self {
            staged: committed.clone(),
            committed,
            selected: None,
            template: SlotTemplate::default(),
        }
    }

    pub fn with_template(mut self, template: SlotTemplate) -> Self {
        self.template = template;
        self
    }

    /// Replaces both copies with the provider's persisted availability.
    pub async fn load(&mut self, api: &dyn AvailabilityApi, provider_id: &str) -> Result<(), AppError> {
        let persisted = api
            .fetch(provider_id, AvailabilityView::Configured)
            .await
            .inspect_err(|e| error!("Failed to load availability for provider {}: {}", provider_id, e))?;
        info!("Loaded availability for provider {} ({} days)", provider_id, persisted.len());
        self.staged = persisted.clone();
        self.committed = persisted;
        self.selected = None;
        Ok(())
    }

    pub fn staged(&self) -> &AvailabilityMap {
        &self.staged
    }

    pub fn committed(&self) -> &AvailabilityMap {
        &self.committed
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn state(&self) -> EditorState {
        match self.selected {
            None => EditorState::Unselected,
            Some(date) => EditorState::Selected {
                date,
                modified: self.staged.slots(date) != self.committed.slots(date),
            },
        }
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.staged != self.committed
    }

    /// Selects `date` for editing and returns its staged slots.
    pub fn select_date(&mut self, date: NaiveDate) -> &[TimeSlot] {
        self.selected = Some(date);
        self.staged.slots(date)
    }

    pub fn selected_slots(&self) -> &[TimeSlot] {
        self.selected.map(|date| self.staged.slots(date)).unwrap_or(&[])
    }

    pub fn add_slot(&mut self, slot: TimeSlot) -> Result<(), AppError> {
        let date = self.require_selected()?;
        if self.staged.insert_slot(date, slot) {
            debug!("Staged {} on {}", slot, date);
        }
        Ok(())
    }

    pub fn remove_slot(&mut self, slot: TimeSlot) -> Result<(), AppError> {
        let date = self.require_selected()?;
        if self.staged.remove_slot(date, slot) {
            debug!("Unstaged {} on {}", slot, date);
        }
        Ok(())
    }

    /// Overwrites the selected day with the template.
    pub fn quick_fill(&mut self) -> Result<(), AppError> {
        let date = self.require_selected()?;
        self.staged.replace_day(date, self.template.slots().to_vec());
        Ok(())
    }

    pub fn clear_day(&mut self) -> Result<(), AppError> {
        let date = self.require_selected()?;
        self.staged.clear_day(date);
        Ok(())
    }

    /// Persists the whole staged map, even when it is empty. Staged edits
    /// survive a failed commit.
    pub async fn commit(&mut self, api: &dyn AvailabilityApi, provider_id: &str) -> Result<(), AppError> {
        match api.commit(provider_id, &self.staged).await {
            Ok(()) => {
                info!("Committed availability for provider {} ({} days)", provider_id, self.staged.len());
                self.committed = self.staged.clone();
                Ok(())
            }
            Err(e) => {
                error!("Availability commit failed for provider {}: {}", provider_id, e);
                Err(e)
            }
        }
    }

    /// Drops staged edits and returns to the last committed map.
    pub fn cancel(&mut self) {
        self.staged = self.committed.clone();
        self.selected = None;
    }

    fn require_selected(&self) -> Result<NaiveDate, AppError> {
        self.selected.ok_or(AppError::NoDateSelected)
    }
}
