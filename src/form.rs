use chrono::{Months, NaiveDate};

use crate::config::FormConfig;
use crate::errors::ApiError;
use crate::models::{BookingConfirmation, CustomerField, FormState, TimeSlot};
use crate::services::api::BookingApi;
use crate::services::slots::resolve_slots;
use crate::services::submission::{missing_fields, submit_booking, SubmissionError};

#[derive(Debug, Clone, PartialEq)]
pub enum FormStage {
    Selecting,
    Confirmed(BookingConfirmation),
}

impl FormStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormStage::Selecting => "selecting",
            FormStage::Confirmed(_) => "confirmed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    #[error("Please pick a date between {min} and {max}")]
    DateOutOfRange { min: NaiveDate, max: NaiveDate },

    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Unknown stylist: {0}")]
    UnknownStylist(String),

    #[error("{0} is not one of the available time slots")]
    UnknownTime(String),

    #[error("{0} is already booked")]
    SlotBooked(String),

    #[error("This booking is already confirmed. Start a new booking first.")]
    AlreadyConfirmed,
}

/// One availability lookup issued by the form. Results are only applied while
/// `generation` is still the latest one handed out.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotQuery {
    pub generation: u64,
    pub date: NaiveDate,
    pub stylist: String,
}

pub struct BookingForm {
    config: FormConfig,
    state: FormState,
    slots: Vec<TimeSlot>,
    stage: FormStage,
    last_error: Option<String>,
    generation: u64,
}

impl BookingForm {
    pub fn new(config: FormConfig) -> Self {
        Self {
            config,
            state: FormState::default(),
            slots: Vec::new(),
            stage: FormStage::Selecting,
            last_error: None,
            generation: 0,
        }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn stage(&self) -> &FormStage {
        &self.stage
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        match &self.stage {
            FormStage::Confirmed(c) => Some(c),
            FormStage::Selecting => None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self.stage, FormStage::Confirmed(_))
    }

    /// First and last bookable day, both inclusive.
    pub fn date_bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let max = today
            .checked_add_months(Months::new(self.config.horizon_months))
            .unwrap_or(NaiveDate::MAX);
        (today, max)
    }

    /// Whether every required field is filled in.
    pub fn can_submit(&self) -> bool {
        !self.is_confirmed() && missing_fields(&self.state).is_empty()
    }

    // ── Selection ──

    pub fn set_date(&mut self, date: NaiveDate, today: NaiveDate) -> Result<(), SelectionError> {
        self.ensure_selecting()?;
        let (min, max) = self.date_bounds(today);
        if date < min || date > max {
            return Err(SelectionError::DateOutOfRange { min, max });
        }

        if self.state.date != Some(date) {
            self.state.date = Some(date);
            self.state.time.clear();
            self.slots.clear();
        }
        Ok(())
    }

    pub fn set_stylist(&mut self, stylist: &str) -> Result<(), SelectionError> {
        self.ensure_selecting()?;
        if !stylist.is_empty() && self.config.catalog.stylist(stylist).is_none() {
            return Err(SelectionError::UnknownStylist(stylist.to_string()));
        }

        if self.state.stylist != stylist {
            self.state.stylist = stylist.to_string();
            self.slots.clear();
        }
        Ok(())
    }

    pub fn select_service(&mut self, service: &str) -> Result<(), SelectionError> {
        self.ensure_selecting()?;
        if self.config.catalog.service(service).is_none() {
            return Err(SelectionError::UnknownService(service.to_string()));
        }
        self.state.service = service.to_string();
        Ok(())
    }

    pub fn select_time(&mut self, time: &str) -> Result<(), SelectionError> {
        self.ensure_selecting()?;
        let slot = self
            .slots
            .iter()
            .find(|s| s.time == time)
            .ok_or_else(|| SelectionError::UnknownTime(time.to_string()))?;
        if !slot.available {
            return Err(SelectionError::SlotBooked(time.to_string()));
        }
        self.state.time = time.to_string();
        Ok(())
    }

    pub fn update_customer(
        &mut self,
        field: CustomerField,
        value: impl Into<String>,
    ) -> Result<(), SelectionError> {
        self.ensure_selecting()?;
        self.state.customer.set(field, value);
        Ok(())
    }

    fn ensure_selecting(&self) -> Result<(), SelectionError> {
        if self.is_confirmed() {
            return Err(SelectionError::AlreadyConfirmed);
        }
        Ok(())
    }

    // ── Availability ──

    /// Starts a new availability lookup for the current date and stylist.
    /// Any lookup started earlier becomes stale.
    pub fn begin_slot_refresh(&mut self) -> Option<SlotQuery> {
        let date = self.state.date?;
        self.generation += 1;
        Some(SlotQuery {
            generation: self.generation,
            date,
            stylist: self.state.stylist.clone(),
        })
    }

    /// Applies the result of `query`. Returns false and leaves the form untouched
    /// when a newer lookup has been started since.
    pub fn apply_slots(&mut self, query: &SlotQuery, slots: Vec<TimeSlot>) -> bool {
        if query.generation != self.generation {
            tracing::debug!(
                stale = query.generation,
                current = self.generation,
                "discarding stale availability result"
            );
            return false;
        }

        let still_free = slots
            .iter()
            .any(|s| s.time == self.state.time && s.available);
        if !self.state.time.is_empty() && !still_free {
            tracing::info!(time = %self.state.time, "selected time is no longer available");
            self.state.time.clear();
        }

        self.slots = slots;
        true
    }

    pub async fn refresh_slots(&mut self, api: &dyn BookingApi) -> Result<bool, ApiError> {
        let Some(query) = self.begin_slot_refresh() else {
            return Ok(false);
        };
        let slots = resolve_slots(api, &self.config, query.date, &query.stylist).await?;
        Ok(self.apply_slots(&query, slots))
    }

    // ── Submission ──

    pub async fn submit(
        &mut self,
        api: &dyn BookingApi,
    ) -> Result<BookingConfirmation, SubmissionError> {
        if let FormStage::Confirmed(existing) = &self.stage {
            return Ok(existing.clone());
        }

        match submit_booking(api, &self.config.catalog, &self.state).await {
            Ok(confirmation) => {
                self.last_error = None;
                self.stage = FormStage::Confirmed(confirmation.clone());
                Ok(confirmation)
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Clears every field and returns to the selection stage.
    pub fn reset(&mut self) {
        self.state.clear();
        self.slots.clear();
        self.stage = FormStage::Selecting;
        self.last_error = None;
        self.generation += 1;
    }
}
