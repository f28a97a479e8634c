use crate::errors::ApiError;
use crate::models::{BookingConfirmation, BookingRequest, Catalog, FormState, ANY_STYLIST};
use crate::services::api::BookingApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Date,
    Time,
    Service,
    Name,
    Phone,
}

impl RequiredField {
    pub fn label(&self) -> &'static str {
        match self {
            RequiredField::Date => "date",
            RequiredField::Time => "time",
            RequiredField::Service => "service",
            RequiredField::Name => "full name",
            RequiredField::Phone => "phone number",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Please fill in all required fields")]
    MissingFields(Vec<RequiredField>),

    #[error("Booking failed: {0}")]
    Rejected(String),

    #[error("Booking failed. Please check your internet connection and try again.")]
    Connectivity,
}

impl From<ApiError> for SubmissionError {
    fn from(e: ApiError) -> Self {
        match e.backend_message() {
            Some(message) => SubmissionError::Rejected(message.to_string()),
            None => SubmissionError::Connectivity,
        }
    }
}

/// Lists the required fields that are still blank.
pub fn missing_fields(state: &FormState) -> Vec<RequiredField> {
    let blank = |s: &str| s.trim().is_empty();
    let mut missing = Vec::new();

    if state.date.is_none() {
        missing.push(RequiredField::Date);
    }
    if blank(&state.time) {
        missing.push(RequiredField::Time);
    }
    if blank(&state.service) {
        missing.push(RequiredField::Service);
    }
    if blank(&state.customer.name) {
        missing.push(RequiredField::Name);
    }
    if blank(&state.customer.phone) {
        missing.push(RequiredField::Phone);
    }
    missing
}

pub fn validate(state: &FormState) -> Result<(), SubmissionError> {
    let missing = missing_fields(state);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(SubmissionError::MissingFields(missing))
    }
}

pub fn build_request(state: &FormState) -> Result<BookingRequest, SubmissionError> {
    validate(state)?;
    let date = state
        .date
        .ok_or_else(|| SubmissionError::MissingFields(vec![RequiredField::Date]))?;

    let stylist = if state.stylist.is_empty() {
        ANY_STYLIST.to_string()
    } else {
        state.stylist.clone()
    };

    Ok(BookingRequest {
        date,
        time: state.time.clone(),
        service: state.service.clone(),
        stylist,
        customer: state.customer.clone(),
    })
}

pub async fn submit_booking(
    api: &dyn BookingApi,
    catalog: &Catalog,
    state: &FormState,
) -> Result<BookingConfirmation, SubmissionError> {
    let request = build_request(state)?;

    let response = api.create_booking(&request).await.map_err(|e| {
        tracing::error!(error = %e, date = %request.date, time = %request.time, "booking failed");
        SubmissionError::from(e)
    })?;

    let Some(booking_id) = response.booking_id() else {
        let message = response
            .message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "the booking was not accepted".to_string());
        tracing::error!(message = %message, "booking rejected");
        return Err(SubmissionError::Rejected(message));
    };

    tracing::info!(
        booking_id,
        date = %request.date,
        time = %request.time,
        service = %request.service,
        stylist = %request.stylist,
        "booking confirmed"
    );

    Ok(BookingConfirmation {
        booking_id: booking_id.to_string(),
        date: request.date,
        time: request.time.clone(),
        service_name: catalog.service_name(&request.service),
        stylist_name: catalog.stylist_name(&request.stylist),
        customer_name: request.customer.name.clone(),
    })
}
