pub mod http;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::ApiError;
use crate::models::{BookedSlot, BookingRequest, BookingResponse};

/// The remote booking backend: availability reads and booking writes.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn booked_slots(&self, date: NaiveDate) -> Result<Vec<BookedSlot>, ApiError>;

    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingResponse, ApiError>;
}
