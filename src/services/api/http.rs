use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Response;
use serde::de::DeserializeOwned;

use super::BookingApi;
use crate::errors::ApiError;
use crate::models::{AvailabilityResponse, BookedSlot, BookingRequest, BookingResponse};

pub struct HttpBookingApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBookingApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn availability_url(&self, date: NaiveDate) -> String {
        format!("{}/bookings/availability/{}", self.base_url, date.format("%Y-%m-%d"))
    }

    fn bookings_url(&self) -> String {
        format!("{}/bookings", self.base_url)
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn booked_slots(&self, date: NaiveDate) -> Result<Vec<BookedSlot>, ApiError> {
        let resp = self.client.get(self.availability_url(date)).send().await?;
        let body: AvailabilityResponse = read_json(resp).await?;
        Ok(body.booked_slots)
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingResponse, ApiError> {
        let resp = self
            .client
            .post(self.bookings_url())
            .json(request)
            .send()
            .await?;
        read_json(resp).await
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    let bytes = resp.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<serde_json::Value>(&bytes)
            .ok()
            .and_then(|v| v["message"].as_str().map(|s| s.to_string()));
        return Err(ApiError::Status { status, message });
    }

    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let api = HttpBookingApi::new("http://localhost:5000/api/");
        assert_eq!(api.base_url(), "http://localhost:5000/api");
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(
            api.availability_url(date),
            "http://localhost:5000/api/bookings/availability/2025-03-07"
        );
        assert_eq!(api.bookings_url(), "http://localhost:5000/api/bookings");
    }
}
