use chrono::NaiveDate;

use crate::config::{AvailabilityFallback, FormConfig};
use crate::errors::ApiError;
use crate::models::{BookedSlot, BusinessHours, TimeSlot, ANY_STYLIST};
use crate::services::api::BookingApi;

/// Every slot start between opening (inclusive) and closing (exclusive), as `HH:MM`.
pub fn slot_times(hours: &BusinessHours) -> Vec<String> {
    let step = hours.slot_minutes.max(1) as usize;
    (hours.open_minute()..hours.close_minute())
        .step_by(step)
        .map(|m| format!("{:02}:{:02}", m / 60, m % 60))
        .collect()
}

/// An empty filter or `any` matches every booked stylist.
pub fn stylist_matches(filter: &str, booked_stylist: &str) -> bool {
    filter.is_empty() || filter == ANY_STYLIST || filter == booked_stylist
}

pub fn mark_availability(times: &[String], booked: &[BookedSlot], filter: &str) -> Vec<TimeSlot> {
    times
        .iter()
        .map(|time| {
            let taken = booked
                .iter()
                .any(|b| &b.time == time && stylist_matches(filter, &b.stylist));
            TimeSlot {
                time: time.clone(),
                available: !taken,
            }
        })
        .collect()
}

pub async fn resolve_slots(
    api: &dyn BookingApi,
    config: &FormConfig,
    date: NaiveDate,
    filter: &str,
) -> Result<Vec<TimeSlot>, ApiError> {
    let times = slot_times(&config.hours);

    match api.booked_slots(date).await {
        Ok(booked) => {
            tracing::debug!(%date, filter, booked = booked.len(), "resolved availability");
            Ok(mark_availability(&times, &booked, filter))
        }
        Err(e) => match config.fallback {
            AvailabilityFallback::AssumeAvailable => {
                tracing::warn!(
                    error = %e,
                    %date,
                    "availability lookup failed, showing all slots as available"
                );
                Ok(mark_availability(&times, &[], filter))
            }
            AvailabilityFallback::Propagate => {
                tracing::error!(error = %e, %date, "availability lookup failed");
                Err(e)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use reqwest::StatusCode;

    use super::*;
    use crate::models::{BookingRequest, BookingResponse};

    struct StubApi {
        booked: Option<Vec<BookedSlot>>,
    }

    #[async_trait]
    impl BookingApi for StubApi {
        async fn booked_slots(&self, _date: NaiveDate) -> Result<Vec<BookedSlot>, ApiError> {
            self.booked.clone().ok_or(ApiError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: None,
            })
        }

        async fn create_booking(
            &self,
            _request: &BookingRequest,
        ) -> Result<BookingResponse, ApiError> {
            Ok(BookingResponse::default())
        }
    }

    fn booked(time: &str, stylist: &str) -> BookedSlot {
        BookedSlot {
            time: time.to_string(),
            stylist: stylist.to_string(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 16).unwrap()
    }

    #[test]
    fn test_default_hours_give_eighteen_slots() {
        let times = slot_times(&BusinessHours::default());
        assert_eq!(times.len(), 18);
        assert_eq!(times.first().map(String::as_str), Some("09:00"));
        assert_eq!(times[1], "09:30");
        assert_eq!(times.last().map(String::as_str), Some("17:30"));
        assert!(!times.contains(&"18:00".to_string()));
    }

    #[test]
    fn test_custom_hours() {
        let hours = BusinessHours::parse("08:15", "09:15", 20).unwrap();
        assert_eq!(slot_times(&hours), vec!["08:15", "08:35", "08:55"]);
    }

    #[test]
    fn test_stylist_matches() {
        assert!(stylist_matches("", "john"));
        assert!(stylist_matches("any", "john"));
        assert!(stylist_matches("john", "john"));
        assert!(!stylist_matches("mike", "john"));
    }

    #[test]
    fn test_booked_slot_filtered_by_stylist() {
        let times = slot_times(&BusinessHours::default());
        let taken = vec![booked("10:00", "john")];

        for filter in ["john", "any", ""] {
            let slots = mark_availability(&times, &taken, filter);
            let ten = slots.iter().find(|s| s.time == "10:00").unwrap();
            assert!(!ten.available, "filter {filter:?} should see 10:00 as booked");
            assert_eq!(slots.iter().filter(|s| !s.available).count(), 1);
        }

        let slots = mark_availability(&times, &taken, "mike");
        assert!(slots.iter().all(|s| s.available));
    }

    #[test]
    fn test_booking_outside_hours_is_ignored() {
        let times = slot_times(&BusinessHours::default());
        let slots = mark_availability(&times, &[booked("19:00", "john")], "any");
        assert_eq!(slots.len(), 18);
        assert!(slots.iter().all(|s| s.available));
    }

    #[tokio::test]
    async fn test_resolve_with_empty_booked_list() {
        let api = StubApi { booked: Some(vec![]) };
        let slots = resolve_slots(&api, &FormConfig::default(), date(), "")
            .await
            .unwrap();
        assert_eq!(slots.len(), 18);
        assert!(slots.iter().all(|s| s.available));
    }

    #[tokio::test]
    async fn test_resolve_fails_open() {
        let api = StubApi { booked: None };
        let slots = resolve_slots(&api, &FormConfig::default(), date(), "john")
            .await
            .unwrap();
        assert_eq!(slots.len(), 18);
        assert!(slots.iter().all(|s| s.available));
    }

    #[tokio::test]
    async fn test_resolve_propagates_when_configured() {
        let api = StubApi { booked: None };
        let config = FormConfig {
            fallback: AvailabilityFallback::Propagate,
            ..FormConfig::default()
        };
        let result = resolve_slots(&api, &config, date(), "john").await;
        assert!(matches!(result, Err(ApiError::Status { .. })));
    }
}
