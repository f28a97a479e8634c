use std::env;

use crate::models::{BusinessHours, Catalog};

/// What the slot resolver does when the availability lookup fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AvailabilityFallback {
    /// Fail open: show every slot as bookable and let the backend reject conflicts.
    #[default]
    AssumeAvailable,
    /// Surface the lookup error to the caller.
    Propagate,
}

impl AvailabilityFallback {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "assume_available" | "open" => Some(AvailabilityFallback::AssumeAvailable),
            "propagate" | "fail" => Some(AvailabilityFallback::Propagate),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FormConfig {
    pub catalog: Catalog,
    pub hours: BusinessHours,
    pub horizon_months: u32,
    pub fallback: AvailabilityFallback,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            catalog: Catalog::default(),
            hours: BusinessHours::default(),
            horizon_months: 3,
            fallback: AvailabilityFallback::AssumeAvailable,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub form: FormConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = FormConfig::default();

        let slot_minutes = get("SLOT_MINUTES")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.hours.slot_minutes);
        let hours = match (get("BUSINESS_OPEN"), get("BUSINESS_CLOSE")) {
            (None, None) if slot_minutes == defaults.hours.slot_minutes => defaults.hours,
            (open, close) => BusinessHours::parse(
                open.as_deref().unwrap_or("09:00"),
                close.as_deref().unwrap_or("18:00"),
                slot_minutes,
            )
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "invalid business hours, using defaults");
                defaults.hours
            }),
        };

        Self {
            api_base_url: get("BOOKING_API_URL")
                .unwrap_or_else(|| "http://localhost:5000/api".to_string()),
            request_timeout_secs: get("BOOKING_API_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            form: FormConfig {
                catalog: defaults.catalog,
                hours,
                horizon_months: get("BOOKING_HORIZON_MONTHS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.horizon_months),
                fallback: get("AVAILABILITY_FALLBACK")
                    .and_then(|v| AvailabilityFallback::parse(&v))
                    .unwrap_or(defaults.fallback),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.form.horizon_months, 3);
        assert_eq!(config.form.hours, BusinessHours::default());
        assert_eq!(config.form.fallback, AvailabilityFallback::AssumeAvailable);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("BOOKING_API_URL", "https://shop.example/api"),
            ("BOOKING_API_TIMEOUT_SECS", "5"),
            ("BUSINESS_OPEN", "10:00"),
            ("BUSINESS_CLOSE", "14:00"),
            ("SLOT_MINUTES", "60"),
            ("BOOKING_HORIZON_MONTHS", "1"),
            ("AVAILABILITY_FALLBACK", "propagate"),
        ]);
        assert_eq!(config.api_base_url, "https://shop.example/api");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.form.hours.open_minute(), 600);
        assert_eq!(config.form.hours.close_minute(), 840);
        assert_eq!(config.form.hours.slot_minutes, 60);
        assert_eq!(config.form.horizon_months, 1);
        assert_eq!(config.form.fallback, AvailabilityFallback::Propagate);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("BOOKING_API_TIMEOUT_SECS", "soon"),
            ("BUSINESS_OPEN", "20:00"),
            ("AVAILABILITY_FALLBACK", "maybe"),
        ]);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.form.hours, BusinessHours::default());
        assert_eq!(config.form.fallback, AvailabilityFallback::AssumeAvailable);
    }
}
