use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::CustomerDetails;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRequest {
    pub date: NaiveDate,
    pub time: String,
    pub service: String,
    pub stylist: String,
    pub customer: CustomerDetails,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<BookingData>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingData {
    pub booking_id: String,
}

impl BookingResponse {
    /// The booking id when the backend accepted the booking.
    pub fn booking_id(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.data.as_ref().map(|d| d.booking_id.as_str())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookingConfirmation {
    pub booking_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub service_name: String,
    pub stylist_name: String,
    pub customer_name: String,
}

impl BookingConfirmation {
    pub fn summary(&self) -> String {
        format!(
            "Booking confirmed!\n\n\
             Booking ID: {}\n\
             Date: {}\n\
             Time: {}\n\
             Service: {}\n\
             Stylist: {}\n\
             Customer: {}\n\n\
             A confirmation message will be sent to your phone/email.",
            self.booking_id,
            self.date.format("%Y-%m-%d"),
            self.time,
            self.service_name,
            self.stylist_name,
            self.customer_name,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_iso_date() {
        let req = BookingRequest {
            date: NaiveDate::from_ymd_opt(2025, 6, 16).unwrap(),
            time: "10:00".to_string(),
            service: "haircut".to_string(),
            stylist: "any".to_string(),
            customer: CustomerDetails {
                name: "Alice".to_string(),
                phone: "+15551110000".to_string(),
                ..Default::default()
            },
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["date"], "2025-06-16");
        assert_eq!(value["customer"]["name"], "Alice");
        assert_eq!(value["customer"]["email"], "");
    }

    #[test]
    fn test_parse_success_response() {
        let json = r#"{"success":true,"data":{"bookingId":"BK-42"}}"#;
        let resp: BookingResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.booking_id(), Some("BK-42"));
    }

    #[test]
    fn test_unsuccessful_response_has_no_id() {
        let json = r#"{"success":false,"data":{"bookingId":"BK-42"},"message":"Slot taken"}"#;
        let resp: BookingResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.booking_id(), None);
        assert_eq!(resp.message.as_deref(), Some("Slot taken"));
    }

    #[test]
    fn test_summary() {
        let confirmation = BookingConfirmation {
            booking_id: "BK-42".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 16).unwrap(),
            time: "10:00".to_string(),
            service_name: "Haircut".to_string(),
            stylist_name: "John Smith - Senior Barber".to_string(),
            customer_name: "Alice".to_string(),
        };
        let text = confirmation.summary();
        assert!(text.contains("Booking ID: BK-42"));
        assert!(text.contains("Date: 2025-06-16"));
        assert!(text.contains("Time: 10:00"));
        assert!(text.contains("Service: Haircut"));
        assert!(text.contains("Stylist: John Smith - Senior Barber"));
        assert!(text.contains("Customer: Alice"));
    }
}
