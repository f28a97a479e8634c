use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSlot {
    pub time: String,
    pub available: bool,
}

/// A (time, stylist) pair already taken on some date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookedSlot {
    pub time: String,
    pub stylist: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    #[serde(default)]
    pub booked_slots: Vec<BookedSlot>,
}
