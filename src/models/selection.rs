use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::CustomerDetails;

/// Everything the customer has picked or typed so far. Empty strings mean "not set".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FormState {
    pub date: Option<NaiveDate>,
    pub time: String,
    pub service: String,
    pub stylist: String,
    pub customer: CustomerDetails,
}

impl FormState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
