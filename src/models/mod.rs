pub mod booking;
pub mod catalog;
pub mod customer;
pub mod hours;
pub mod selection;
pub mod slot;

pub use booking::{BookingConfirmation, BookingData, BookingRequest, BookingResponse};
pub use catalog::{Catalog, Service, Stylist, ANY_STYLIST};
pub use customer::{CustomerDetails, CustomerField};
pub use hours::BusinessHours;
pub use selection::FormState;
pub use slot::{AvailabilityResponse, BookedSlot, TimeSlot};
