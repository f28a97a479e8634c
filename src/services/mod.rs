pub mod api;
pub mod slots;
pub mod submission;
