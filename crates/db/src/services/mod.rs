//! Operations composed from repository calls. These return
//! [`BookingResult`](regragui_core::errors::BookingResult) so the HTTP layer
//! can map each failure to a status code.

pub mod booking;
pub mod fields;
pub mod import;
pub mod schedule;
pub mod search;
pub mod slots;
pub mod stats;
