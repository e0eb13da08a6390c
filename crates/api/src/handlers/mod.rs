pub mod admin;
pub mod fields;
pub mod reservations;
pub mod search;
pub mod session;
