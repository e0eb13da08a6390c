pub mod admin;
pub mod fields;
pub mod health;
pub mod reservations;
pub mod search;
pub mod session;
