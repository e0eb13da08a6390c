//! Domain types and pure booking logic for the Regragui field booking service.
//!
//! Nothing in this crate touches the store: the availability join, the
//! weekly schedule grid and the import validation all work on values that
//! the `regragui-db` services load and persist.

pub mod availability;
pub mod errors;
pub mod import;
pub mod models;
pub mod projection;
pub mod week;
