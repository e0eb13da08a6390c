pub mod field;
pub mod reservation;
pub mod schedule;
pub mod search;
pub mod session;
pub mod slot;
pub mod stats;

/// Store collection names, shared by every crate that reads or writes them.
pub mod collections {
    pub const FIELDS: &str = "fields";
    pub const SLOTS: &str = "slots";
    pub const WEEKLY_SLOTS: &str = "weeklySlots";
    pub const RESERVATIONS: &str = "reservations";
}
