use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};
use crate::models::field::Field;
use crate::models::slot::SlotTime;

/// Filter value meaning "no filter" on the booking page.
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub centre: Option<String>,
    /// Compared verbatim with the field's type; an unknown type matches nothing.
    pub field_type: Option<String>,
    pub date: NaiveDate,
}

impl SearchFilters {
    /// Builds filters from raw query parameters. Empty values and `all`
    /// disable a filter; a missing date defaults to `today`.
    pub fn from_params(
        centre: Option<&str>,
        field_type: Option<&str>,
        date: Option<&str>,
        today: NaiveDate,
    ) -> BookingResult<Self> {
        let centre = active_filter(centre).map(str::to_string);
        let field_type = active_filter(field_type).map(str::to_string);
        let date = match active_filter(date) {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                BookingError::Validation(format!("Invalid date \"{}\", expected YYYY-MM-DD", raw))
            })?,
            None => today,
        };

        Ok(Self {
            centre,
            field_type,
            date,
        })
    }

    pub fn matches(&self, field: &Field) -> bool {
        self.centre.as_deref().is_none_or(|centre| field.centre == centre)
            && self
                .field_type
                .as_deref()
                .is_none_or(|field_type| field.field_type.as_str() == field_type)
    }
}

fn active_filter(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty() && *v != ALL)
}

/// One date instance of a recurring weekly slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotView {
    /// `{fieldId}_{date}_{time}`, addressing this date instance.
    pub id: String,
    pub field_id: String,
    pub time: SlotTime,
    pub available: bool,
    pub price: u32,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub field: Field,
    pub time_slots: Vec<TimeSlotView>,
}
