use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::slot::SlotTime;
use crate::week::{DayKey, WeekKey};

/// Business hours shown on the admin grid when no slot covers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleHours {
    pub open_hour: u32,
    /// Last hour that starts a slot (inclusive).
    pub close_hour: u32,
    pub step_minutes: u32,
}

impl Default for ScheduleHours {
    fn default() -> Self {
        Self {
            open_hour: 8,
            close_hour: 22,
            step_minutes: 60,
        }
    }
}

impl ScheduleHours {
    pub fn times(&self) -> Vec<SlotTime> {
        let step = self.step_minutes.max(1);
        let last = self.close_hour.min(23) * 60;
        (self.open_hour * 60..=last)
            .step_by(step as usize)
            .filter_map(|minutes| SlotTime::from_hm(minutes / 60, minutes % 60))
            .collect()
    }
}

/// State of one (day, time) cell of the admin grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum CellState {
    Available {
        price: u32,
    },
    #[serde(rename_all = "camelCase")]
    Unavailable {
        price: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reservation_id: Option<String>,
    },
    /// No slot has been authored for this hour.
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub day: DayKey,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub time: SlotTime,
    /// One cell per day, Monday first.
    pub cells: Vec<CellState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSchedule {
    pub field_id: String,
    pub week: WeekKey,
    pub previous_week: WeekKey,
    pub next_week: WeekKey,
    pub days: Vec<ScheduleDay>,
    pub rows: Vec<ScheduleRow>,
}

impl WeekSchedule {
    pub fn cell(&self, day: DayKey, time: SlotTime) -> Option<&CellState> {
        self.rows
            .iter()
            .find(|row| row.time == time)
            .and_then(|row| row.cells.get(day.index()))
    }
}

/// Addresses one slot of one weekly document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRef {
    pub field_id: String,
    pub week: WeekKey,
    pub day: DayKey,
    pub time: SlotTime,
}

/// Creates or edits a slot from the admin grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutSlotRequest {
    #[serde(flatten)]
    pub slot: SlotRef,
    pub price: u32,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAvailabilityRequest {
    #[serde(flatten)]
    pub slot: SlotRef,
    pub available: bool,
}
