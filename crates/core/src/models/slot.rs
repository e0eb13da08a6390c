use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::BookingError;
use crate::week::{DayKey, WeekKey};

/// Price applied to imported flat slots that do not carry one, in DH.
pub const DEFAULT_SLOT_PRICE: u32 = 200;

/// Start time of a slot, written `HH:MM` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotTime(NaiveTime);

impl SlotTime {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(SlotTime)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for SlotTime {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BookingError::Validation(format!("Invalid time \"{}\", expected HH:MM", s));
        if s.len() != 5 {
            return Err(invalid());
        }
        NaiveTime::parse_from_str(s, "%H:%M")
            .map(SlotTime)
            .map_err(|_| invalid())
    }
}

impl TryFrom<String> for SlotTime {
    type Error = BookingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotTime> for String {
    fn from(time: SlotTime) -> Self {
        time.to_string()
    }
}

/// One bookable time unit inside a weekly slots document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub time: SlotTime,
    pub available: bool,
    pub price: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<String>,
}

impl Slot {
    pub fn new(time: SlotTime, price: u32) -> Self {
        Self {
            time,
            available: true,
            price,
            reservation_id: None,
        }
    }

    /// Marks the slot as consumed by `reservation_id`.
    pub fn reserve(&mut self, reservation_id: &str) {
        self.available = false;
        self.reservation_id = Some(reservation_id.to_string());
    }

    /// Reopens the slot. Returns false when it was held by another reservation.
    pub fn release(&mut self, reservation_id: &str) -> bool {
        if self.reservation_id.as_deref() != Some(reservation_id) {
            return false;
        }
        self.available = true;
        self.reservation_id = None;
        true
    }
}

/// The seven day arrays of a weekly slots document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySlots {
    pub lundi: Vec<Slot>,
    pub mardi: Vec<Slot>,
    pub mercredi: Vec<Slot>,
    pub jeudi: Vec<Slot>,
    pub vendredi: Vec<Slot>,
    pub samedi: Vec<Slot>,
    pub dimanche: Vec<Slot>,
}

impl DaySlots {
    pub fn day(&self, day: DayKey) -> &[Slot] {
        match day {
            DayKey::Lundi => &self.lundi,
            DayKey::Mardi => &self.mardi,
            DayKey::Mercredi => &self.mercredi,
            DayKey::Jeudi => &self.jeudi,
            DayKey::Vendredi => &self.vendredi,
            DayKey::Samedi => &self.samedi,
            DayKey::Dimanche => &self.dimanche,
        }
    }

    pub fn day_mut(&mut self, day: DayKey) -> &mut Vec<Slot> {
        match day {
            DayKey::Lundi => &mut self.lundi,
            DayKey::Mardi => &mut self.mardi,
            DayKey::Mercredi => &mut self.mercredi,
            DayKey::Jeudi => &mut self.jeudi,
            DayKey::Vendredi => &mut self.vendredi,
            DayKey::Samedi => &mut self.samedi,
            DayKey::Dimanche => &mut self.dimanche,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (DayKey, &[Slot])> + '_ {
        DayKey::ALL.into_iter().map(move |day| (day, self.day(day)))
    }
}

/// Availability document for one field in one ISO week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySlots {
    #[serde(default)]
    pub id: String,
    pub field_id: String,
    pub week: WeekKey,
    pub slots: DaySlots,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl WeeklySlots {
    pub fn document_id(field_id: &str, week: WeekKey) -> String {
        format!("{}_{}", field_id, week)
    }

    /// A document with seven empty days.
    pub fn empty(field_id: &str, week: WeekKey, now: DateTime<Utc>) -> Self {
        Self {
            id: Self::document_id(field_id, week),
            field_id: field_id.to_string(),
            week,
            slots: DaySlots::default(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn find(&self, day: DayKey, time: SlotTime) -> Option<&Slot> {
        self.slots.day(day).iter().find(|slot| slot.time == time)
    }
}

/// Standalone slot record of the legacy `slots` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatSlot {
    #[serde(default)]
    pub id: String,
    pub field_id: String,
    pub time: SlotTime,
    pub available: bool,
    pub price: u32,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
