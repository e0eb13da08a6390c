//! # Bulk import validation
//!
//! Admin JSON files are parsed once, here, into typed records. A record that
//! does not parse is reported with a message naming the record and the
//! problem; it never reaches the store. Persistence of the accepted records
//! lives in `regragui-db::services::import`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{BookingError, BookingResult};
use crate::models::field::{Field, FieldType};
use crate::models::slot::{DEFAULT_SLOT_PRICE, DaySlots, FlatSlot, Slot, SlotTime, WeeklySlots};
use crate::week::{DayKey, WeekKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    Fields,
    Slots,
    WeeklySlots,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Fields => "fields",
            ImportKind::Slots => "slots",
            ImportKind::WeeklySlots => "weekly-slots",
        }
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportKind {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fields" => Ok(ImportKind::Fields),
            "slots" => Ok(ImportKind::Slots),
            "weekly-slots" => Ok(ImportKind::WeeklySlots),
            other => Err(BookingError::Validation(format!(
                "Unknown import kind \"{}\" (expected fields, slots or weekly-slots)",
                other
            ))),
        }
    }
}

/// Outcome of one import batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub success: usize,
    pub errors: Vec<String>,
}

/// A validated record, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportRecord {
    /// A field; an empty id asks the store to generate one.
    Field(Field),
    Slot(FlatSlot),
    WeeklySlots(WeeklySlots),
}

/// The records of an import file, which must be a JSON array.
pub fn records(kind: ImportKind, data: &Value) -> BookingResult<&[Value]> {
    data.as_array().map(Vec::as_slice).ok_or_else(|| {
        BookingError::Validation(format!("The {} import file must contain a JSON array", kind))
    })
}

pub fn parse_record(kind: ImportKind, value: &Value, now: DateTime<Utc>) -> Result<ImportRecord, String> {
    match kind {
        ImportKind::Fields => parse_field(value, now).map(ImportRecord::Field),
        ImportKind::Slots => parse_flat_slot(value, now).map(ImportRecord::Slot),
        ImportKind::WeeklySlots => parse_weekly_slots(value, now).map(ImportRecord::WeeklySlots),
    }
}

pub fn parse_field(value: &Value, now: DateTime<Utc>) -> Result<Field, String> {
    let object = value.as_object().ok_or("Field record must be a JSON object")?;
    let name = non_empty_str(object, "name");
    let label = name.clone().unwrap_or_else(|| "unnamed".to_string());

    let field_type = non_empty_str(object, "type");
    let centre = non_empty_str(object, "centre");
    let image = non_empty_str(object, "image");

    let missing: Vec<&str> = [
        ("name", name.is_none()),
        ("type", field_type.is_none()),
        ("centre", centre.is_none()),
        ("image", image.is_none()),
    ]
    .into_iter()
    .filter_map(|(key, absent)| absent.then_some(key))
    .collect();
    if !missing.is_empty() {
        return Err(format!("Field \"{}\": missing required members: {}", label, missing.join(", ")));
    }

    let field_type: FieldType = field_type
        .unwrap_or_default()
        .parse()
        .map_err(|e: BookingError| format!("Field \"{}\": {}", label, e))?;

    let rating = match object.get("rating") {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            value
                .as_f64()
                .ok_or_else(|| format!("Field \"{}\": rating must be a number", label))? as f32,
        ),
    };

    let features = match object.get("features") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| format!("Field \"{}\": features must be an array of strings", label))?,
        Some(_) => return Err(format!("Field \"{}\": features must be an array of strings", label)),
    };

    let max_players = match object.get("maxPlayers") {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            whole_number(value).ok_or_else(|| format!("Field \"{}\": maxPlayers must be a whole number", label))?,
        ),
    };

    Ok(Field {
        id: object.get("id").and_then(id_like).unwrap_or_default(),
        name: name.unwrap_or_default(),
        field_type,
        centre: centre.unwrap_or_default(),
        image: image.unwrap_or_default(),
        rating,
        features,
        max_players,
        created_at: Some(now),
        updated_at: Some(now),
    })
}

pub fn parse_flat_slot(value: &Value, now: DateTime<Utc>) -> Result<FlatSlot, String> {
    let object = value.as_object().ok_or("Slot record must be a JSON object")?;

    let (Some(field_id), Some(raw_time)) = (object.get("fieldId").and_then(id_like), non_empty_str(object, "time"))
    else {
        return Err("Slot record is missing fieldId or time".to_string());
    };

    let time: SlotTime = raw_time
        .parse()
        .map_err(|e: BookingError| format!("Slot {} for field {}: {}", raw_time, field_id, e))?;

    let available = match object.get("available") {
        None | Some(Value::Null) => true,
        Some(Value::Bool(available)) => *available,
        Some(_) => return Err(format!("Slot {} for field {}: available must be a boolean", time, field_id)),
    };

    let price = match object.get("price") {
        None | Some(Value::Null) => DEFAULT_SLOT_PRICE,
        Some(value) => whole_number(value)
            .ok_or_else(|| format!("Slot {} for field {}: price must be a whole number", time, field_id))?,
    };

    let date = match non_empty_str(object, "date") {
        None => now.date_naive(),
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| format!("Slot {} for field {}: invalid date \"{}\"", time, field_id, raw))?,
    };

    Ok(FlatSlot {
        id: String::new(),
        field_id,
        time,
        available,
        price,
        date,
        created_at: Some(now),
        updated_at: Some(now),
    })
}

pub fn parse_weekly_slots(value: &Value, now: DateTime<Utc>) -> Result<WeeklySlots, String> {
    let object = value.as_object().ok_or("Weekly slots record must be a JSON object")?;

    let field_id = object.get("fieldId").and_then(id_like);
    let raw_week = non_empty_str(object, "week");
    let slots = object.get("slots");
    let (Some(field_id), Some(raw_week), Some(slots)) = (field_id, raw_week, slots) else {
        return Err("Weekly slots record is missing fieldId, week or slots".to_string());
    };

    let week: WeekKey = raw_week.parse().map_err(|e: BookingError| match e {
        BookingError::Validation(message) => message,
        other => other.to_string(),
    })?;
    let doc_id = WeeklySlots::document_id(&field_id, week);

    let days = slots
        .as_object()
        .ok_or_else(|| format!("slots must be an object keyed by day for {}", doc_id))?;

    let missing: Vec<&str> = DayKey::ALL
        .iter()
        .map(DayKey::as_str)
        .filter(|day| !days.contains_key(*day))
        .collect();
    if !missing.is_empty() {
        return Err(format!("Missing days for {}: {}", doc_id, missing.join(", ")));
    }

    if let Some(unknown) = days.keys().find(|key| key.parse::<DayKey>().is_err()) {
        return Err(format!("Unknown day \"{}\" for {}", unknown, doc_id));
    }

    let mut parsed = DaySlots::default();
    for day in DayKey::ALL {
        let entries = days[day.as_str()]
            .as_array()
            .ok_or_else(|| format!("Slots for {} must be an array for {}", day, doc_id))?;

        let target = parsed.day_mut(day);
        for entry in entries {
            target.push(parse_weekly_slot(entry).ok_or_else(|| {
                format!(
                    "Invalid slot on {} for {}: expected time (HH:MM), available (boolean) and price (number)",
                    day, doc_id
                )
            })?);
        }
        target.sort_by_key(|slot| slot.time);
    }

    Ok(WeeklySlots {
        id: doc_id,
        field_id,
        week,
        slots: parsed,
        created_at: Some(now),
        updated_at: Some(now),
    })
}

fn parse_weekly_slot(entry: &Value) -> Option<Slot> {
    let time = entry.get("time")?.as_str()?.parse().ok()?;
    let available = entry.get("available")?.as_bool()?;
    let price = whole_number(entry.get("price")?)?;
    Some(Slot {
        time,
        available,
        price,
        reservation_id: None,
    })
}

fn non_empty_str(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Identifiers may be written as strings or bare numbers in admin files.
fn id_like(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn whole_number(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64)
        .map(|f| f as u32)
}
