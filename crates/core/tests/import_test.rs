use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use regragui_core::errors::BookingError;
use regragui_core::import::{ImportKind, ImportRecord, parse_field, parse_flat_slot, parse_record, parse_weekly_slots, records};
use regragui_core::models::field::FieldType;
use regragui_core::week::DayKey;

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap()
}

fn week_days(except: &[&str]) -> serde_json::Value {
    let mut days = serde_json::Map::new();
    for day in DayKey::ALL {
        if !except.contains(&day.as_str()) {
            days.insert(day.to_string(), json!([]));
        }
    }
    serde_json::Value::Object(days)
}

#[rstest]
#[case("fields", ImportKind::Fields)]
#[case("slots", ImportKind::Slots)]
#[case("weekly-slots", ImportKind::WeeklySlots)]
fn test_import_kind_names(#[case] raw: &str, #[case] kind: ImportKind) {
    assert_eq!(raw.parse::<ImportKind>().unwrap(), kind);
    assert_eq!(kind.to_string(), raw);
}

#[test]
fn test_non_array_input_is_rejected() {
    let err = records(ImportKind::Fields, &json!({ "name": "x" })).unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));
    assert_eq!(records(ImportKind::Fields, &json!([1, 2])).unwrap().len(), 2);
}

#[test]
fn test_weekly_slots_missing_days_are_named() {
    let record = json!({ "fieldId": "f1", "week": "2025-W19", "slots": week_days(&["mardi", "dimanche"]) });

    let err = parse_weekly_slots(&record, now()).unwrap_err();
    assert_eq!(err, "Missing days for f1_2025-W19: mardi, dimanche");
}

#[test]
fn test_weekly_slots_parse() {
    let mut slots = week_days(&[]);
    slots["samedi"] = json!([
        { "time": "20:00", "available": true, "price": 250 },
        { "time": "18:00", "available": false, "price": 200.0 }
    ]);
    let record = json!({ "fieldId": 7, "week": "2025-W19", "slots": slots });

    let doc = parse_weekly_slots(&record, now()).unwrap();
    assert_eq!(doc.id, "7_2025-W19");
    assert_eq!(doc.field_id, "7");
    let times: Vec<String> = doc.slots.samedi.iter().map(|s| s.time.to_string()).collect();
    assert_eq!(times, vec!["18:00", "20:00"]);
    assert_eq!(doc.slots.samedi[0].price, 200);
    assert_eq!(doc.created_at, Some(now()));
}

#[rstest]
#[case(json!({ "week": "2025-W19", "slots": {} }), "missing fieldId")]
#[case(json!({ "fieldId": "f1", "week": "2025-19", "slots": {} }), "Invalid week format")]
#[case(json!({ "fieldId": "f1", "week": "2025-W53", "slots": {} }), "does not exist")]
#[case(json!({ "fieldId": "f1", "week": "2025-W19", "slots": [] }), "slots must be an object")]
fn test_weekly_slots_rejections(#[case] record: serde_json::Value, #[case] fragment: &str) {
    let err = parse_weekly_slots(&record, now()).unwrap_err();
    assert!(err.contains(fragment), "{err}");
}

#[test]
fn test_weekly_slots_rejects_unknown_day_and_bad_entries() {
    let mut slots = week_days(&[]);
    slots["sunday"] = json!([]);
    let err = parse_weekly_slots(&json!({ "fieldId": "f1", "week": "2025-W19", "slots": slots }), now()).unwrap_err();
    assert!(err.starts_with("Unknown day \"sunday\""), "{err}");

    let mut slots = week_days(&[]);
    slots["lundi"] = json!([{ "time": "18:00", "available": "yes", "price": 200 }]);
    let err = parse_weekly_slots(&json!({ "fieldId": "f1", "week": "2025-W19", "slots": slots }), now()).unwrap_err();
    assert!(err.starts_with("Invalid slot on lundi for f1_2025-W19"), "{err}");
}

#[test]
fn test_field_record() {
    let field = parse_field(
        &json!({ "name": "Terrain Atlas", "type": "foot7", "centre": "errachidia", "image": "/a.jpg", "rating": 4.5 }),
        now(),
    )
    .unwrap();
    assert_eq!(field.id, "");
    assert_eq!(field.field_type, FieldType::Foot7);
    assert_eq!(field.rating, Some(4.5));

    let err = parse_field(&json!({ "name": "Terrain Atlas", "type": "foot7" }), now()).unwrap_err();
    assert_eq!(err, "Field \"Terrain Atlas\": missing required members: centre, image");

    let err = parse_field(
        &json!({ "name": "X", "type": "futsal", "centre": "c", "image": "i" }),
        now(),
    )
    .unwrap_err();
    assert!(err.contains("Unknown field type"), "{err}");
}

#[test]
fn test_flat_slot_defaults() {
    let slot = parse_flat_slot(&json!({ "fieldId": "f1", "time": "18:00" }), now()).unwrap();
    assert!(slot.available);
    assert_eq!(slot.price, 200);
    assert_eq!(slot.date, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());

    assert!(parse_flat_slot(&json!({ "time": "18:00" }), now()).is_err());
    assert!(parse_flat_slot(&json!({ "fieldId": "f1", "time": "6pm" }), now()).is_err());
}

#[test]
fn test_parse_record_dispatches_on_kind() {
    let record = parse_record(ImportKind::Slots, &json!({ "fieldId": "f1", "time": "18:00" }), now()).unwrap();
    assert!(matches!(record, ImportRecord::Slot(_)));
}
