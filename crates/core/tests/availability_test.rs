use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;

use regragui_core::availability::{filter_fields, resolve};
use regragui_core::models::field::Field;
use regragui_core::models::search::SearchFilters;
use regragui_core::models::slot::WeeklySlots;

fn field(id: &str, name: &str, field_type: &str, centre: &str) -> Field {
    serde_json::from_value(json!({
        "id": id, "name": name, "type": field_type, "centre": centre, "image": "/img.jpg"
    }))
    .unwrap()
}

fn weekly(field_id: &str, week: &str, samedi: serde_json::Value) -> WeeklySlots {
    serde_json::from_value(json!({
        "fieldId": field_id,
        "week": week,
        "slots": {
            "lundi": [{ "time": "10:00", "available": true, "price": 150 }],
            "mardi": [], "mercredi": [], "jeudi": [], "vendredi": [],
            "samedi": samedi,
            "dimanche": []
        }
    }))
    .unwrap()
}

fn filters(centre: Option<&str>, field_type: Option<&str>) -> SearchFilters {
    SearchFilters::from_params(centre, field_type, Some("2025-05-10"), NaiveDate::from_ymd_opt(2025, 5, 1).unwrap())
        .unwrap()
}

fn fields() -> Vec<Field> {
    vec![
        field("f1", "Terrain Atlas", "foot5", "errachidia"),
        field("f2", "Terrain Ziz", "foot7", "errachidia"),
        field("f3", "Stade Anfa", "foot11", "casablanca-centre"),
    ]
}

#[test]
fn test_resolves_saturday_slots_with_synthesized_ids() {
    let docs = vec![weekly(
        "f1",
        "2025-W19",
        json!([
            { "time": "20:00", "available": true, "price": 250 },
            { "time": "18:00", "available": false, "price": 200, "reservationId": "r1" }
        ]),
    )];

    let results = resolve(fields(), &docs, &filters(Some("errachidia"), Some("foot5")));

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.field.id, "f1");

    let ids: Vec<&str> = result.time_slots.iter().map(|slot| slot.id.as_str()).collect();
    assert_eq!(ids, vec!["f1_2025-05-10_18:00", "f1_2025-05-10_20:00"]);
    assert!(!result.time_slots[0].available);
    assert!(result.time_slots[1].available);
    assert_eq!(result.time_slots[1].price, 250);
    assert!(result.time_slots.iter().all(|slot| slot.field_id == "f1"));
}

#[test]
fn test_omits_fields_without_document_or_slots() {
    let docs = vec![
        weekly("f1", "2025-W19", json!([])),
        weekly("f3", "2025-W19", json!([{ "time": "09:00", "available": true, "price": 400 }])),
    ];

    // f1 has an empty Saturday, f2 has no document at all
    let results = resolve(fields(), &docs, &filters(None, None));

    let ids: Vec<&str> = results.iter().map(|r| r.field.id.as_str()).collect();
    assert_eq!(ids, vec!["f3"]);
}

#[test]
fn test_results_sorted_by_field_name() {
    let slot = json!([{ "time": "09:00", "available": true, "price": 200 }]);
    let docs = vec![
        weekly("f2", "2025-W19", slot.clone()),
        weekly("f3", "2025-W19", slot.clone()),
        weekly("f1", "2025-W19", slot),
    ];

    let names: Vec<String> = resolve(fields(), &docs, &filters(None, None))
        .into_iter()
        .map(|r| r.field.name)
        .collect();
    assert_eq!(names, vec!["Stade Anfa", "Terrain Atlas", "Terrain Ziz"]);
}

#[test]
fn test_filter_fields() {
    assert_eq!(filter_fields(fields(), &filters(Some("errachidia"), None)).len(), 2);
    assert_eq!(filter_fields(fields(), &filters(None, Some("foot11"))).len(), 1);
    assert!(filter_fields(fields(), &filters(Some("rabat"), None)).is_empty());
}

#[test]
fn test_booked_slots_are_returned_with_their_flag() {
    let doc: WeeklySlots = serde_json::from_value(json!({
        "fieldId": "f1",
        "week": "2025-W19",
        "slots": {
            "lundi": [
                { "time": "08:00", "available": true, "price": 200 },
                { "time": "10:00", "available": false, "price": 200 }
            ],
            "mardi": [], "mercredi": [], "jeudi": [], "vendredi": [], "samedi": [], "dimanche": []
        }
    }))
    .unwrap();
    let monday = SearchFilters::from_params(None, None, Some("2025-05-05"), NaiveDate::from_ymd_opt(2025, 5, 1).unwrap())
        .unwrap();

    let results = resolve(fields(), &[doc], &monday);

    let slots: Vec<(String, bool)> = results[0]
        .time_slots
        .iter()
        .map(|slot| (slot.time.to_string(), slot.available))
        .collect();
    assert_eq!(slots, vec![("08:00".to_string(), true), ("10:00".to_string(), false)]);

    let bookable: Vec<_> = results[0].time_slots.iter().filter(|slot| slot.available).collect();
    assert_eq!(bookable.len(), 1);
}
