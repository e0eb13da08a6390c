
use pretty_assertions::assert_eq;
use regragui_core::errors::BookingError;
use regragui_core::models::field::FieldType;
use regragui_core::models::search::SearchFilters;
use regragui_db::mock::MockStore;
use regragui_db::repositories::field;
use regragui_db::services::search::{list_centres, list_field_types, search_available_fields};
use regragui_db::store::Document;
use serde_json::json;
use test_utils::*;

fn filters(centre: Option<&str>, date: &str) -> SearchFilters {
    SearchFilters::from_params(centre, None, Some(date), now().date_naive()).unwrap()
}

#[tokio::test]
async fn test_search_returns_all_slots_of_the_day() {
    let store = seeded_store().await;

    let results = search_available_fields(&store, &filters(None, "2025-05-10")).await.unwrap();

    assert_eq!(results.len(), 1);
    let slots: Vec<(&str, bool)> = results[0]
        .time_slots
        .iter()
        .map(|slot| (slot.id.as_str(), slot.available))
        .collect();
    assert_eq!(
        slots,
        vec![
            ("f1_2025-05-10_16:00", false),
            ("f1_2025-05-10_18:00", true),
            ("f1_2025-05-10_20:00", true),
        ]
    );
}

#[tokio::test]
async fn test_search_without_matching_field_is_empty() {
    let store = seeded_store().await;

    assert!(search_available_fields(&store, &filters(Some("rabat"), "2025-05-10")).await.unwrap().is_empty());
    // Tuesday has no slots
    assert!(search_available_fields(&store, &filters(None, "2025-05-06")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_store_failure_aborts_search() {
    let mut store = MockStore::new();
    store.expect_list().returning(|_| {
        Ok(vec![Document {
            id: "f1".to_string(),
            data: json!({ "name": "Terrain Atlas", "type": "foot5", "centre": "errachidia", "image": "/a.jpg" }),
        }])
    });
    store
        .expect_find_eq()
        .withf(|collection, member, _| collection == "weeklySlots" && member == "week")
        .times(1)
        .returning(|_, _, _| Err(eyre::eyre!("connection refused")));

    let result = search_available_fields(&store, &filters(None, "2025-05-10")).await;

    match result {
        Err(BookingError::Database(report)) => {
            assert!(report.to_string().starts_with("search failed"), "{report}");
            assert!(format!("{report:?}").contains("connection refused"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_field_document_fails_search() {
    let mut store = MockStore::new();
    store
        .expect_list()
        .returning(|_| Ok(vec![Document { id: "f1".to_string(), data: json!({ "name": 3 }) }]));

    let result = search_available_fields(&store, &filters(None, "2025-05-10")).await;
    assert!(matches!(result, Err(BookingError::Database(_))));
}

#[tokio::test]
async fn test_distinct_centres_and_types() {
    let store = seeded_store().await;
    let mut anfa = atlas();
    anfa.id = "f2".to_string();
    anfa.centre = "casablanca-centre".to_string();
    anfa.field_type = FieldType::Foot11;
    field::save_field(&store, &anfa).await.unwrap();
    let mut ziz = atlas();
    ziz.id = "f3".to_string();
    field::save_field(&store, &ziz).await.unwrap();

    assert_eq!(list_centres(&store).await.unwrap(), vec!["casablanca-centre", "errachidia"]);
    assert_eq!(list_field_types(&store).await.unwrap(), vec![FieldType::Foot5, FieldType::Foot11]);
}
