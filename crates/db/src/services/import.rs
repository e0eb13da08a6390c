use chrono::{DateTime, Utc};
use regragui_core::errors::BookingResult;
use regragui_core::import::{ImportKind, ImportRecord, ImportReport, parse_record, records};
use serde_json::Value;
use tracing::{info, warn};

use crate::repositories::{slot, weekly_slots};
use crate::services::fields;
use crate::store::DocumentStore;

/// Imports every record of `data`, a JSON array of `kind` records.
///
/// Records that fail validation or cannot be written are reported in
/// `errors` and do not stop the batch.
pub async fn import_records(
    store: &dyn DocumentStore,
    kind: ImportKind,
    data: &Value,
    now: DateTime<Utc>,
) -> BookingResult<ImportReport> {
    let mut report = ImportReport::default();

    for (index, value) in records(kind, data)?.iter().enumerate() {
        let outcome = match parse_record(kind, value, now) {
            Ok(record) => write_record(store, record, now)
                .await
                .map_err(|err| format!("Record {}: could not be stored: {}", index + 1, err)),
            Err(message) => Err(message),
        };

        match outcome {
            Ok(()) => report.success += 1,
            Err(message) => {
                warn!("Rejected {} record {}: {}", kind, index + 1, message);
                report.errors.push(message);
            }
        }
    }

    info!(
        "Imported {} {} records, {} rejected",
        report.success,
        kind,
        report.errors.len()
    );
    Ok(report)
}

async fn write_record(store: &dyn DocumentStore, record: ImportRecord, now: DateTime<Utc>) -> BookingResult<()> {
    match record {
        // Through the service so a reimport keeps the field's creation date.
        ImportRecord::Field(record) => {
            fields::save_field(store, record, now).await?;
        }
        ImportRecord::Slot(record) => {
            slot::insert_slot(store, &record).await?;
        }
        ImportRecord::WeeklySlots(record) => {
            weekly_slots::put_weekly_slots(store, &record).await?;
        }
    }
    Ok(())
}
