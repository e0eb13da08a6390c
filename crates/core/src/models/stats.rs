use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_fields: usize,
    pub total_slots: usize,
    pub available_slots: usize,
    pub total_weekly_slots: usize,
    pub available_weekly_slots: usize,
    pub reservations_by_status: BTreeMap<String, usize>,
}
