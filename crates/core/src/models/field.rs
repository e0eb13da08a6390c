use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::BookingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Foot5,
    Foot7,
    Foot11,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Foot5 => "foot5",
            FieldType::Foot7 => "foot7",
            FieldType::Foot11 => "foot11",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldType::Foot5 => "Football à 5",
            FieldType::Foot7 => "Football à 7",
            FieldType::Foot11 => "Football à 11",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "foot5" => Ok(FieldType::Foot5),
            "foot7" => Ok(FieldType::Foot7),
            "foot11" => Ok(FieldType::Foot11),
            other => Err(BookingError::Validation(format!(
                "Unknown field type: \"{}\" (expected foot5, foot7 or foot11)",
                other
            ))),
        }
    }
}

/// A bookable pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub centre: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_players: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update applied by the admin field form. Absent members are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFieldRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<FieldType>,
    pub centre: Option<String>,
    pub image: Option<String>,
    pub rating: Option<f32>,
    pub features: Option<Vec<String>>,
    pub max_players: Option<u32>,
}

impl UpdateFieldRequest {
    pub fn apply(self, field: &mut Field) {
        if let Some(name) = self.name {
            field.name = name;
        }
        if let Some(field_type) = self.field_type {
            field.field_type = field_type;
        }
        if let Some(centre) = self.centre {
            field.centre = centre;
        }
        if let Some(image) = self.image {
            field.image = image;
        }
        if self.rating.is_some() {
            field.rating = self.rating;
        }
        if let Some(features) = self.features {
            field.features = features;
        }
        if self.max_players.is_some() {
            field.max_players = self.max_players;
        }
    }
}
