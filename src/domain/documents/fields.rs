//! Structured field records for the two intake documents.
//!
//! Field names mirror the snake_case prediction payload of the Mindee custom
//! endpoints (`vampl/passport/v1` and `vampl/vehicle_id/v1`). Any attribute
//! may come back empty, meaning "not recognized" - consumers must omit such
//! attributes rather than render them blank.

use serde::{Deserialize, Serialize};

/// A single extracted attribute with its recognized text value.
///
/// An absent or empty value means the recognition service could not read the
/// attribute from the photo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    #[serde(default)]
    pub value: Option<String>,
}

impl FieldValue {
    /// Creates a field holding the given recognized text.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    /// Creates an unrecognized (empty) field.
    pub fn empty() -> Self {
        Self { value: None }
    }

    /// Returns the recognized text, or `None` if the field is empty or blank.
    pub fn text(&self) -> Option<&str> {
        self.value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Returns true if no usable text was recognized.
    pub fn is_empty(&self) -> bool {
        self.text().is_none()
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Fields extracted from a passport photo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassportFields {
    pub record_no: FieldValue,
    pub surname: FieldValue,
    pub name: FieldValue,
    pub patronymic: FieldValue,
    pub sex: FieldValue,
    pub date_of_birth: FieldValue,
    pub date_of_expiry: FieldValue,
    pub nationality: FieldValue,
}

impl PassportFields {
    /// Holder name assembled from the recognized name parts, skipping the
    /// unrecognized ones.
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.surname, &self.name, &self.patronymic]
            .iter()
            .filter_map(|f| f.text())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Fields extracted from a vehicle ID (registration certificate) photo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleFields {
    pub registration_number: FieldValue,
    pub date_of_first_registration: FieldValue,
    pub date_of_first_registration_in_ukraine: FieldValue,
    pub make: FieldValue,
    #[serde(rename = "type")]
    pub vehicle_type: FieldValue,
    pub commercial_description: FieldValue,
    pub color_of_vehicle: FieldValue,
}

impl VehicleFields {
    /// Make and model line, skipping unrecognized parts.
    pub fn description(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.make, &self.vehicle_type, &self.commercial_description]
            .iter()
            .filter_map(|f| f.text())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}
