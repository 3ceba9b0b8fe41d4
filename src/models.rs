//! Frontend Models
//!
//! Request records as stored in the document collection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Collection holding the manually tracked requests
pub const COLLECTION: &str = "manualEntries";

/// Opaque document identifier assigned by the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Editable fields of a request (document body, keys match the stored documents)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestFields {
    /// Request date, `YYYY-MM-DD`
    #[serde(rename = "datum")]
    pub date: String,
    #[serde(rename = "projektnummer")]
    pub project_number: String,
    #[serde(rename = "projektname")]
    pub project_name: String,
    #[serde(rename = "anlagentyp")]
    pub equipment_type: String,
    /// Vendor the request went to
    #[serde(rename = "angefragtBei")]
    pub requested_from: String,
    /// Colleague who sent the request
    #[serde(rename = "angefragtVon")]
    pub requested_by: String,
    /// Offer deadline, `YYYY-MM-DD`
    #[serde(rename = "abgabeBis")]
    pub due_by: String,
    pub status: String,
}

impl RequestFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Date => &self.date,
            Field::ProjectNumber => &self.project_number,
            Field::ProjectName => &self.project_name,
            Field::EquipmentType => &self.equipment_type,
            Field::RequestedFrom => &self.requested_from,
            Field::RequestedBy => &self.requested_by,
            Field::DueBy => &self.due_by,
            Field::Status => &self.status,
        }
    }

    /// Copy with a single field replaced
    pub fn with(&self, field: Field, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            Field::Date => next.date = value,
            Field::ProjectNumber => next.project_number = value,
            Field::ProjectName => next.project_name = value,
            Field::EquipmentType => next.equipment_type = value,
            Field::RequestedFrom => next.requested_from = value,
            Field::RequestedBy => next.requested_by = value,
            Field::DueBy => next.due_by = value,
            Field::Status => next.status = value,
        }
        next
    }
}

/// Field names of a request, in table column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Date,
    ProjectNumber,
    ProjectName,
    EquipmentType,
    RequestedFrom,
    RequestedBy,
    DueBy,
    Status,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Date,
        Field::ProjectNumber,
        Field::ProjectName,
        Field::EquipmentType,
        Field::RequestedFrom,
        Field::RequestedBy,
        Field::DueBy,
        Field::Status,
    ];

    /// Document key of the field
    pub fn key(&self) -> &'static str {
        match self {
            Field::Date => "datum",
            Field::ProjectNumber => "projektnummer",
            Field::ProjectName => "projektname",
            Field::EquipmentType => "anlagentyp",
            Field::RequestedFrom => "angefragtBei",
            Field::RequestedBy => "angefragtVon",
            Field::DueBy => "abgabeBis",
            Field::Status => "status",
        }
    }

    /// Column header
    pub fn label(&self) -> &'static str {
        match self {
            Field::Date => "Datum",
            Field::ProjectNumber => "Projektnummer",
            Field::ProjectName => "Projektname",
            Field::EquipmentType => "Anlagentyp",
            Field::RequestedFrom => "Angefragt bei",
            Field::RequestedBy => "Angefragt von",
            Field::DueBy => "Abgabe bis",
            Field::Status => "Status",
        }
    }
}

/// A persisted request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub fields: RequestFields,
}

impl Record {
    pub fn new(id: RecordId, fields: RequestFields) -> Self {
        Self { id, fields }
    }
}

/// Request status values with a display meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Requested,
    OfferReceived,
    Declined,
    Reminder,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Requested, Status::OfferReceived, Status::Declined, Status::Reminder];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Requested => "angefragt",
            Status::OfferReceived => "angebot erhalten",
            Status::Declined => "Absage",
            Status::Reminder => "Erinnerung",
        }
    }

    /// Exact match on the stored value; anything else has no meaning
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}
