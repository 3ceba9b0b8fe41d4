//! Presentation Helpers
//!
//! Pure formatting used by the table: date display, row colors and select options.

use chrono::NaiveDate;

use crate::models::{Field, Status};

/// Placeholder entry shown first in every select
pub const PLACEHOLDER: &str = "Auswählen";

pub const EQUIPMENT_TYPES: &[&str] = &[
    "USV", "BSV", "GR", "Bat", "PS", "PP", "PS2", "CSS", "Sibelon", "Merlin", "Sonstiges",
    "24V", "48V", "60V", "Priorit", "OP",
];

pub const VENDORS: &[&str] = &[
    "Freimann", "Bonecke", "Steuernagel", "Theis", "Sonstige", "Jörger", "Schnell", "ODS",
    "Landmann", "Beck", "Mayer", "Socomec", "Wabnitz", "Rutz", "JeWo", "Limbach", "Appel",
    "Schuster", "GFS", "Vertiv",
];

pub const REQUESTERS: &[&str] = &["Fetzer", "Baus", "Ehnert"];

pub const STATUSES: &[&str] = &["angefragt", "Absage", "angebot erhalten", "Erinnerung"];

/// Render a `YYYY-MM-DD` date as `DD.MM.YYYY`.
///
/// Timestamps with a time part are cut to their date. Values that do not parse are
/// shown as they are.
pub fn format_date(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    let date_part = value.split('T').next().unwrap_or(value);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d.%m.%Y").to_string(),
        Err(_) => value.to_string(),
    }
}

/// Background and text color of a status row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowColors {
    pub background: &'static str,
    pub foreground: &'static str,
}

impl RowColors {
    /// Inline style attribute value
    pub fn style(&self) -> String {
        format!("background-color: {}; color: {};", self.background, self.foreground)
    }
}

/// Colors for a status value, `None` keeps the default table styling
pub fn row_colors(status: &str) -> Option<RowColors> {
    let colors = match Status::parse(status)? {
        Status::Requested => RowColors { background: "#ffc107", foreground: "#000" },
        Status::OfferReceived => RowColors { background: "#28a745", foreground: "#fff" },
        Status::Declined => RowColors { background: "#dc3545", foreground: "#fff" },
        Status::Reminder => RowColors { background: "#007bff", foreground: "#fff" },
    };
    Some(colors)
}

/// Style attribute for a row, empty when the status has no colors
pub fn row_style(status: &str) -> String {
    row_colors(status).map(|c| c.style()).unwrap_or_default()
}

/// One `<option>` of a select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Sorted options with the blank placeholder first
pub fn select_options(values: &[&str]) -> Vec<SelectOption> {
    let mut sorted: Vec<&str> = values.to_vec();
    sorted.sort_unstable();
    std::iter::once(SelectOption { value: String::new(), label: PLACEHOLDER.to_string() })
        .chain(sorted.into_iter().map(|v| SelectOption { value: v.to_string(), label: v.to_string() }))
        .collect()
}

/// Option domain of a field, `None` for free-text and date fields
pub fn field_domain(field: Field) -> Option<&'static [&'static str]> {
    match field {
        Field::EquipmentType => Some(EQUIPMENT_TYPES),
        Field::RequestedFrom => Some(VENDORS),
        Field::RequestedBy => Some(REQUESTERS),
        Field::Status => Some(STATUSES),
        Field::Date | Field::ProjectNumber | Field::ProjectName | Field::DueBy => None,
    }
}

/// Date fields render as native date pickers
pub fn is_date_field(field: Field) -> bool {
    matches!(field, Field::Date | Field::DueBy)
}
