//! UI Components
//!
//! Leptos components of the request table.

mod anfragen_table;
mod record_row;
mod draft_row;
mod draft_field;
mod option_select;
mod error_banner;

pub use anfragen_table::AnfragenTable;
pub use record_row::RecordRow;
pub use draft_row::DraftRow;
pub use draft_field::DraftField;
pub use option_select::OptionSelect;
pub use error_banner::ErrorBanner;
