//! UI components for the loan review console.
//!
//! Components are stateless renderers: the app passes them a `*ViewContext`
//! describing what to draw and receives a string back.

mod application_table;
mod popups;
mod text_truncate;
mod value_format;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use application_table::{
    ApplicationTableComponent, ApplicationTableViewContext, EMPTY_TABLE_MESSAGE, header_line,
};
pub use popups::{
    APPROVE_TITLE, PopupComponent, PopupViewContext, REVERT_TITLE, VIEW_TITLE, form_hints,
};
pub use value_format::{format_json_value, format_local_timestamp, humanise_field_name};
