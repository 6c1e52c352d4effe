//! Domain helpers with no I/O.
//!
//! Pure functions over dates and storage locators; everything here is safe
//! to call from any layer and never touches the network.

pub mod date;
pub mod locator;

pub use date::{format_date, format_date_for_input};
pub use locator::extract_storage_path;
