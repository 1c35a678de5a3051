//! Cell-related types
//!
//! This module contains:
//! - [`CellValue`] - The tagged value stored in a cell
//! - [`Temporal`] - Wall-clock date-time values, with an invalid sentinel

mod temporal;
mod value;

pub use temporal::Temporal;
pub use value::{format_number, CellValue};
