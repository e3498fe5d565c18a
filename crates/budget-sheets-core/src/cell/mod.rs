//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The raw value read from a source cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A rectangular range (e.g., "A1:C10")

mod address;
mod value;

pub use address::{CellAddress, CellRange};
pub use value::CellValue;
