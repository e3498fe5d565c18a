//! End-to-end tests for budget-sheets-xlsx.
//!
//! Each test writes a workbook with `XlsxWriter` into a temporary directory,
//! reads it back with `XlsxReader` and asserts on the loaded table.

mod common;
mod roundtrip;

pub use common::*;
