//! IO module for format-specific reading and writing operations.
//!
//! - `csv` - survey result tables, one response per row

pub(crate) mod csv;
