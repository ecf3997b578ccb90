//! Result export
//!
//! The pipeline's caller owns presentation; this module only knows how to
//! serialize the final record list to CSV.

mod csv_export;

pub use csv_export::{export_csv, write_csv};
