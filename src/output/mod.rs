// src/output/mod.rs
//! Export delivery with planning separated from execution.
//!
//! Building an [`OutputPlan`] is pure; [`deliver`] performs the I/O.

mod paths;
mod types;
mod viewer;
mod writer;

pub use paths::{export_filename, export_path, print_preview_path, sanitize_filename};
pub use types::{CompletedOperation, DeliveryTarget, FailedOperation, OutputPlan, OutputReport};
pub use viewer::open_in_viewer;
pub use writer::deliver;
