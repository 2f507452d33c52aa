//! Data models shared by the library, CLI and WASM bindings.

pub mod config;
pub mod row;

pub use config::{ExtractionConfig, InvtabConfig, OutputConfig, OutputFormat};
pub use row::{InvoiceRow, RawColumns};
