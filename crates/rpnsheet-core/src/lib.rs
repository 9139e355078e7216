//! rpnsheet-core - UI-agnostic document model + storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::Document;
pub use error::{Result, RpnsheetError};
pub use storage::{OutputOptions, OutputStyle};

pub use rpnsheet_engine::engine::{CellRef, Dimensions, Solution};
