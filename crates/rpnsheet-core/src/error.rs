//! Error types for rpnsheet core.

use thiserror::Error;

use rpnsheet_engine::engine::EngineError;

/// Errors that can occur while loading, solving or writing a sheet
#[derive(Error, Debug)]
pub enum RpnsheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl RpnsheetError {
    /// True when the sheet parsed but could not be fully resolved.
    pub fn is_unresolved(&self) -> bool {
        matches!(
            self,
            RpnsheetError::Engine(
                EngineError::CircularDependency { .. } | EngineError::UnresolvableReference { .. }
            )
        )
    }
}

pub type Result<T> = std::result::Result<T, RpnsheetError>;
