//! Error types for the stem analysis engine

use std::fmt;

/// Errors that can occur during stem analysis
#[derive(Debug, Clone)]
pub enum AnalysisError {
    /// Invalid input parameters (empty waveform, zero sample rate, bad frame sizes)
    InvalidInput(String),

    /// Malformed or out-of-bounds time interval
    InvalidInterval(String),

    /// Audio decoding error
    DecodingError(String),

    /// Processing error during analysis
    ProcessingError(String),

    /// Numerical error (overflow, underflow, etc.)
    NumericalError(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::InvalidInterval(msg) => write!(f, "Invalid interval: {}", msg),
            AnalysisError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            AnalysisError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            AnalysisError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}
