// Error Boundary Module
// Errors for the document loading and ingestion paths. The derivation
// pipeline itself is total and has no error type.

/// Errors raised while obtaining or decoding the benchmark export.
///
/// The presentation layer reduces these to a single opaque message string;
/// no partial output is produced when loading fails.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("failed to read document: {0}")]
    Io(String),
    #[error("failed to fetch document: {0}")]
    Fetch(String),
    #[error("failed to decode document: {0}")]
    Decode(String),
}
