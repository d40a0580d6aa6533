use thiserror::Error;

/// Errors produced while turning raw text into a vendor record.
#[derive(Debug, Error)]
pub enum Error {
    /// The document is not syntactically valid.
    #[error("failed to parse record: {0}")]
    Parse(String),
    /// The document parsed but contains no fields.
    #[error("empty record")]
    EmptyDocument,
    /// The same field name appears more than once at the top level.
    #[error("duplicate field(s): {}", .0.join(", "))]
    DuplicateFields(Vec<String>),
}

/// Convenience alias for results returned by vendorlint crates.
pub type Result<T> = std::result::Result<T, Error>;
