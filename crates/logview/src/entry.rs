//! Log entries

/// One logged value, already converted to its display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Sequence number assigned by the owning view
    pub id: u64,
    /// Display text, captured when the value was logged
    pub message: String,
}

impl LogEntry {
    pub fn new(id: u64, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
        }
    }
}
