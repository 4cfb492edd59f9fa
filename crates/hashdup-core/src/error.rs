/// Errors raised by the record store and the duplicate table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("Record width must be at least one byte")]
    ZeroWidth,

    #[error("Buffer of {len} bytes is not a multiple of the record width {width}")]
    SizeMismatch { len: usize, width: usize },

    #[error("Record index {index} is out of range (store holds {len} records)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Record of {actual} bytes does not match the table width {expected}")]
    WidthMismatch { expected: usize, actual: usize },

    #[error("Memory error: cannot allocate {bytes} bytes for {what}")]
    Allocation { what: &'static str, bytes: usize },
}

pub type Result<T, E = RecordError> = std::result::Result<T, E>;
