use thiserror::Error;

pub type Result<T, E = DecodeError> = core::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("report too short: field at offset {offset} needs {needed} bytes, got {len}")]
    ShortReport {
        offset: usize,
        needed: usize,
        len: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("offset {0} is not 16-bit aligned")]
    OddOffset(usize),
    #[error("offset {offset} does not fit a {report_len}-byte report")]
    OffsetOutOfRange { offset: usize, report_len: usize },
    #[error("profile has no temperature sensors")]
    NoTemperatureSensors,
}
