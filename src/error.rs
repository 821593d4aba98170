use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Cell ({row}, {col}) is outside of the {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Invalid number \"{input}\": {reason}")]
    InvalidDigitInput { input: String, reason: &'static str },

    #[error("Grid size is locked while a number is displayed")]
    ResizeLocked,

    #[error("Invalid rule string \"{0}\"")]
    InvalidRule(String),
}
