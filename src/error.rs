use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Widths must lie in `1..=MAX_WIDTH`.
    #[error("invalid universe width {0}, expected 1..={max}", max = crate::MAX_WIDTH)]
    InvalidWidth(u32),

    #[error("value {value} is outside the {width}-bit universe")]
    OutOfRange { value: u64, width: u32 },

    #[error("value {0} is not a member of the set")]
    NotFound(u64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
