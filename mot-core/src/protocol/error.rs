pub type DecodeResult<T> = core::result::Result<T, DecodeError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("MoT payload too short: expected at least {expected} bytes, received {actual}")]
    FrameTooShort { expected: usize, actual: usize },
}

/// A humidity correction factor that would turn every reading into NaN or
/// infinity.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("humidity correction must be a finite number, got {0}")]
pub struct InvalidCorrection(pub f64);
