use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

/// Failures that stop the demonstration before the main loop starts.
///
/// Invalid answers to the console prompts are not errors; they re-prompt.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("input closed before the {0} prompt was answered")]
    InputClosed(&'static str),
}
