// Messages here are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("start time is malformed, use HH:MM (e.g. 14:00)")]
    InvalidStartTime,
    #[error("end time is malformed, use HH:MM (e.g. 21:00)")]
    InvalidEndTime,
    #[error("style must be 0 (bar) or 1 (dots)")]
    InvalidStyle,
    #[error("wrong arguments\nusage:\n{0}")]
    Usage(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("percentage is not a finite number: {0}")]
    InvalidPercentage(f64),
    #[error("renderer failed: {0}")]
    Backend(String),
}
