use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("Request rejected: {0}")]
    Rejected(String),
    #[error("Malformed response: {0}")]
    Decode(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Form has {0} invalid field(s)")]
    InvalidForm(usize),
    #[error("Invalid time slot: {0}")]
    InvalidTimeSlot(String),
    #[error("No date selected")]
    NoDateSelected,
    #[error("No time slot selected")]
    SlotNotSelected,
    #[error("A submission is already in progress")]
    SubmissionInFlight,
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Decode(e.to_string())
    }
}

impl AppError {
    /// Text suitable for a user-facing notification. Transport and decoding
    /// details are left to the logs of whoever observed the failure.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Transport(_) => "Could not reach the server. Please try again.".to_string(),
            AppError::Server { status, .. } if *status >= 500 => {
                "The server had a problem. Please try again later.".to_string()
            }
            AppError::Server { .. } => "The request was not accepted. Please check your input.".to_string(),
            AppError::Rejected(msg) | AppError::Validation(msg) => msg.clone(),
            AppError::Decode(_) => "Received an unexpected response from the server.".to_string(),
            AppError::InvalidForm(_) => "Please correct the highlighted fields.".to_string(),
            AppError::InvalidTimeSlot(_) => self.to_string(),
            AppError::NoDateSelected => "Please select a date first.".to_string(),
            AppError::SlotNotSelected => "Please select a time slot first.".to_string(),
            AppError::SubmissionInFlight => "Your booking is already being submitted.".to_string(),
            AppError::Config(_) => "The application is misconfigured.".to_string(),
        }
    }
}
