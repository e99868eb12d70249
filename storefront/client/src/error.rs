use thiserror::Error;

pub const GENERIC_FAILURE: &str = "Something went wrong";

#[derive(Error, Debug)]
pub enum Error {
    /// Network failure, non-JSON body or a payload that does not decode.
    #[error("Something went wrong")]
    Transport(String),

    /// The backend answered with `success: false` (or no `success` at all).
    /// `message` is empty when the backend gave no reason.
    #[error("{}", backend_text(.message))]
    Backend { message: String },

    #[error("Response carried no data")]
    MissingData,

    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn backend(message: Option<String>) -> Self {
        Error::Backend {
            message: message
                .map(|m| m.trim().to_string())
                .unwrap_or_default(),
        }
    }

    /// Text suitable for showing to the person driving the storefront.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Backend { message } if !message.is_empty() => message.clone(),
            Error::Validation(message) => message.clone(),
            Error::Transport(_) => GENERIC_FAILURE.to_string(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Transport(format!("malformed payload: {e}"))
    }
}

fn backend_text(message: &str) -> &str {
    if message.is_empty() {
        "Request failed"
    } else {
        message
    }
}

pub type Result<T> = std::result::Result<T, Error>;
