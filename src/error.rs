use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("{0} not found in environment variables.")]
    MissingCredential(&'static str),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Response error: {message}")]
    Response { message: String },

    #[error("Plan generation failed: {message}")]
    Generation { message: String },
}

impl PlannerError {
    pub fn response(message: impl Into<String>) -> Self {
        PlannerError::Response {
            message: message.into(),
        }
    }

    pub fn generation(message: impl Into<String>) -> Self {
        PlannerError::Generation {
            message: message.into(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PlannerError::MissingCredential(_) | PlannerError::Config { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
