use resto_common::error::CommonError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("config error: {0}")]
    Config(String),

    #[error("restaurant data unavailable: {0}")]
    DataUnavailable(String),
}

impl AppError {
    /// The underlying cause, without this error's own prefix.
    pub fn cause(&self) -> String {
        match self {
            AppError::DataUnavailable(cause) | AppError::Config(cause) => cause.clone(),
            AppError::Common(e) => e.to_string(),
        }
    }
}
