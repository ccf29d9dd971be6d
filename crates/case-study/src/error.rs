use case_common::error::CommonError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("config error: {0}")]
    Config(String),

    #[error("seed file {path}: {message}")]
    Seed { path: String, message: String },

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),
}
