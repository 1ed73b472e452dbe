use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid ticker format: {0}")]
    InvalidTicker(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    #[error("Financial data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Market data API error: {0}")]
    ApiError(String),
}
