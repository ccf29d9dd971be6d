/// Error types shared by the case-study crates.
///
/// These represent failures in the two external services the pipeline talks to:
/// the Redis document store and the generative-language API. Application-specific
/// errors wrap `CommonError` via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("document store unreachable: {0}")]
    Connection(String),

    #[error("document store command failed: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("record encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("generative api error: {0}")]
    Genai(#[from] crate::genai::GenaiClientError),
}

impl CommonError {
    /// Classify a Redis error: transport-level failures become `Connection`,
    /// everything else stays a command failure.
    pub fn from_redis(err: redis::RedisError) -> Self {
        if err.is_io_error()
            || err.is_connection_refusal()
            || err.is_connection_dropped()
            || err.is_timeout()
        {
            CommonError::Connection(err.to_string())
        } else {
            CommonError::Redis(err)
        }
    }
}
