use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid {kind} scale: {reason}")]
    InvalidScale { kind: &'static str, reason: String },

    #[error("json contract error: {0}")]
    Json(#[from] serde_json::Error),
}
