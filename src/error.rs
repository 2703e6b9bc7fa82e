use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("max_match_distance must be a positive finite number, got {0}")]
    InvalidMatchDistance(f32),
    #[error("max_disappeared must be at least 1, got {0}")]
    InvalidMaxDisappeared(u32),
    #[error("history_len must be at least 2, got {0}")]
    InvalidHistoryLen(usize),
    #[error("{name} must be a non-negative finite number, got {value}")]
    InvalidDetectionLimit { name: &'static str, value: f32 },
    #[error("counting line is degenerate: {0}")]
    DegenerateLine(String),
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
