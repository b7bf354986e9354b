use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown formula type: {0}")]
    UnknownFormulaType(String),
    #[error("unknown benchmark status: {0}")]
    UnknownBenchmarkStatus(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
