use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GasError {
    #[error("target list must contain at least one sequence")]
    EmptyTargets,

    #[error("minimum score must not be negative: {value}")]
    NegativeScoreMin { value: i32 },

    #[error("match type must be one of 0-3: {value}")]
    InvalidMatchType { value: i64 },

    #[error("invalid sequence character '{ch}' at line {line}")]
    InvalidSeqChar { ch: char, line: usize },

    #[error("sequence io error: {0}")]
    SeqIo(#[from] io::Error),

    #[error("tsv output error: {0}")]
    TsvWrite(#[from] csv::Error),
}

pub type GasResult<T> = Result<T, GasError>;
