use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("{series} series is empty")]
    EmptyInput { series: &'static str },

    #[error("index has {index} entries but flags have {flags}")]
    LengthMismatch { index: usize, flags: usize },

    #[error("{series} series has a duplicate index key")]
    DuplicateIndex { series: &'static str },

    #[error("{extra} detection timestamps are not present in the label timeline")]
    AlignmentMismatch { extra: usize },

    #[error(
        "confusion counts do not add up (tp={tp}, fn={fn_}, fp={fp}, total={total}); event matching is inconsistent"
    )]
    CountConservation {
        tp: usize,
        fn_: usize,
        fp: usize,
        total: usize,
    },

    #[error("{metric} is undefined: its denominator is zero")]
    DegenerateMetric { metric: &'static str },

    #[error("invalid alignment policy: {0}")]
    InvalidPolicy(String),
}

pub type Result<T> = std::result::Result<T, EvalError>;
