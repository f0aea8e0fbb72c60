use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarginError {
    #[error("margin needs 1 or 3 arguments; received {received}")]
    InvalidArity { received: usize },

    #[error("margin data must be either a linear system or a 3-sequence of mag, phase, omega: {0}")]
    Conversion(String),

    #[error("Shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Non-numeric value in {what} at index {index}")]
    NonNumeric { what: &'static str, index: usize },

    #[error("Invalid frequency grid: {0}")]
    InvalidFrequencyGrid(String),

    #[error("Can only do margins for SISO system (got {outputs} outputs, {inputs} inputs)")]
    NotSiso { outputs: usize, inputs: usize },

    #[error("Polynomial is identically zero: {0}")]
    EmptyPolynomial(&'static str),

    #[error("Frequency {omega} outside sampled range [{min}, {max}]")]
    FrequencyOutOfRange { omega: f64, min: f64, max: f64 },

    #[error("Root finding failed: {0}")]
    RootFinding(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MarginError>;
