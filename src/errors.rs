use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchGateError {
    #[error("input error: {0}")]
    InputError(String),
    #[error("no benchmark results found in {0}")]
    NoBenchmarks(String),
    #[error("baseline error: {0}")]
    BaselineError(String),
    #[error("output error: {0}")]
    OutputError(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl BenchGateError {
    pub fn input<T: Into<String>>(msg: T) -> Self {
        BenchGateError::InputError(msg.into())
    }

    pub fn no_benchmarks<T: Into<String>>(source: T) -> Self {
        BenchGateError::NoBenchmarks(source.into())
    }

    pub fn baseline<T: Into<String>>(msg: T) -> Self {
        BenchGateError::BaselineError(msg.into())
    }

    pub fn output<T: Into<String>>(msg: T) -> Self {
        BenchGateError::OutputError(msg.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        BenchGateError::InvalidInput(msg.into())
    }

    /// Input-class failures stop the run before anything is written.
    pub fn is_fatal_input(&self) -> bool {
        matches!(
            self,
            BenchGateError::InputError(_) | BenchGateError::NoBenchmarks(_)
        )
    }
}
