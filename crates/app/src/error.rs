use applica_core::error::CoreError;

/// Why a view action could not complete.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// The purpose test was submitted with blank answers (0-based indexes).
    #[error("Please answer every question (missing: {0:?})")]
    Unanswered(Vec<usize>),

    /// A domain-level error from `applica_core`.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}
