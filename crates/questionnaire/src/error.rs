use thiserror::Error;

/// Failures raised while building or running a questionnaire.
#[derive(Debug, Error)]
pub enum QuestionnaireError {
    #[error("invalid condition: {0}")]
    InvalidCondition(String),
    #[error("condition refers to '{key}' which has not been answered yet")]
    MissingAnswer { key: String },
    #[error("question '{key}' has no options")]
    EmptyOptions { key: String },
    #[error("picker failed: {0}")]
    Picker(#[from] PickerError),
}

/// Failures reported by a [`crate::Picker`] implementation.
#[derive(Debug, Error)]
pub enum PickerError {
    #[error("terminal i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("interrupted by user")]
    Interrupted,
    #[error("nothing to pick from")]
    NoOptions,
    #[error("script ran out of steps at prompt '{prompt}'")]
    ScriptExhausted { prompt: String },
    #[error("script chose '{option}' which is not offered (available: {available})")]
    UnknownOption { option: String, available: String },
}

/// Failures raised while loading a questionnaire definition file.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("failed to parse questionnaire spec: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("spec defines no questions")]
    Empty,
    #[error(transparent)]
    Questionnaire(#[from] QuestionnaireError),
}

pub type Result<T, E = QuestionnaireError> = std::result::Result<T, E>;
