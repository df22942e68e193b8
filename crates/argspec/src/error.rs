use thiserror::Error;

/// A mistake in the declarations themselves.
///
/// These are programming errors and are reported at registration time,
/// before any argv is looked at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("options require a short name and a full name (got short: {short:?}, full: {full:?})")]
    MissingOptionName { short: String, full: String },
}

/// A problem with the tokens handed to [`Spec::parse`](crate::Spec::parse).
///
/// These are collected into [`Matches::errors`](crate::Matches::errors) in
/// the order they are found; the `Display` text is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    #[error("Missing parameter: {0}")]
    MissingParameter(String),
    #[error("Missing value for option: {0}")]
    MissingValue(String),
    #[error("Unrecognized option: {0}")]
    UnrecognizedOption(String),
    #[error("Unexpected parameter: {0}")]
    UnexpectedParameter(String),
}
