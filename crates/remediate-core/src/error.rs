//! Errors raised while validating remediation inputs.

use thiserror::Error;

/// Invalid resource descriptor, parameters or request envelope.
#[derive(Debug, Error)]
pub enum InputError {
    /// The resource descriptor has no usable `Id`.
    #[error("resource descriptor is missing a non-empty 'Id'")]
    MissingResourceId,

    /// The resource descriptor is not shaped as expected.
    #[error("invalid resource descriptor: {0}")]
    InvalidResource(String),

    /// A required parameter was not supplied.
    #[error("missing required parameter '{0}'")]
    MissingParameter(String),

    /// A string-encoded boolean was neither `true` nor `false`.
    #[error("parameter '{name}' must be \"true\" or \"false\", got {value:?}")]
    InvalidBoolean { name: String, value: String },

    /// The request or invocation JSON could not be parsed.
    #[error("invalid request: {0}")]
    InvalidRequest(#[source] serde_json::Error),
}
