use thiserror::Error;

/// Errors raised while reading a connector event.
///
/// Lookups are lazy: a malformed payload is only reported when the offending
/// field is accessed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectorError {
    #[error("key {0} not found in connector event")]
    KeyNotFound(&'static str),
    #[error("unknown connector event type: {0}")]
    UnknownEventType(String),
    #[error("unknown status code: {0}")]
    UnknownStatusCode(String),
    #[error("key {key} does not hold {expected}")]
    InvalidType {
        key: &'static str,
        expected: &'static str,
    },
}
