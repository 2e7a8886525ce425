use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("version has invalid format, should be major.minor.patch")]
    InvalidVersion,
}

/// Raised when a document does not have the shape an extractor expects.
///
/// An empty result is never used to paper over a missing container, so an
/// upstream markup change shows up here instead of as an empty list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("element {0} not found")]
    MissingElement(&'static str),
    #[error("element {element} has no {attribute} attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
}
