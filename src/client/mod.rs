//! Client-side pieces for talking to the table extraction service.
//!
//! Request types and error decoding are always available; the blocking
//! [`TableExtractor`] requires the `client` feature.

#[cfg(feature = "client")]
mod extractor;
mod request;
mod validation;

#[cfg(feature = "client")]
pub use extractor::TableExtractor;
pub use request::{BaseRequest, PdfRequest, MAX_CONFIDENCE};
pub use validation::{
    describe_server_error, describe_validation_error, HttpValidationError, ValidationIssue,
};
