//! Error types for FormKit

use std::fmt;
use thiserror::Error;

/// Where an unsupported method value was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodOrigin {
    /// The `method` attribute of the form
    Form,
    /// The `formmethod` attribute of the clicked submit element
    SubmitElement,
}

impl fmt::Display for MethodOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodOrigin::Form => write!(f, "form method attribute"),
            MethodOrigin::SubmitElement => write!(f, "formmethod attribute of the submit element"),
        }
    }
}

/// Errors that can occur while building a request from a form
#[derive(Debug, Error)]
pub enum FormError {
    /// Form submission method that cannot be expressed as an HTTP request
    #[error("Unsupported form method {method:?} found in the {origin}")]
    UnsupportedMethod {
        method: String,
        origin: MethodOrigin,
    },

    /// Form encoding that is not implemented
    #[error("Unsupported form enctype {enctype:?}: only application/x-www-form-urlencoded and text/plain bodies can be built")]
    UnsupportedEncoding { enctype: String },

    /// Explicit click element cannot submit this form
    #[error("Invalid submit element: {0}")]
    InvalidSubmitChoice(String),

    /// A click was required but the form has nothing to click
    #[error("No submit element found in form: disable clicking or point to the element to click")]
    NoSubmitElement,

    /// Caller-supplied method override is not a supported HTTP method
    #[error("Invalid method override: {0:?}")]
    InvalidMethod(String),

    /// Caller-supplied enctype override is not a supported encoding
    #[error("Invalid enctype override: {0:?}")]
    InvalidEnctype(String),

    /// Form element has no document URL to resolve its action against
    #[error("Form has no base URL set")]
    MissingBaseUrl,

    /// Form action could not be resolved into an absolute URL
    #[error("Invalid form action {action:?}")]
    InvalidUrl {
        action: String,
        #[source]
        source: url::ParseError,
    },

    /// CSS selector could not be parsed
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// Request could not be converted into an `http::Request`
    #[error("Failed to build HTTP request")]
    InvalidRequest(#[source] http::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FormError::UnsupportedMethod {
                method: "DIALOG".to_string(),
                origin: MethodOrigin::Form,
            }
            .to_string(),
            "Unsupported form method \"DIALOG\" found in the form method attribute"
        );
        assert_eq!(
            FormError::UnsupportedMethod {
                method: "DIALOG".to_string(),
                origin: MethodOrigin::SubmitElement,
            }
            .to_string(),
            "Unsupported form method \"DIALOG\" found in the formmethod attribute of the submit element"
        );
        assert_eq!(
            FormError::MissingBaseUrl.to_string(),
            "Form has no base URL set"
        );
        assert_eq!(
            FormError::InvalidMethod("c".to_string()).to_string(),
            "Invalid method override: \"c\""
        );
        assert!(FormError::UnsupportedEncoding {
            enctype: "multipart/form-data".to_string()
        }
        .to_string()
        .contains("multipart/form-data"));
    }

    #[test]
    fn test_invalid_url_keeps_source() {
        use std::error::Error as _;

        let err = FormError::InvalidUrl {
            action: "http://[::1".to_string(),
            source: url::ParseError::InvalidIpv6Address,
        };
        assert!(err.source().is_some());
    }
}
