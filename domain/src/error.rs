//! Error types for the `domain` layer.
use meeting_auth::error::{Error as MeetingAuthError, ErrorKind as MeetingAuthErrorKind};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. The intent is to translate errors between layers while maintaining
/// layer boundaries. Ex. `domain` is dependent on `meeting-auth`, and the binary is dependent
/// on `domain`, but callers should not need to match on `meeting-auth` error kinds directly.
///
/// Only failures that happen before a request is sent are reported as `Error`.
/// HTTP-level failures are folded into [`crate::zoom::ApiResponse::Failure`].
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
    Validation(ValidationErrorKind),
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    /// The credentials could not produce a signed access token.
    Signing,
    /// No credentials were available to build a client.
    Credentials,
    /// A payload could not be encoded as JSON.
    Serialization,
}

/// Enum representing the various kinds of external errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    /// The HTTP layer failed before a request could be sent.
    Http,
}

/// Enum representing rejected operation input.
#[derive(Debug, PartialEq)]
pub enum ValidationErrorKind {
    /// A required identifier (user, meeting, webinar, host) was empty.
    MissingIdentifier(&'static str),
    /// A date or date-time field could not be parsed.
    InvalidDate(String),
    /// The input mapping could not be converted to the typed request.
    InvalidInput,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl Error {
    pub(crate) fn validation(kind: ValidationErrorKind) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Validation(kind),
        }
    }

    /// Operation input given as a loose mapping did not fit the typed request.
    pub(crate) fn invalid_input(err: serde_json::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Validation(ValidationErrorKind::InvalidInput),
        }
    }

    /// True when the error was raised because the credentials could not sign a token.
    pub fn is_signing(&self) -> bool {
        self.error_kind == DomainErrorKind::Internal(InternalErrorKind::Signing)
    }

    /// True when the operation input was rejected before any request was built.
    pub fn is_validation(&self) -> bool {
        matches!(self.error_kind, DomainErrorKind::Validation(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Serialization),
        }
    }
}

impl From<MeetingAuthError> for Error {
    fn from(err: MeetingAuthError) -> Self {
        let error_kind = match &err.error_kind {
            MeetingAuthErrorKind::Signing(_) => DomainErrorKind::Internal(InternalErrorKind::Signing),
            MeetingAuthErrorKind::Credential(_) => {
                DomainErrorKind::Internal(InternalErrorKind::Credentials)
            }
            MeetingAuthErrorKind::Http(_) => DomainErrorKind::External(ExternalErrorKind::Http),
        };
        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}
