//! Service-layer error types.

use super::messages::render;
use super::validation::ValidationErrors;
use crate::dao::DaoError;
use crate::model::user::UserDto;
use crate::security::EncodeError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Operator-facing failure carrying a message key and its arguments.
///
/// `target` holds the transfer object that was rejected, when there is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message_key: &'static str,
    args: Vec<String>,
    target: Option<UserDto>,
}

impl ValidationError {
    pub fn new(message_key: &'static str, args: Vec<String>) -> Self {
        Self {
            message_key,
            args,
            target: None,
        }
    }

    pub fn with_target(mut self, target: UserDto) -> Self {
        self.target = Some(target);
        self
    }

    pub fn message_key(&self) -> &'static str {
        self.message_key
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn target(&self) -> Option<&UserDto> {
        self.target.as_ref()
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&render(self.message_key, &self.args))
    }
}

impl Error for ValidationError {}

/// Errors returned by service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Translated store failure (not found, duplicate entry).
    Validation(ValidationError),
    /// Field checks failed before anything was persisted.
    Rejected(ValidationErrors),
    /// Store failure with no service-level translation.
    Dao(DaoError),
    Encode(EncodeError),
}

impl ServiceError {
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Rejected(errors) => write!(f, "{errors}"),
            Self::Dao(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Rejected(_) => None,
            Self::Dao(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DaoError> for ServiceError {
    fn from(value: DaoError) -> Self {
        Self::Dao(value)
    }
}

impl From<EncodeError> for ServiceError {
    fn from(value: EncodeError) -> Self {
        Self::Encode(value)
    }
}
