//! Error taxonomy of the forecast pipeline.
//!
//! Client errors (`Validation`, `Auth`) carry the message that is sent back
//! verbatim. Everything else is a server failure whose detail is only logged.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// The mapped provider data does not fit the response contract.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("field `{field}` is not a finite integer-range number: {value}")]
    InvalidNumber { field: &'static str, value: f64 },

    #[error("field `{field}` must not be empty")]
    Empty { field: &'static str },

    #[error("forecast timestamp {0} is out of range")]
    InvalidTimestamp(i64),

    #[error("forecast entry at {0} has no weather conditions")]
    MissingCondition(i64),

    #[error("wind speed {0} is not a finite, non-negative number")]
    InvalidWindSpeed(f64),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        message: String,
        payload: Map<String, Value>,
    },

    #[error("{message}")]
    Auth { message: String },

    #[error("provider returned data that does not match the forecast schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("forecast provider request failed: {0:#}")]
    Provider(anyhow::Error),
}

/// JSON body sent for every non-2xx response.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorBody {
    pub message: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            payload: Map::new(),
        }
    }

    /// Attach an extra field to the response body of a validation error.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        if let Self::Validation { payload, .. } = &mut self {
            payload.insert(key.to_string(), value.into());
        }
        self
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::Auth { .. } => 403,
            Self::Schema(_) | Self::Provider(_) => 500,
        }
    }

    /// Errors the client caused and can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::Auth { .. })
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            Self::Validation { message, payload } => ErrorBody {
                message: message.clone(),
                payload: payload.clone(),
            },
            Self::Auth { message } => ErrorBody {
                message: message.clone(),
                payload: Map::new(),
            },
            Self::Schema(_) | Self::Provider(_) => ErrorBody {
                message: "internal server error".to_string(),
                payload: Map::new(),
            },
        }
    }
}
