use crate::controller::ControllerId;
use crate::layout::ComponentRole;
use thiserror::Error;

pub type XrResult<T> = Result<T, XrError>;

/// Errors raised while negotiating a session or resolving controller input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum XrError {
    #[error("WebXR is not available in this browser")]
    Unavailable,

    #[error("session mode {0} is not supported")]
    Unsupported(&'static str),

    #[error("controller has no {0} component")]
    ComponentMissing(ComponentRole),

    #[error("unknown controller {0}")]
    UnknownController(ControllerId),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },

    #[error("unknown session mode {0:?}")]
    UnknownMode(String),

    #[error("unknown reference space {0:?}")]
    UnknownSpace(String),
}
