use anyhow::Error as AnyhowError;
use base64::DecodeError as Base64DecodeError;
use serde_json::Error as JsonError;
use std::string::FromUtf8Error;
use std::{env::VarError, io::Error as IoError, num::ParseIntError};
use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;
use url::ParseError as UrlError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] IoError),

    #[error("{0}")]
    Url(#[from] UrlError),

    #[error("{0}")]
    Int(#[from] ParseIntError),

    #[error("{0}")]
    Var(#[from] VarError),

    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("{0}")]
    Json(#[from] JsonError),

    #[error("{0}")]
    Base64Decode(#[from] Base64DecodeError),

    #[error("{0}")]
    FromUtf8(#[from] FromUtf8Error),

    #[error("Tracing error: {0}")]
    SetGlobalDefault(#[from] SetGlobalDefaultError),

    #[error("{0}")]
    AnyHow(#[from] AnyhowError),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Server end with error: {0}")]
    ServerError(String),

    #[error("Task message error: {0}")]
    TaskError(String),

    #[error("Invalid option: {option}")]
    InvalidOption { option: String },

    #[error("Push messaging is not supported in this environment")]
    PushUnsupported,

    #[error("No empty messages allowed")]
    EmptyPayload,
}
