//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::path::PathBuf;

use tracing::{error, warn};

use crate::path::PathError;

// gNMI client errors.
#[derive(Debug)]
pub enum Error {
    Runtime(std::io::Error),
    InvalidAddress(String, tonic::transport::Error),
    TlsCertificate(PathBuf, std::io::Error),
    Connect(tonic::transport::Error),
    InvalidCredentials,
    InvalidPath(String, PathError),
    Rpc(tonic::Status),
    UnsupportedValue(String),
    ValueEncode(serde_json::Error),
}

// ===== impl Error =====

impl Error {
    pub fn log(&self) {
        match self {
            Error::Runtime(error) => {
                error!(error = %with_source(error), "{}", self);
            }
            Error::InvalidAddress(address, error) => {
                error!(%address, error = %with_source(error), "{}", self);
            }
            Error::TlsCertificate(path, error) => {
                error!(
                    path = %path.display(),
                    error = %with_source(error),
                    "{}", self
                );
            }
            Error::Connect(error) => {
                error!(error = %with_source(error), "{}", self);
            }
            Error::InvalidCredentials => {
                error!("{}", self);
            }
            Error::InvalidPath(path, error) => {
                warn!(%path, %error, "{}", self);
            }
            Error::Rpc(status) => {
                error!(
                    code = ?status.code(),
                    message = %status.message(),
                    "{}", self
                );
            }
            Error::UnsupportedValue(path) => {
                warn!(%path, "{}", self);
            }
            Error::ValueEncode(error) => {
                warn!(%error, "{}", self);
            }
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Runtime(..) => {
                write!(f, "failed to create async runtime")
            }
            Error::InvalidAddress(address, ..) => {
                write!(f, "invalid target address '{}'", address)
            }
            Error::TlsCertificate(..) => {
                write!(f, "failed to read TLS CA certificate")
            }
            Error::Connect(..) => {
                write!(f, "failed to connect to gNMI target")
            }
            Error::InvalidCredentials => {
                write!(f, "credentials can't be encoded as gRPC metadata")
            }
            Error::InvalidPath(path, ..) => {
                write!(f, "invalid gNMI path '{}'", path)
            }
            Error::Rpc(..) => {
                write!(f, "gNMI RPC failed")
            }
            Error::UnsupportedValue(path) => {
                write!(f, "unsupported typed value at '{}'", path)
            }
            Error::ValueEncode(..) => {
                write!(f, "failed to encode value")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Runtime(error) => Some(error),
            Error::InvalidAddress(_, error) => Some(error),
            Error::TlsCertificate(_, error) => Some(error),
            Error::Connect(error) => Some(error),
            Error::InvalidPath(_, error) => Some(error),
            Error::Rpc(status) => Some(status),
            Error::ValueEncode(error) => Some(error),
            _ => None,
        }
    }
}

// ===== global functions =====

// Formats an error followed by its chain of sources.
pub fn with_source<E: std::error::Error + ?Sized>(error: &E) -> String {
    if let Some(source) = error.source() {
        format!("{} ({})", error, with_source(source))
    } else {
        error.to_string()
    }
}
