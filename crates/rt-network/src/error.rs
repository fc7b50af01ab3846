//! Network-subsystem error type.

use thiserror::Error;

use rt_core::CityId;

/// Errors produced by `rt-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("city {0} not found in network")]
    UnknownNode(CityId),

    #[error("no city named {0:?}")]
    UnknownCity(String),

    #[error("no direct link from {from} to {to}")]
    NoEdge { from: CityId, to: CityId },

    #[error("no path from {from} to {to}")]
    PathNotFound { from: CityId, to: CityId },

    #[error("city {0:?} added twice")]
    DuplicateCity(String),

    #[error("link {from:?} -> {to:?} points at a city that was never added")]
    DanglingEdge { from: String, to: String },

    #[error("link {from:?} -> {to:?} has zero distance")]
    ZeroWeight { from: String, to: String },

    #[error("network parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
