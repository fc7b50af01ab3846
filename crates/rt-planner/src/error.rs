use rt_core::RtError;
use rt_network::NetworkError;
use thiserror::Error;

use crate::RegionKey;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("network has no cities")]
    EmptyNetwork,

    #[error("no city lies in region {opposite} opposite to {key}")]
    EmptyRegion { key: RegionKey, opposite: RegionKey },

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Config(#[from] RtError),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
