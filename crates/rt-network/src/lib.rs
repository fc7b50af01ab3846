//! `rt-network`: rail network, loading, and shortest-path routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`network`] | `NetworkGraph` (CSR + R-tree), `NetworkBuilder`            |
//! | [`loader`]  | `load_network_csv`, `load_network_reader`                  |
//! | [`router`]  | `Router` trait, `ShortestPath`, `UniformCostRouter`        |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod loader;
pub mod network;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use loader::{load_network_csv, load_network_reader};
pub use network::{NetworkBuilder, NetworkGraph};
pub use router::{Router, ShortestPath, UniformCostRouter};
