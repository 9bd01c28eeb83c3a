//! Model infrastructure module
//!
//! Provides document intelligence clients behind a common contract, resolved
//! through a static provider mapping.
//!
//! # Structure
//! - `types` - Options, configuration and error types
//! - `traits` - DocClient trait
//! - `transport` - HTTP seam (JSON and server-sent events)
//! - `mapping` - Static provider table
//! - `factory` - Resolves a provider identifier to a client
//! - `stream` - Streamed response helpers
//! - `clients` - Individual client implementations

pub mod clients;
pub mod factory;
pub mod mapping;
pub mod stream;
pub mod traits;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use factory::{DocClientFactory, create_doc_client, list_models, supported_providers};
pub use stream::{AIResponseStream, collect_response};
pub use traits::DocClient;
pub use types::{ClientOptions, DocError, ErrorKind, GenerationConfig, RequestOptions};
