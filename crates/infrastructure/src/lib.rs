//! Agora Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: the YAML file store and the
//! reqwest transport.

pub mod adapters;
pub mod persistence;
pub mod serialization;

pub use adapters::ReqwestHttpClient;
pub use persistence::{
    CollectionDirectory, ConfigError, ConfigRepository, RequestCatalog, RequestStore,
    TokioFileSystem,
};
pub use serialization::{SerializationError, from_yaml_bytes, to_yaml_bytes};
