//! Agora Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits for the file system, the HTTP transport and the stores
//! - The execute-request use case and the execution context built on it
//! - Use case orchestration over the request repository

pub mod execute_request;
pub mod execution_context;
pub mod ports;
pub mod use_cases;

pub use execute_request::{ExecuteRequest, ExecuteResult, ExecutionError};
pub use execution_context::{ChangeToken, ExecutionContext};
pub use ports::{
    CollectionError, CollectionRepository, CollectionRequest, FileSystem, FileSystemError,
    HttpClient, HttpClientError, HttpFuture, RequestRepository,
};
pub use use_cases::DuplicateRequest;
