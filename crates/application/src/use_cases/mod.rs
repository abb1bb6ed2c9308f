//! Application use cases (business logic orchestration).

mod duplicate_request;

pub use duplicate_request::DuplicateRequest;
