//! Outbound adapters.

mod reqwest_client;

pub use reqwest_client::{MAX_REDIRECTS, ReqwestHttpClient};
