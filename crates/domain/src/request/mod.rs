//! HTTP request definitions

mod body;
mod kv;
mod method;
mod spec;

pub use body::{is_json, minify_json, prettify_json};
pub use kv::{KeyValue, KeyValuePairs};
pub use method::HttpMethod;
pub use spec::Request;
