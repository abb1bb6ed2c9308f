//! YAML serialization for the on-disk format.
//!
//! Records and catalogs are meant to be read and edited by hand:
//! - One request per file, fields in declaration order
//! - Params and headers as ordered `key`/`value` sequences
//! - Catalogs as a plain sequence of ids

mod yaml;

pub use yaml::*;
