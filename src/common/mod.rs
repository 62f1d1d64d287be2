//! Common utilities and types shared across rendezkv

pub mod config;
pub mod error;
pub mod hash;

pub use config::IndexConfig;
pub use error::{Error, Result};
pub use hash::{decode_key, digest128, encode_key, key_path};
