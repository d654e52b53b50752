//! Configuration types
//!
//! Board-agnostic configuration stored as postcard binary data.

pub mod timing;

pub use timing::*;
