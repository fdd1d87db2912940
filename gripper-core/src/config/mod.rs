//! Configuration types
//!
//! Board-agnostic configuration embedded into the firmware image as
//! postcard binary data.

pub mod types;

pub use types::*;
