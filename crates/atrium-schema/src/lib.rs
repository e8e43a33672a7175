//! Atrium Schema - Field descriptor registry
//!
//! Loads and caches, per object type, the ordered list of field
//! descriptors describing how each column is treated. Descriptors are
//! authored out-of-band; this registry only reflects them, falls back
//! to humanized raw column names when none exist, and supports an
//! idempotent one-time resync bootstrap.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod error;
pub mod registry;

pub use error::{SchemaError, SchemaResult};
pub use registry::SchemaRegistry;
