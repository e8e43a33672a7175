//! Atrium Store - Record store adapter contract and reference backend
//!
//! Everything the engine knows about persistence goes through the
//! [`RecordStore`] trait: generic CRUD, additive schema alteration,
//! and the two metadata procedures (physical column listing,
//! descriptor regeneration). Transport, SQL, and the real backing
//! store live behind this seam and are out of scope here.
//!
//! The crate also carries:
//!
//! - **InMemoryStore**: a backend honest enough for development and
//!   tests — it keeps a physical-schema map per object type, so
//!   `alter_schema` and column-snapshot population rules are real.
//! - **Audit widening**: the explicit two-phase "ensure columns, then
//!   write" operation. Best-effort and idempotent; a failed widening
//!   is logged, never fatal.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod audit;
pub mod error;
pub mod filter;
pub mod memory;
pub mod traits;

// Re-exports
pub use audit::{apply_audit_stamps, ensure_audit_columns, AUDIT_COLUMNS};
pub use error::{StoreError, StoreResult};
pub use filter::{Filter, OrderBy};
pub use memory::InMemoryStore;
pub use traits::{ColumnDef, RecordStore};
