//! Durable snapshot persistence for the Liveboard score ledger.
//!
//! The store writes the full ledger as one JSON document and reads it
//! back at startup. Durability rules:
//!
//! - A missing or corrupt document is "no prior state", never a startup
//!   failure.
//! - Writes go to a temporary file in the target directory and are
//!   renamed into place, so a crash mid-write leaves the previous
//!   snapshot intact.
//! - A failed write leaves the in-memory ledger authoritative; the next
//!   flush retries the full document.
//!
//! # Modules
//!
//! - [`store`] -- The [`SnapshotStore`] itself.
//! - [`flush`] -- The [`FlushPolicy`] deciding when the apply loop flushes.

pub mod flush;
pub mod store;

// Re-export primary types at crate root.
pub use flush::FlushPolicy;
pub use store::{SnapshotStore, StoreError};
