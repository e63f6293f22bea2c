//! Domain model for persisted form state.
//!
//! # Responsibility
//! - Define the snapshot shape written to the key-value store.
//! - Name the fixed store keys and the well-known form field ids.
//! - Hold per-page session state explicitly instead of in globals.
//!
//! # Invariants
//! - Store key strings are bit-exact with data written by earlier releases.

pub mod keys;
pub mod session;
pub mod snapshot;
