//! Use-case services over the key-value store.
//!
//! # Responsibility
//! - Orchestrate store reads/writes into page-level save/restore flows.
//! - Keep page glue decoupled from storage details.

pub mod form_state;
