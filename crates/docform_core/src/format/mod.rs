//! Pure formatting helpers used by document rendering.
//!
//! # Responsibility
//! - Render integers as plain digit strings and as English words.
//! - Derive the dotted document number and long display date from a date.
//!
//! # Invariants
//! - Every function here is side-effect free apart from diagnostic logging.

pub mod date;
pub mod number;
pub mod words;
