//! Shared functionality
//!
//! This crate supplies the character stream with line/column tracking and the error types
//! that are used by the other validator crates.
pub mod char_stream;
pub mod errors;
pub mod types;
