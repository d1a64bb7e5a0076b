//! Core domain types and utilities for the Learnly administration console.
//!
//! This crate provides the foundational opaque identifier types and the
//! error-handling `Result` alias shared by the access-control and session
//! crates.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ActorId, AuthToken};
