//! Core types and trait definitions for the Veriface enrollment service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod descriptor;
pub mod enroll;
pub mod error;
pub mod identity;
pub mod matcher;
pub mod store;
pub mod verify;

pub use descriptor::{DESCRIPTOR_LEN, Descriptor};
pub use matcher::Verdict;
pub use error::{Error, Result};
