//! # Quill Core
//!
//! The domain layer of the Quill blog backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, the error taxonomy, the ports infrastructure must implement, and
//! the auth/content services that enforce the access rules.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
