//! # Meta Core
//! 
//! Menu resolution and action validation for the metadata platform:
//! domain entities, services, and the ports they consume.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod ports;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
