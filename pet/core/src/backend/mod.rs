//! Pet Service Integration
//!
//! Abstracted access to the pet service through a common trait, so the
//! dialog can be driven by the HTTP client in production and by scripted
//! backends in tests.
//!
//! # Usage
//!
//! ```ignore
//! use pet_core::backend::{HttpPetBackend, PetBackend};
//!
//! let backend = HttpPetBackend::from_config(&config)?;
//! let response = backend.get_own_pet().await?;
//! ```

mod http;
mod traits;

pub use http::HttpPetBackend;
pub use traits::{ApiResponse, PetBackend, RemoteOutcome};
