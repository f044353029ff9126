//! Core use-case services.
//!
//! # Responsibility
//! - Validate create/update input before it reaches repositories.
//! - Turn absent records into typed `NotFound` errors for id-targeted calls.
//! - Compose repositories through the relational resolver for nested reads.
//!
//! # Invariants
//! - Services never bypass repository persistence contracts.
//! - Services remain storage-agnostic; they only see repository traits.

pub mod animal_service;
pub mod category_service;
pub mod resolver;
pub mod species_service;
