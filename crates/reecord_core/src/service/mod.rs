//! Core use-case services.
//!
//! # Responsibility
//! - Validate caller input and orchestrate repository calls.
//! - Keep front-ends decoupled from storage details.

pub mod note_service;
pub mod user_service;
