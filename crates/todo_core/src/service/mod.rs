//! Core use-case services.
//!
//! # Responsibility
//! - Combine the pure task store with durable slot synchronization.
//! - Keep presentation layers decoupled from storage details.

pub mod task_service;
