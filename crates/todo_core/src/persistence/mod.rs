//! Durable slot synchronization for the task collection.

pub mod bridge;
