//! Core data layer.
//!
//! This module provides:
//! - [`store`] - Resource cache, subscription bus, query façade and preferences
//! - [`error`] - Store, fetch and storage error types

pub mod error;
pub mod store;
