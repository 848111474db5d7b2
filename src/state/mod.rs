//! Reactive state owned by the identity core.
//!
//! SYSTEM CONTEXT
//! ==============
//! `query` is the generic async fetch cache; `session` is the central store
//! that owns the identity record and coordinates the lifecycle transitions.

pub mod query;
pub mod session;
