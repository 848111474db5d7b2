//! Wire boundary for the identity core's remote collaborators.
//!
//! SYSTEM CONTEXT
//! ==============
//! `types` defines the DTOs exchanged with the auth provider and the
//! configuration endpoint; `api` defines the transport contract the store
//! consumes for its two remote queries and the config fetch.

pub mod api;
pub mod types;
