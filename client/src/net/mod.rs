//! Networking: the shared request pipeline and request-side wire types.
//!
//! SYSTEM CONTEXT
//! ==============
//! `pipeline` handles every REST call (auth header out, envelope in);
//! `types` defines the typed query and body records the API modules send.

pub mod pipeline;
pub mod types;
